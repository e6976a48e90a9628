//! Built-in person model
//!
//! Mirrors the people feed served by randomuser.me. Unknown fields in the
//! payload are ignored.

use super::types::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person from the randomuser.me feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub gender: String,
    pub name: Name,
    pub location: Location,
    pub email: String,
    pub login: Login,
    pub dob: Dob,
    pub phone: String,
    pub cell: String,
    pub picture: Picture,
    pub nat: String,
}

impl Person {
    /// Title, first and last name joined with spaces
    pub fn full_name(&self) -> String {
        [&self.name.title, &self.name.first, &self.name.last]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Record for Person {
    fn id(&self) -> &str {
        &self.login.uuid
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub title: String,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub street: Street,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postcode: Postcode,
    pub coordinates: Coordinates,
    pub timezone: Timezone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    pub number: i64,
    pub name: String,
}

/// Postal code; the feed sends numbers for some countries and strings for others
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Postcode {
    Int(i64),
    Str(String),
}

impl Postcode {
    /// Render the postcode as text regardless of its wire type
    pub fn as_string(&self) -> String {
        match self {
            Postcode::Int(value) => value.to_string(),
            Postcode::Str(value) => value.clone(),
        }
    }
}

impl std::fmt::Display for Postcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Postcode::Int(value) => write!(f, "{value}"),
            Postcode::Str(value) => f.write_str(value),
        }
    }
}

/// Latitude/longitude, sent as strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timezone {
    pub offset: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    pub uuid: String,
}

/// Date of birth
///
/// `date` is kept as sent so an unusual format never fails the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dob {
    pub date: String,
    pub age: u32,
}

impl Dob {
    /// The date as a UTC timestamp, if it is RFC 3339
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|date| date.with_timezone(&Utc))
    }
}

/// Picture URLs in three sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub large: String,
    pub medium: String,
    pub thumbnail: String,
}
