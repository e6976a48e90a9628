//! Record model
//!
//! The typed shape of fetched entities and the page envelope returned by a
//! data source.
//!
//! # Overview
//!
//! The pagination core only ever looks at a record's identifier, through the
//! [`Record`] trait. Everything else about a record belongs to the caller.
//! [`Person`] is the built-in model for the randomuser.me people feed.

mod person;
mod types;

pub use person::{
    Coordinates, Dob, Location, Login, Name, Person, Picture, Postcode, Street, Timezone,
};
pub use types::{PageEnvelope, Record};
