//! Prefetch trigger
//!
//! Decides whether a visibility event is close enough to the end of the
//! loaded records to warrant fetching more.

use crate::record::Record;

/// Check whether the next page should be requested
///
/// - No visible record (initial render): `true`, which bootstraps the first load.
/// - Otherwise `true` only when the first record with `visible_id` is the last
///   loaded record. The look-ahead is exactly one row.
/// - Unknown ids, including any id against an empty list: `false`.
pub fn should_load_more<R: Record>(visible_id: Option<&str>, accumulated: &[R]) -> bool {
    let Some(visible_id) = visible_id else {
        return true;
    };

    accumulated
        .iter()
        .position(|record| record.id() == visible_id)
        .is_some_and(|index| index + 1 == accumulated.len())
}
