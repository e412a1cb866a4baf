//! Staleness policy: does a repository need a fresh description?

use chrono::{DateTime, Utc};

use crate::contract::ProjectRecord;

/// Decide whether the description must be regenerated, given the stored
/// record (if any) and the freshly fetched README commit timestamp.
///
/// Rules, evaluated in order, short-circuiting on the first hit:
/// 1. no prior record — regenerate;
/// 2. a record exists but no description was ever produced — regenerate,
///    regardless of timestamps, so a previously failed repository is retried
///    every run;
/// 3. the README changed since the stored timestamp — regenerate;
/// 4. otherwise reuse the stored description verbatim.
pub fn should_regenerate(record: Option<&ProjectRecord>, fresh_readme_time: DateTime<Utc>) -> bool {
    match record {
        None => true,
        Some(rec) if !rec.description_generated => true,
        Some(rec) => fresh_readme_time > rec.readme_update_time,
    }
}
