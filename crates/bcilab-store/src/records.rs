//! Record assembly shared by every [`StarredStore`](crate::StarredStore)
//! backend, so ids and default names look the same regardless of storage.

use chrono::{DateTime, Utc};

use bcilab_types::models::{NewStarredResult, StarredResult};

/// Result id: `{user_id}_{ordinal}_{unix_seconds}.{micros}`.
pub fn result_id(user_id: &str, ordinal: usize, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}.{:06}",
        user_id,
        ordinal,
        at.timestamp(),
        at.timestamp_subsec_micros()
    )
}

pub fn default_name(existing: usize) -> String {
    format!("Configuration {}", existing + 1)
}

/// Build the record appended to a list that currently holds `existing`
/// entries. `taken` reports ids already in the list; the ordinal is bumped
/// until the id is free.
pub fn assemble(
    user_id: &str,
    existing: usize,
    draft: NewStarredResult,
    at: DateTime<Utc>,
    taken: impl Fn(&str) -> bool,
) -> StarredResult {
    let mut ordinal = existing;
    let mut id = result_id(user_id, ordinal, at);
    while taken(&id) {
        ordinal += 1;
        id = result_id(user_id, ordinal, at);
    }

    StarredResult {
        id,
        modality: draft.modality,
        parameters: draft.parameters,
        metrics: draft.metrics,
        timestamp: at,
        name: draft.name.unwrap_or_else(|| default_name(existing)),
    }
}
