//! Resolver: collapse a filtered, ordered result set into its response shape
use crate::data_model::{CatalogEntry, Resolution};

/// Pick the response shape for `entries`.
///
/// One element resolves to the record itself. Zero elements resolve to
/// `Absent` when the caller bound the full key, otherwise to an empty list.
pub fn resolve(mut entries: Vec<CatalogEntry>, fully_bound: bool) -> Resolution {
    match entries.len() {
        0 if fully_bound => Resolution::Absent,
        1 => Resolution::One(entries.remove(0)),
        _ => Resolution::Many(entries),
    }
}

/// Shape for a fully bound lookup, which yields at most one record.
pub fn resolve_single(entry: Option<CatalogEntry>) -> Resolution {
    entry.map_or(Resolution::Absent, Resolution::One)
}
