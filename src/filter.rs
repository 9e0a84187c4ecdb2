//! Keyword filtering over a catalog.

use crate::library::{Catalog, TrackRecord};

/// True when `keyword` should be treated as "no filter".
pub fn is_blank(keyword: &str) -> bool {
    keyword.trim().is_empty()
}

/// Records whose title contains `keyword`, ignoring case, in input order.
///
/// The keyword is matched as given; deciding whether a blank keyword means
/// "skip filtering" is up to the caller (see [`is_blank`]).
pub fn filter_by_keyword(records: &[TrackRecord], keyword: &str) -> Catalog {
    let needle = keyword.to_lowercase();
    records
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
