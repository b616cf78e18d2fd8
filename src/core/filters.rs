use std::str::FromStr;

use crate::models::{ServiceTag, Shelter};

/// Service filter: a single service tag, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFilter {
    All,
    Only(ServiceTag),
}

impl ServiceFilter {
    /// Parse a wire value: "all" (case-insensitive) or a service tag.
    pub fn parse(s: &str) -> Option<ServiceFilter> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Some(ServiceFilter::All);
        }
        ServiceTag::from_str(&s.to_ascii_lowercase())
            .ok()
            .map(ServiceFilter::Only)
    }
}

/// Case-insensitive substring match of the query against shelter name
/// or address. An empty or whitespace-only query matches everything.
#[inline]
pub fn matches_query(shelter: &Shelter, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    shelter.name.to_lowercase().contains(&q) || shelter.address.to_lowercase().contains(&q)
}

/// Service-set membership check against the active filter
#[inline]
pub fn matches_service(shelter: &Shelter, filter: &ServiceFilter) -> bool {
    match filter {
        ServiceFilter::All => true,
        ServiceFilter::Only(tag) => shelter.has_service(*tag),
    }
}
