//! Name filtering for service lists.
//!
//! Matching is a case-insensitive substring test against the display name:
//! predictable, order-preserving, and cheap enough to recompute on every
//! keystroke. The query is trimmed before comparison, so a query that is
//! only whitespace applies no filter at all.

use crate::record::Service;

/// Returns the normalized form of a query: lowercased and trimmed, or `None`
/// when nothing remains to match against.
fn normalize(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Returns true if the service's name contains the query,
/// case-insensitively. A blank query matches everything.
pub fn matches(service: &Service, query: &str) -> bool {
    match normalize(query) {
        None => true,
        Some(needle) => service.name.to_lowercase().contains(&needle),
    }
}

/// Reduces a service list to the entries matching a free-text query.
///
/// The result is an order-preserving subsequence of the input; an empty (or
/// whitespace-only) query returns the input unchanged. The function is pure
/// and idempotent: filtering a filtered list with the same query is a no-op.
///
/// # Examples
///
/// ```rust
/// use service_browser::filter::filter_services;
/// use service_browser::record::{Service, ServiceId};
///
/// let items = vec![
///     Service::new(ServiceId(1), "Service A"),
///     Service::new(ServiceId(2), "Service B"),
/// ];
///
/// let hits = filter_services(&items, "service a");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].svc_id, ServiceId(1));
///
/// assert_eq!(filter_services(&items, "").len(), 2);
/// ```
pub fn filter_services(items: &[Service], query: &str) -> Vec<Service> {
    match normalize(query) {
        None => items.to_vec(),
        Some(needle) => items
            .iter()
            .filter(|svc| svc.name.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ServiceId;

    fn services(names: &[&str]) -> Vec<Service> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Service::new(ServiceId(i as u64 + 1), *name))
            .collect()
    }

    #[test]
    fn test_empty_query_returns_input_unchanged() {
        let items = services(&["Service A", "Service B"]);
        assert_eq!(filter_services(&items, ""), items);
    }

    #[test]
    fn test_whitespace_only_query_applies_no_filter() {
        let items = services(&["Service A", "Service B"]);
        assert_eq!(filter_services(&items, "   \t"), items);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let items = services(&["Service A", "Service B"]);
        let hits = filter_services(&items, "SERVICE a");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Service A");
    }

    #[test]
    fn test_result_preserves_input_order() {
        let items = services(&["gamma db", "alpha db", "beta cache", "delta db"]);
        let hits = filter_services(&items, "db");
        let names: Vec<&str> = hits.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["gamma db", "alpha db", "delta db"]);
    }

    #[test]
    fn test_query_is_trimmed_before_matching() {
        let items = services(&["Service A", "Service B"]);
        let hits = filter_services(&items, "  Service A  ");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = services(&["Service A", "Service B", "Other"]);
        let once = filter_services(&items, "service");
        let twice = filter_services(&once, "service");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_matches_yields_empty() {
        let items = services(&["Service A"]);
        assert!(filter_services(&items, "zzz").is_empty());
    }

    #[test]
    fn test_matches_single_record() {
        let svc = Service::new(ServiceId(1), "Billing Gateway");
        assert!(matches(&svc, "gateway"));
        assert!(matches(&svc, ""));
        assert!(!matches(&svc, "ledger"));
    }
}
