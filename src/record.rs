//! The data model for the services page.
//!
//! Records mirror what the backing API returns. Identity is by id everywhere:
//! two [`Service`] values refer to the same service exactly when their
//! `svc_id` fields are equal, regardless of the rest of the record. Fields
//! the page does not interpret are preserved opaquely in `extra` so records
//! round-trip through serialization unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Unique identifier of a service record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ServiceId(pub u64);

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ServiceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl ServiceId {
    /// Parses an id from a route parameter string.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<u64>().ok().map(Self)
    }
}

/// Unique identifier of an account record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a service group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A service record.
///
/// `name` is the display (and filter) field and `conformant` is the flag the
/// page can toggle; everything else the API sends rides along in `extra`.
///
/// # Examples
///
/// ```rust
/// use service_browser::record::{Service, ServiceId};
///
/// let svc = Service::new(ServiceId(254), "Test Service");
/// assert_eq!(svc.svc_id.0, 254);
/// assert!(!svc.conformant);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier; the sole basis of identity.
    pub svc_id: ServiceId,
    /// Display name, matched by the filter engine.
    pub name: String,
    /// Whether the service currently conforms to policy.
    #[serde(default)]
    pub conformant: bool,
    /// Additional fields the page carries but does not interpret.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl Service {
    /// Creates a minimal record with the given id and name.
    pub fn new(svc_id: ServiceId, name: impl Into<String>) -> Self {
        Self {
            svc_id,
            name: name.into(),
            conformant: false,
            extra: Map::new(),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An account record, shown on the service detail surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub account_id: AccountId,
    /// Display name.
    pub name: String,
    /// Uninterpreted additional fields.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// A service group and its member accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier.
    pub group_id: GroupId,
    /// Display name.
    pub name: String,
    /// Member accounts, by id.
    #[serde(default)]
    pub accounts: Vec<AccountId>,
}

/// A payload definition referenced by services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Unique identifier.
    pub payload_id: u64,
    /// Display name.
    pub name: String,
    /// Uninterpreted additional fields.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// An access token minted for a single service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceToken(pub String);

/// The fields a new-service submission carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDraft {
    /// Display name for the new service.
    pub name: String,
    /// Initial conformity flag.
    #[serde(default)]
    pub conformant: bool,
    /// Additional fields passed through to the action layer.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl ServiceDraft {
    /// Creates a draft with the given name and defaults elsewhere.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conformant: false,
            extra: Map::new(),
        }
    }
}

/// A partial update to an existing service. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServicePatch {
    /// New display name, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New conformity flag, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conformant: Option<bool>,
}

impl ServicePatch {
    /// A patch that only flips the conformity flag.
    pub fn conformity(conformant: bool) -> Self {
        Self {
            name: None,
            conformant: Some(conformant),
        }
    }
}

/// A remote-backed list and its loading flag.
///
/// The page owns one `Collection` per backing list. Items are only ever
/// replaced wholesale by a fetch completion, never merged, so the latest
/// delivered fetch result always wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    /// The records, in the order the backing store returned them.
    pub items: Vec<T>,
    /// True while a fetch for this collection is in flight.
    pub is_fetching: bool,
}

impl<T> Collection<T> {
    /// An empty, idle collection.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            is_fetching: false,
        }
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no items are currently held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_preserves_unknown_fields() {
        let json = r#"{"svc_id":7,"name":"SB_DB_RND","conformant":true,"region":"eu-1"}"#;
        let svc: Service = serde_json::from_str(json).unwrap();
        assert_eq!(svc.svc_id, ServiceId(7));
        assert!(svc.conformant);
        assert_eq!(svc.extra["region"], "eu-1");

        let back = serde_json::to_value(&svc).unwrap();
        assert_eq!(back["region"], "eu-1");
    }

    #[test]
    fn test_service_conformant_defaults_false() {
        let svc: Service = serde_json::from_str(r#"{"svc_id":1,"name":"A"}"#).unwrap();
        assert!(!svc.conformant);
    }

    #[test]
    fn test_service_id_parse() {
        assert_eq!(ServiceId::parse("254"), Some(ServiceId(254)));
        assert_eq!(ServiceId::parse(""), None);
        assert_eq!(ServiceId::parse("abc"), None);
    }

    #[test]
    fn test_collection_starts_empty_and_idle() {
        let c: Collection<Service> = Collection::new();
        assert!(c.is_empty());
        assert!(!c.is_fetching);
    }
}
