//! Error taxonomy for the services page.
//!
//! Nothing here is fatal: fetch failures leave prior data in place, action
//! failures leave page state untouched, and both are surfaced to the user
//! through the [`ErrorChannel`](crate::gateway::ErrorChannel) collaborator.

use thiserror::Error;

/// A collection load failure (network or decode).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request itself failed (connectivity, timeout, server error).
    #[error("request failed: {0}")]
    Request(String),
    /// The response arrived but could not be decoded into records.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// A create/update/delete rejection from the action layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{verb} rejected: {reason}")]
pub struct ActionError {
    /// The action that was rejected ("add", "update", "delete", ...).
    pub verb: &'static str,
    /// Human-readable rejection reason.
    pub reason: String,
}

impl ActionError {
    /// Creates a rejection for the given action verb.
    pub fn rejected(verb: &'static str, reason: impl Into<String>) -> Self {
        Self {
            verb,
            reason: reason.into(),
        }
    }
}

/// What the error channel receives: a failure tagged with what the page was
/// doing when it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// A collection failed to load.
    #[error("loading {what}: {source}")]
    Fetch {
        /// Which collection was loading ("services", "accounts", ...).
        what: &'static str,
        /// The underlying failure.
        source: FetchError,
    },
    /// An action dispatch failed.
    #[error(transparent)]
    Action {
        /// The underlying rejection.
        #[from]
        source: ActionError,
    },
}

impl PageError {
    /// Wraps a fetch failure with the collection it was loading.
    pub fn fetch(what: &'static str, source: FetchError) -> Self {
        Self::Fetch { what, source }
    }
}
