//! Collaborator traits the page consumes.
//!
//! The page never reaches into ambient state: everything it needs from the
//! outside world (data fetches, mutations, routing, error display, saved
//! preferences) arrives as an `Arc<dyn Trait>` at construction time. Fetches
//! and actions return boxed futures so implementations are free to use any
//! async transport; the page wraps them into bubbletea commands and consumes
//! only the success/failure outcome.

use crate::error::{ActionError, FetchError, PageError};
use crate::record::{
    Account, AccountId, Group, GroupId, Payload, Service, ServiceDraft, ServiceId, ServicePatch,
    ServiceToken,
};
use std::future::Future;
use std::pin::Pin;

/// A pending collection or token fetch.
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send>>;

/// A pending mutation. The page branches on success/failure only.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<(), ActionError>> + Send>>;

/// Read access to the remote catalog.
///
/// Each method starts one fetch and may fail; failures surface through the
/// [`ErrorChannel`] and never propagate as panics.
pub trait ServiceGateway: Send + Sync {
    /// Fetches the page's scoped service list.
    fn fetch_services(&self) -> FetchFuture<Vec<Service>>;

    /// Fetches the unscoped service list, used as a fallback source when
    /// resolving a route-carried id that is absent from the scoped list.
    fn fetch_all_services(&self) -> FetchFuture<Vec<Service>>;

    /// Fetches the account list shown on the detail surface.
    fn fetch_accounts(&self) -> FetchFuture<Vec<Account>>;

    /// Fetches the service groups.
    fn fetch_groups(&self) -> FetchFuture<Vec<Group>>;

    /// Fetches the payload definitions.
    fn fetch_payloads(&self) -> FetchFuture<Vec<Payload>>;

    /// Mints an access token for one service.
    fn fetch_service_token(&self, service: &Service) -> FetchFuture<ServiceToken>;
}

/// Mutations against the backing store. The store's result is authoritative;
/// the page refetches rather than patching its own copies.
pub trait ServiceActions: Send + Sync {
    /// Creates a new service from a draft.
    fn add_service(&self, draft: ServiceDraft) -> ActionFuture;

    /// Applies a partial update to an existing service.
    fn update_service(&self, service: &Service, patch: ServicePatch) -> ActionFuture;

    /// Deletes (deactivates) a service.
    fn delete_service(&self, service: &Service) -> ActionFuture;

    /// Removes an account from a service group.
    fn remove_group_account(&self, group: GroupId, account: AccountId) -> ActionFuture;
}

/// The routing surface: where the page is, and how it moves.
///
/// Navigation is always a consequence of a selection or action transition
/// inside the page; the router never mutates page state itself. Route changes
/// originating outside the page are delivered as
/// [`RouteChangedMsg`](crate::page::RouteChangedMsg) messages.
pub trait Router: Send + Sync {
    /// Navigates to the given path.
    fn navigate(&self, path: &str);

    /// Returns the current location path.
    fn location(&self) -> String;

    /// Returns the service-id route parameter, if the current route carries
    /// one.
    fn service_param(&self) -> Option<ServiceId>;
}

/// Where failures go to be shown. The page reports; it does not own display.
pub trait ErrorChannel: Send + Sync {
    /// Reports a failure for user-visible display.
    fn report(&self, error: &PageError);

    /// Dismisses the currently displayed error, if any.
    fn close_error_modal(&self);
}

/// Cross-session page preferences (the page-size choice survives remounts).
pub trait PreferenceStore: Send + Sync {
    /// Returns the saved rows-per-page choice, if any.
    fn page_limit(&self) -> Option<usize>;

    /// Saves the rows-per-page choice.
    fn set_page_limit(&self, limit: usize);
}
