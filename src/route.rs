//! The route surface the page navigates over.
//!
//! Four routes exist: the list root, a service's detail view, the add form,
//! and a service's edit form. [`Route::path`] renders the canonical path and
//! [`Route::parse`] recovers a route from a location string, so the path
//! shape lives in exactly one place.

use crate::record::ServiceId;

/// A location within the services page.
///
/// # Examples
///
/// ```rust
/// use service_browser::route::Route;
/// use service_browser::record::ServiceId;
///
/// assert_eq!(Route::Detail(ServiceId(254)).path(), "/services/254");
/// assert_eq!(Route::parse("/services/254"), Some(Route::Detail(ServiceId(254))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The bare list: `/services`.
    List,
    /// A single service's detail view: `/services/{id}`.
    Detail(ServiceId),
    /// The add-service form: `/services/add`.
    Add,
    /// A single service's edit form: `/services/{id}/edit`.
    Edit(ServiceId),
}

impl Route {
    /// Renders the canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::List => "/services".to_string(),
            Route::Detail(id) => format!("/services/{id}"),
            Route::Add => "/services/add".to_string(),
            Route::Edit(id) => format!("/services/{id}/edit"),
        }
    }

    /// Parses a location path into a route.
    ///
    /// Trailing slashes are tolerated. Paths outside the services surface
    /// return `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let mut segments = path.trim_matches('/').split('/');
        if segments.next()? != "services" {
            return None;
        }
        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) | (Some(""), _, _) => Some(Route::List),
            (Some("add"), None, _) => Some(Route::Add),
            (Some(id), None, _) => ServiceId::parse(id).map(Route::Detail),
            (Some(id), Some("edit"), None) => ServiceId::parse(id).map(Route::Edit),
            _ => None,
        }
    }

    /// Returns the service id this route addresses, if any.
    pub fn service_id(&self) -> Option<ServiceId> {
        match self {
            Route::Detail(id) | Route::Edit(id) => Some(*id),
            Route::List | Route::Add => None,
        }
    }
}
