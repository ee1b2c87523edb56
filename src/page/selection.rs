//! Selection state and its synchronization with the route.
//!
//! The selected service and the route parameter describe the same fact, so
//! there is exactly one synchronizer and one direction of causality:
//! selection transitions cause navigation, and route changes are folded back
//! into selection state through [`Model::sync_with_route`]. The two can
//! therefore never disagree once settled.

use super::Model;
use crate::record::{Service, ServiceId};
use crate::route::Route;
use tracing::{debug, warn};

/// The page's selection state.
///
/// `PendingLookup` holds a route-carried id that has not yet been matched
/// against a loaded collection, either because the collections are still
/// loading, or because the id genuinely names no known service (a benign
/// "not found", rendered as an empty detail state).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// Nothing selected; the bare list is showing.
    #[default]
    None,
    /// A service is selected and its detail path is the current route.
    Selected(Service),
    /// The route names an id not yet resolved against any collection.
    PendingLookup(ServiceId),
}

impl Selection {
    /// Returns the selected service, if the selection is settled.
    pub fn selected(&self) -> Option<&Service> {
        match self {
            Selection::Selected(svc) => Some(svc),
            _ => None,
        }
    }

    /// Returns true if nothing is selected and no lookup is pending.
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

impl Model {
    /// Folds the router's current state into the selection.
    ///
    /// Called once at mount and again on every
    /// [`RouteChangedMsg`](super::RouteChangedMsg). A route-carried id that
    /// does not match the settled selection starts a lookup; a route without
    /// an id clears the selection (without navigating; the route is already
    /// where it should be).
    pub fn sync_with_route(&mut self) {
        match self.router.service_param() {
            Some(id) => {
                if let Selection::Selected(svc) = &self.selection {
                    if svc.svc_id == id {
                        return;
                    }
                }
                self.selection = Selection::PendingLookup(id);
                self.resolve_pending();
            }
            None => {
                if !self.selection.is_none() {
                    debug!(location = %self.router.location(), "route cleared selection");
                    self.selection = Selection::None;
                    self.token = None;
                }
            }
        }
    }

    /// Attempts to settle a pending lookup against the loaded collections.
    ///
    /// The scoped collection is consulted first, then the global fallback.
    /// On resolution the selection settles and exactly one navigation to the
    /// canonical detail path is issued; an unresolved id stays pending and
    /// is retried after the next service-collection load.
    pub(super) fn resolve_pending(&mut self) {
        let id = match &self.selection {
            Selection::PendingLookup(id) => *id,
            _ => return,
        };
        let Some(found) = self.lookup(id) else {
            debug!(%id, "selected service not found in any collection");
            return;
        };
        self.selection = Selection::Selected(found);
        self.router.navigate(&Route::Detail(id).path());
    }

    /// Selects a service directly (a list-row activation) and navigates to
    /// its detail path. Synchronous; no network round trip.
    pub fn select(&mut self, service: Service) {
        let id = service.svc_id;
        self.selection = Selection::Selected(service);
        self.token = None;
        self.router.navigate(&Route::Detail(id).path());
    }

    /// Selects the service under the cursor, if any.
    pub fn select_under_cursor(&mut self) {
        if let Some(svc) = self.service_under_cursor().cloned() {
            self.select(svc);
        }
    }

    /// Clears the selection and navigates back to the bare list.
    pub fn clear_selection(&mut self) {
        if self.selection.is_none() {
            return;
        }
        self.selection = Selection::None;
        self.token = None;
        self.router.navigate(&Route::List.path());
    }

    /// Looks an id up in the scoped collection, falling back to the global
    /// one.
    pub(super) fn lookup(&self, id: ServiceId) -> Option<Service> {
        self.services
            .items
            .iter()
            .chain(self.all_services.items.iter())
            .find(|svc| svc.svc_id == id)
            .cloned()
    }

    pub(super) fn warn_selection_mismatch(&self, wanted: &Service) {
        warn!(
            svc_id = %wanted.svc_id,
            "edit requested for a service that is not the current selection"
        );
    }
}
