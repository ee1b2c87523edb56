//! The action dispatcher: create/update/delete flows and the confirm dialog.
//!
//! Mutations go through the [`ServiceActions`](crate::gateway::ServiceActions)
//! collaborator and its result is authoritative: on success the page refetches
//! the affected collection rather than patching its own copy; on failure the
//! page state is left exactly as it was and the rejection is surfaced through
//! the error channel.
//!
//! Deactivation is destructive, so it runs through an interstitial dialog:
//! [`Model::request_deactivate`] opens it, [`Model::confirm_pending`]
//! dispatches the delete (at most once per confirmation: the pending verb is
//! consumed on dispatch), and [`Model::cancel_pending`] closes it without
//! dispatching anything.

use super::lifecycle::RouteChangedMsg;
use super::selection::Selection;
use super::Model;
use crate::error::{ActionError, PageError};
use crate::record::{AccountId, GroupId, Service, ServiceDraft, ServicePatch};
use crate::route::Route;
use bubbletea_rs::{Cmd, Msg};
use tracing::{debug, warn};

/// The destructive verb awaiting confirmation, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingVerb {
    /// Nothing pending.
    #[default]
    None,
    /// Deactivation (delete) of the target service.
    Deactivate,
}

/// Transient state for the confirm/cancel flow around a destructive action.
///
/// The dialog holds at most one target at a time, and stays open from the
/// confirmation click until the action settles so the outcome is reported
/// against the row the user acted on.
#[derive(Debug, Clone, Default)]
pub(super) struct PendingAction {
    pub verb: PendingVerb,
    pub target: Option<Service>,
    pub dialog_open: bool,
}

impl PendingAction {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A confirmed deactivation settled.
#[derive(Debug)]
pub struct DeactivateDoneMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The service the delete was dispatched for.
    pub target: Service,
    /// The action outcome.
    pub result: Result<(), ActionError>,
}

/// A conformity toggle settled.
#[derive(Debug)]
pub struct ConformityToggledMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The action outcome.
    pub result: Result<(), ActionError>,
}

/// A new-service submission settled.
#[derive(Debug)]
pub struct ServiceSubmittedMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The action outcome.
    pub result: Result<(), ActionError>,
}

/// A group-account removal settled.
#[derive(Debug)]
pub struct GroupAccountRemovedMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The action outcome.
    pub result: Result<(), ActionError>,
}

impl Model {
    /// Begins the add-service flow: clears the selection and navigates to
    /// the add route. Nothing is mutated yet; the form downstream completes
    /// the creation.
    pub fn start_create(&mut self) {
        self.selection = Selection::None;
        self.token = None;
        self.router.navigate(&Route::Add.path());
    }

    /// Navigates to the edit route for the given service.
    ///
    /// Requires the service to be the settled selection; anything else is a
    /// logged no-op.
    pub fn start_edit(&mut self, service: &Service) {
        match self.selection.selected() {
            Some(selected) if selected.svc_id == service.svc_id => {
                self.router.navigate(&Route::Edit(service.svc_id).path());
            }
            _ => self.warn_selection_mismatch(service),
        }
    }

    /// Dispatches an update that inverts the service's conformity flag.
    ///
    /// The selection is never changed here; whether the store applies the
    /// update optimistically or pessimistically is its own business. On
    /// success the scoped list is refetched so the page shows the
    /// authoritative value.
    pub fn toggle_conformity(&mut self, service: &Service) -> Option<Cmd> {
        let patch = ServicePatch::conformity(!service.conformant);
        let instance = self.instance;
        let fut = self.actions.update_service(service, patch);
        Some(Box::pin(async move {
            Some(Box::new(ConformityToggledMsg {
                instance,
                result: fut.await,
            }) as Msg)
        }))
    }

    /// Opens the confirm dialog for deactivating a service.
    ///
    /// Nothing is mutated yet. While a dialog is already open for another
    /// target, the request is ignored: one target at a time.
    pub fn request_deactivate(&mut self, service: Service) {
        if self.pending.dialog_open {
            debug!(svc_id = %service.svc_id, "deactivate requested while dialog open; ignored");
            return;
        }
        self.pending = PendingAction {
            verb: PendingVerb::Deactivate,
            target: Some(service),
            dialog_open: true,
        };
    }

    /// Confirms the pending deactivation, dispatching the delete.
    ///
    /// The pending verb is consumed on dispatch, so a second confirmation
    /// click while the delete is in flight does nothing. The dialog stays
    /// open until the outcome arrives as a [`DeactivateDoneMsg`].
    pub fn confirm_pending(&mut self) -> Option<Cmd> {
        if self.pending.verb != PendingVerb::Deactivate {
            return None;
        }
        let target = self.pending.target.clone()?;
        self.pending.verb = PendingVerb::None;

        let instance = self.instance;
        let fut = self.actions.delete_service(&target);
        Some(Box::pin(async move {
            Some(Box::new(DeactivateDoneMsg {
                instance,
                target,
                result: fut.await,
            }) as Msg)
        }))
    }

    /// Closes the confirm dialog without dispatching anything. The selection
    /// is untouched.
    pub fn cancel_pending(&mut self) {
        self.pending.reset();
    }

    /// Dispatches a new-service submission produced by the add form.
    ///
    /// On success the scoped list is refetched and the page returns to the
    /// list root.
    pub fn submit_service(&mut self, draft: ServiceDraft) -> Option<Cmd> {
        let instance = self.instance;
        let fut = self.actions.add_service(draft);
        Some(Box::pin(async move {
            Some(Box::new(ServiceSubmittedMsg {
                instance,
                result: fut.await,
            }) as Msg)
        }))
    }

    /// Dispatches removal of an account from a service group. On success the
    /// group list is refetched.
    pub fn remove_group_account(&mut self, group: GroupId, account: AccountId) -> Option<Cmd> {
        let instance = self.instance;
        let fut = self.actions.remove_group_account(group, account);
        Some(Box::pin(async move {
            Some(Box::new(GroupAccountRemovedMsg {
                instance,
                result: fut.await,
            }) as Msg)
        }))
    }

    pub(super) fn handle_deactivate_done(&mut self, msg: &DeactivateDoneMsg) -> Option<Cmd> {
        if self.stale(msg.instance) {
            return None;
        }
        self.pending.reset();
        match &msg.result {
            Ok(()) => {
                self.selection = Selection::None;
                self.token = None;
                self.router.navigate(&Route::List.path());
                Some(self.refetch_services())
            }
            Err(err) => {
                warn!(svc_id = %msg.target.svc_id, error = %err, "deactivate failed");
                self.errors.report(&PageError::Action {
                    source: err.clone(),
                });
                None
            }
        }
    }

    pub(super) fn handle_conformity_toggled(&mut self, msg: &ConformityToggledMsg) -> Option<Cmd> {
        if self.stale(msg.instance) {
            return None;
        }
        match &msg.result {
            Ok(()) => Some(self.refetch_services()),
            Err(err) => {
                warn!(error = %err, "conformity update failed");
                self.errors.report(&PageError::Action {
                    source: err.clone(),
                });
                None
            }
        }
    }

    pub(super) fn handle_service_submitted(&mut self, msg: &ServiceSubmittedMsg) -> Option<Cmd> {
        if self.stale(msg.instance) {
            return None;
        }
        match &msg.result {
            Ok(()) => {
                self.router.navigate(&Route::List.path());
                Some(self.refetch_services())
            }
            Err(err) => {
                warn!(error = %err, "add service failed");
                self.errors.report(&PageError::Action {
                    source: err.clone(),
                });
                None
            }
        }
    }

    pub(super) fn handle_group_account_removed(
        &mut self,
        msg: &GroupAccountRemovedMsg,
    ) -> Option<Cmd> {
        if self.stale(msg.instance) {
            return None;
        }
        match &msg.result {
            Ok(()) => Some(self.refetch_groups()),
            Err(err) => {
                warn!(error = %err, "group account removal failed");
                self.errors.report(&PageError::Action {
                    source: err.clone(),
                });
                None
            }
        }
    }

    pub(super) fn handle_route_changed(&mut self, msg: &RouteChangedMsg) {
        debug!(location = %msg.location, "route changed");
        self.sync_with_route();
    }
}
