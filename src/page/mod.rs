//! The services page controller.
//!
//! This module exposes [`Model`], the stateful core of the page, plus its
//! key map, styles, selection state, and the message types its commands
//! produce.
//!
//! ## Architecture Overview
//!
//! The page follows the Elm Architecture end to end:
//!
//! 1. **Mount**: [`Model::mount`] returns the initial fetch commands and
//!    reconciles the selection with the current route.
//! 2. **Update**: every event (key presses, route changes, fetch and action
//!    completions) arrives as a message through [`Model::update`], which
//!    applies it synchronously and may return a follow-up command.
//! 3. **View**: [`Model::view`] renders the page as a pure function of
//!    state.
//!
//! ## State coordination
//!
//! - The **working set** (filtered projection of the scoped collection) is
//!   re-derived on every query edit and collection load; pagination and the
//!   cursor are re-clamped at the same time, so the page never points past
//!   the end of the list.
//! - The **selection** and the **route** are reconciled by a single
//!   synchronizer: selection transitions navigate, and route changes fold
//!   back into selection state. See the `selection` submodule.
//! - **Async completions** carry the dispatching model's instance id; stale
//!   completions (wrong instance, or delivered after unmount) are dropped
//!   without touching state. Collections are replaced wholesale per
//!   completion, so overlapping fetches resolve to last-writer-wins.
//!
//! ## Input modes
//!
//! Key handling is modal: while the confirm dialog is open only
//! confirm/cancel apply; while the search box is focused, keys edit the
//! query (accept/cancel return focus to the list); otherwise the browse
//! bindings in [`PageKeyMap`] apply.

mod actions;
mod keys;
mod lifecycle;
mod model;
mod rendering;
mod selection;
mod style;

#[cfg(test)]
mod tests;

pub use actions::{
    ConformityToggledMsg, DeactivateDoneMsg, GroupAccountRemovedMsg, PendingVerb,
    ServiceSubmittedMsg,
};
pub use keys::PageKeyMap;
pub use lifecycle::{
    AccountsLoadedMsg, AllServicesLoadedMsg, GroupsLoadedMsg, PayloadsLoadedMsg, RouteChangedMsg,
    ServicesLoadedMsg, TokenLoadedMsg,
};
pub use model::Model;
pub use selection::Selection;
pub use style::PageStyles;

use bubbletea_rs::{Cmd, KeyMsg, Msg};

impl Model {
    /// Processes one message and returns an optional follow-up command.
    ///
    /// Async completion messages are applied in the order delivered; key
    /// messages are routed by the current input mode (dialog, search, or
    /// browse). Unrecognized messages are ignored.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(m) = msg.downcast_ref::<ServicesLoadedMsg>() {
            self.handle_services_loaded(m);
            return None;
        }
        if let Some(m) = msg.downcast_ref::<AllServicesLoadedMsg>() {
            self.handle_all_services_loaded(m);
            return None;
        }
        if let Some(m) = msg.downcast_ref::<AccountsLoadedMsg>() {
            self.handle_accounts_loaded(m);
            return None;
        }
        if let Some(m) = msg.downcast_ref::<GroupsLoadedMsg>() {
            self.handle_groups_loaded(m);
            return None;
        }
        if let Some(m) = msg.downcast_ref::<PayloadsLoadedMsg>() {
            self.handle_payloads_loaded(m);
            return None;
        }
        if let Some(m) = msg.downcast_ref::<TokenLoadedMsg>() {
            self.handle_token_loaded(m);
            return None;
        }
        if let Some(m) = msg.downcast_ref::<DeactivateDoneMsg>() {
            return self.handle_deactivate_done(m);
        }
        if let Some(m) = msg.downcast_ref::<ConformityToggledMsg>() {
            return self.handle_conformity_toggled(m);
        }
        if let Some(m) = msg.downcast_ref::<ServiceSubmittedMsg>() {
            return self.handle_service_submitted(m);
        }
        if let Some(m) = msg.downcast_ref::<GroupAccountRemovedMsg>() {
            return self.handle_group_account_removed(m);
        }
        if let Some(m) = msg.downcast_ref::<RouteChangedMsg>() {
            self.handle_route_changed(m);
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }
        None
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.pending.dialog_open {
            if self.keymap.confirm.matches(key) {
                return self.confirm_pending();
            }
            if self.keymap.cancel.matches(key) {
                self.cancel_pending();
            }
            return None;
        }

        if self.searching {
            if self.keymap.accept_filter.matches(key) {
                self.accept_search();
            } else if self.keymap.cancel_filter.matches(key) {
                self.cancel_search();
            } else if self.search.update(key) {
                self.refresh_working_set();
            }
            return None;
        }

        if self.keymap.cursor_up.matches(key) {
            self.cursor_up();
        } else if self.keymap.cursor_down.matches(key) {
            self.cursor_down();
        } else if self.keymap.next_page.matches(key) {
            self.next_page();
        } else if self.keymap.prev_page.matches(key) {
            self.previous_page();
        } else if self.keymap.filter.matches(key) {
            self.begin_search();
        } else if self.keymap.select.matches(key) {
            self.select_under_cursor();
        } else if self.keymap.add.matches(key) {
            self.start_create();
        } else if self.keymap.edit.matches(key) {
            if let Some(selected) = self.selection.selected().cloned() {
                self.start_edit(&selected);
            }
        } else if self.keymap.toggle_conformity.matches(key) {
            if let Some(svc) = self.service_under_cursor().cloned() {
                return self.toggle_conformity(&svc);
            }
        } else if self.keymap.deactivate.matches(key) {
            if let Some(svc) = self.service_under_cursor().cloned() {
                self.request_deactivate(svc);
            }
        } else if self.keymap.back.matches(key) {
            if !self.query().is_empty() {
                self.clear_query();
            } else {
                self.clear_selection();
            }
        } else if self.keymap.quit.matches(key) {
            return Some(bubbletea_rs::quit());
        }
        None
    }
}
