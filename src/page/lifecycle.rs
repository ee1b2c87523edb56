//! Fetch lifecycle: mount-time loads, completion messages, refetches.
//!
//! Every fetch is fire-and-forget: the command is handed to the runtime, the
//! collection's `is_fetching` flag goes up, and the page keeps rendering on
//! whatever data it already has. Completions come back as the message types
//! below and are applied in completion order; each one replaces its
//! collection wholesale, so when requests overlap, the last delivery wins.
//!
//! Each message carries the dispatching model's instance id. A completion
//! whose instance does not match the model (or that arrives after
//! [`Model::unmount`]) is discarded without touching state, so a fetch that
//! outlives its view is a no-op, not a fault.

use super::Model;
use crate::error::{FetchError, PageError};
use crate::record::{Account, Group, Payload, Service, ServiceToken};
use bubbletea_rs::{Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, warn};

static LAST_INSTANCE: AtomicI64 = AtomicI64::new(0);

/// Returns a process-unique model instance id.
pub(super) fn next_instance() -> i64 {
    LAST_INSTANCE.fetch_add(1, Ordering::Relaxed) + 1
}

/// The scoped service list finished loading.
#[derive(Debug)]
pub struct ServicesLoadedMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The fetched items, or the failure.
    pub result: Result<Vec<Service>, FetchError>,
}

/// The unscoped (fallback) service list finished loading.
#[derive(Debug)]
pub struct AllServicesLoadedMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The fetched items, or the failure.
    pub result: Result<Vec<Service>, FetchError>,
}

/// The account list finished loading.
#[derive(Debug)]
pub struct AccountsLoadedMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The fetched items, or the failure.
    pub result: Result<Vec<Account>, FetchError>,
}

/// The group list finished loading.
#[derive(Debug)]
pub struct GroupsLoadedMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The fetched items, or the failure.
    pub result: Result<Vec<Group>, FetchError>,
}

/// The payload list finished loading.
#[derive(Debug)]
pub struct PayloadsLoadedMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The fetched items, or the failure.
    pub result: Result<Vec<Payload>, FetchError>,
}

/// A service token finished loading.
#[derive(Debug)]
pub struct TokenLoadedMsg {
    /// Instance id of the dispatching model.
    pub instance: i64,
    /// The minted token, or the failure.
    pub result: Result<ServiceToken, FetchError>,
}

/// The router's location changed outside the page (back button, deep link).
///
/// The page re-reads the router on receipt; the carried location is
/// informational.
#[derive(Debug, Clone)]
pub struct RouteChangedMsg {
    /// The new location path.
    pub location: String,
}

impl Model {
    /// Marks the page mounted, reconciles selection with the current route,
    /// and returns the initial fetch commands.
    ///
    /// Hand the commands to the runtime (batched or individually); none of
    /// them blocks rendering. The scoped and fallback service lists, the
    /// accounts, the groups, and the payloads are all requested.
    pub fn mount(&mut self) -> Vec<Cmd> {
        self.mounted = true;
        self.sync_with_route();
        vec![
            self.fetch_services_cmd(),
            self.fetch_all_services_cmd(),
            self.fetch_accounts_cmd(),
            self.fetch_groups_cmd(),
            self.fetch_payloads_cmd(),
        ]
    }

    /// Marks the page unmounted. Every async completion delivered afterward
    /// is discarded without touching state.
    pub fn unmount(&mut self) {
        self.mounted = false;
        debug!(instance = self.instance, "page unmounted");
    }

    /// Re-requests the scoped service list.
    pub fn refetch_services(&mut self) -> Cmd {
        self.fetch_services_cmd()
    }

    /// Re-requests the group list.
    pub fn refetch_groups(&mut self) -> Cmd {
        self.fetch_groups_cmd()
    }

    /// Requests an access token for one service (shown on the detail
    /// surface).
    pub fn fetch_token(&mut self, service: &Service) -> Cmd {
        let instance = self.instance;
        let fut = self.gateway.fetch_service_token(service);
        Box::pin(async move {
            Some(Box::new(TokenLoadedMsg {
                instance,
                result: fut.await,
            }) as Msg)
        })
    }

    /// True when a completion should be discarded: the page unmounted, or
    /// the message belongs to a different model instance.
    pub(super) fn stale(&self, instance: i64) -> bool {
        if !self.mounted || instance != self.instance {
            debug!(
                got = instance,
                current = self.instance,
                mounted = self.mounted,
                "discarding stale completion"
            );
            return true;
        }
        false
    }

    fn fetch_services_cmd(&mut self) -> Cmd {
        self.services.is_fetching = true;
        let instance = self.instance;
        let fut = self.gateway.fetch_services();
        Box::pin(async move {
            Some(Box::new(ServicesLoadedMsg {
                instance,
                result: fut.await,
            }) as Msg)
        })
    }

    fn fetch_all_services_cmd(&mut self) -> Cmd {
        self.all_services.is_fetching = true;
        let instance = self.instance;
        let fut = self.gateway.fetch_all_services();
        Box::pin(async move {
            Some(Box::new(AllServicesLoadedMsg {
                instance,
                result: fut.await,
            }) as Msg)
        })
    }

    fn fetch_accounts_cmd(&mut self) -> Cmd {
        self.accounts.is_fetching = true;
        let instance = self.instance;
        let fut = self.gateway.fetch_accounts();
        Box::pin(async move {
            Some(Box::new(AccountsLoadedMsg {
                instance,
                result: fut.await,
            }) as Msg)
        })
    }

    fn fetch_groups_cmd(&mut self) -> Cmd {
        self.groups.is_fetching = true;
        let instance = self.instance;
        let fut = self.gateway.fetch_groups();
        Box::pin(async move {
            Some(Box::new(GroupsLoadedMsg {
                instance,
                result: fut.await,
            }) as Msg)
        })
    }

    fn fetch_payloads_cmd(&mut self) -> Cmd {
        self.payloads.is_fetching = true;
        let instance = self.instance;
        let fut = self.gateway.fetch_payloads();
        Box::pin(async move {
            Some(Box::new(PayloadsLoadedMsg {
                instance,
                result: fut.await,
            }) as Msg)
        })
    }

    pub(super) fn handle_services_loaded(&mut self, msg: &ServicesLoadedMsg) {
        if self.stale(msg.instance) {
            return;
        }
        self.services.is_fetching = false;
        match &msg.result {
            Ok(items) => {
                self.services.items = items.clone();
                self.refresh_working_set();
                self.resolve_pending();
            }
            Err(err) => {
                warn!(error = %err, "services fetch failed");
                self.errors.report(&PageError::fetch("services", err.clone()));
            }
        }
    }

    pub(super) fn handle_all_services_loaded(&mut self, msg: &AllServicesLoadedMsg) {
        if self.stale(msg.instance) {
            return;
        }
        self.all_services.is_fetching = false;
        match &msg.result {
            Ok(items) => {
                self.all_services.items = items.clone();
                self.resolve_pending();
            }
            Err(err) => {
                warn!(error = %err, "all-services fetch failed");
                self.errors
                    .report(&PageError::fetch("all services", err.clone()));
            }
        }
    }

    pub(super) fn handle_accounts_loaded(&mut self, msg: &AccountsLoadedMsg) {
        if self.stale(msg.instance) {
            return;
        }
        self.accounts.is_fetching = false;
        match &msg.result {
            Ok(items) => self.accounts.items = items.clone(),
            Err(err) => {
                warn!(error = %err, "accounts fetch failed");
                self.errors.report(&PageError::fetch("accounts", err.clone()));
            }
        }
    }

    pub(super) fn handle_groups_loaded(&mut self, msg: &GroupsLoadedMsg) {
        if self.stale(msg.instance) {
            return;
        }
        self.groups.is_fetching = false;
        match &msg.result {
            Ok(items) => self.groups.items = items.clone(),
            Err(err) => {
                warn!(error = %err, "groups fetch failed");
                self.errors.report(&PageError::fetch("groups", err.clone()));
            }
        }
    }

    pub(super) fn handle_payloads_loaded(&mut self, msg: &PayloadsLoadedMsg) {
        if self.stale(msg.instance) {
            return;
        }
        self.payloads.is_fetching = false;
        match &msg.result {
            Ok(items) => self.payloads.items = items.clone(),
            Err(err) => {
                warn!(error = %err, "payloads fetch failed");
                self.errors.report(&PageError::fetch("payloads", err.clone()));
            }
        }
    }

    pub(super) fn handle_token_loaded(&mut self, msg: &TokenLoadedMsg) {
        if self.stale(msg.instance) {
            return;
        }
        match &msg.result {
            Ok(token) => self.token = Some(token.clone()),
            Err(err) => {
                warn!(error = %err, "service token fetch failed");
                self.errors
                    .report(&PageError::fetch("service token", err.clone()));
            }
        }
    }
}
