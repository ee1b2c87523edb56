//! The page model: state, construction, and the list-facing operations.

use super::actions::PendingAction;
use super::keys::PageKeyMap;
use super::lifecycle::next_instance;
use super::selection::Selection;
use super::style::PageStyles;
use crate::gateway::{ErrorChannel, PreferenceStore, Router, ServiceActions, ServiceGateway};
use crate::record::{Account, Collection, Group, Payload, Service, ServiceToken};
use crate::{filter, paginator, searchbox, Component};
use std::sync::Arc;

/// The services page controller.
///
/// Owns every piece of page state (the remote-backed collections, the
/// filter query, pagination, the selection, and the pending-action dialog)
/// for the lifetime of the mounted view. All outside capabilities arrive as
/// collaborator traits at construction; the page never reads ambient state.
///
/// The rendering layer is a pure function of this model: call
/// [`view`](Model::view) after any update and paint the result.
pub struct Model {
    pub(super) title: String,

    // Remote-backed collections. `services` is the page's scoped list;
    // `all_services` is the unscoped fallback used to resolve route ids
    // outside the current scope.
    pub(super) services: Collection<Service>,
    pub(super) all_services: Collection<Service>,
    pub(super) accounts: Collection<Account>,
    pub(super) groups: Collection<Group>,
    pub(super) payloads: Collection<Payload>,

    /// The filtered projection of `services` the paginator slices. Derived;
    /// rebuilt by `refresh_working_set` whenever the query or collection
    /// changes.
    pub(super) working: Vec<Service>,

    pub(super) search: searchbox::Model,
    pub(super) searching: bool,
    pub(super) paginator: paginator::Model,
    /// Cursor position within the visible page.
    pub(super) cursor: usize,

    pub(super) selection: Selection,
    pub(super) pending: PendingAction,
    pub(super) token: Option<ServiceToken>,

    pub(super) keymap: PageKeyMap,
    pub(super) styles: PageStyles,
    pub(super) width: usize,

    /// Identity carried by every command this model dispatches; completions
    /// with a different instance (or arriving after unmount) are ignored.
    pub(super) instance: i64,
    pub(super) mounted: bool,

    pub(super) gateway: Arc<dyn ServiceGateway>,
    pub(super) actions: Arc<dyn ServiceActions>,
    pub(super) router: Arc<dyn Router>,
    pub(super) errors: Arc<dyn ErrorChannel>,
    pub(super) prefs: Arc<dyn PreferenceStore>,
}

impl Model {
    /// Creates a page wired to the given collaborators.
    ///
    /// The saved rows-per-page preference, if any, is applied immediately.
    /// No fetching happens here; call [`mount`](Model::mount) to start the
    /// initial loads.
    pub fn new(
        gateway: Arc<dyn ServiceGateway>,
        actions: Arc<dyn ServiceActions>,
        router: Arc<dyn Router>,
        errors: Arc<dyn ErrorChannel>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let mut paginator = paginator::Model::new();
        if let Some(limit) = prefs.page_limit() {
            paginator.set_limit(limit);
        }

        Self {
            title: "Services".to_string(),
            services: Collection::new(),
            all_services: Collection::new(),
            accounts: Collection::new(),
            groups: Collection::new(),
            payloads: Collection::new(),
            working: Vec::new(),
            search: searchbox::Model::new(),
            searching: false,
            paginator,
            cursor: 0,
            selection: Selection::None,
            pending: PendingAction::idle(),
            token: None,
            keymap: PageKeyMap::default(),
            styles: PageStyles::default(),
            width: 80,
            instance: next_instance(),
            mounted: false,
            gateway,
            actions,
            router,
            errors,
            prefs,
        }
    }

    /// Sets the page title (builder form).
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the render width in terminal columns.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Returns the current filter query.
    pub fn query(&self) -> &str {
        self.search.value()
    }

    /// Returns the current page number (1-indexed).
    pub fn page(&self) -> usize {
        self.paginator.page
    }

    /// Returns the rows-per-page limit.
    pub fn limit(&self) -> usize {
        self.paginator.limit
    }

    /// Returns the total page count over the working set.
    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages
    }

    /// Returns the filtered working set the paginator slices.
    pub fn working_set(&self) -> &[Service] {
        &self.working
    }

    /// Returns the slice of the working set on the current page.
    pub fn visible_page(&self) -> &[Service] {
        let (start, end) = self.paginator.slice_bounds(self.working.len());
        &self.working[start..end]
    }

    /// Returns the current selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the selected service, if the selection is settled.
    pub fn selected_service(&self) -> Option<&Service> {
        self.selection.selected()
    }

    /// Returns the cursor position within the visible page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the service under the cursor, if any.
    pub fn service_under_cursor(&self) -> Option<&Service> {
        self.visible_page().get(self.cursor)
    }

    /// Returns true while the confirm dialog is open.
    pub fn dialog_open(&self) -> bool {
        self.pending.dialog_open
    }

    /// Returns true while any collection fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        self.services.is_fetching
            || self.all_services.is_fetching
            || self.accounts.is_fetching
            || self.groups.is_fetching
            || self.payloads.is_fetching
    }

    /// Returns the token loaded for the selected service, if any.
    pub fn token(&self) -> Option<&ServiceToken> {
        self.token.as_ref()
    }

    /// Returns the accounts collection.
    pub fn accounts(&self) -> &Collection<Account> {
        &self.accounts
    }

    /// Returns the groups collection.
    pub fn groups(&self) -> &Collection<Group> {
        &self.groups
    }

    /// Returns the payloads collection.
    pub fn payloads(&self) -> &Collection<Payload> {
        &self.payloads
    }

    /// Replaces the filter query and re-derives the working set.
    pub fn set_query(&mut self, query: &str) {
        self.search.set_value(query);
        self.refresh_working_set();
    }

    /// Clears the filter query and re-derives the working set.
    pub fn clear_query(&mut self) {
        self.search.reset();
        self.refresh_working_set();
    }

    /// Gives the search box focus; subsequent key messages edit the query.
    pub fn begin_search(&mut self) {
        self.searching = true;
        self.search.focus();
    }

    /// Accepts the current query and returns focus to the list.
    pub fn accept_search(&mut self) {
        self.searching = false;
        self.search.blur();
    }

    /// Abandons the search: clears the query and returns focus to the list.
    pub fn cancel_search(&mut self) {
        self.searching = false;
        self.search.blur();
        self.clear_query();
    }

    /// Advances to the next page; a no-op on the last page.
    pub fn next_page(&mut self) {
        self.paginator.next_page();
        self.cursor = 0;
    }

    /// Moves to the previous page; a no-op on the first page.
    pub fn previous_page(&mut self) {
        self.paginator.prev_page();
        self.cursor = 0;
    }

    /// Changes the rows-per-page limit, returns to page 1, and persists the
    /// choice.
    pub fn set_limit(&mut self, limit: usize) {
        self.paginator.set_limit(limit);
        self.prefs.set_page_limit(self.paginator.limit);
        self.cursor = 0;
        self.refresh_working_set();
    }

    /// Moves the cursor up within the visible page.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down within the visible page.
    pub fn cursor_down(&mut self) {
        let visible = self.paginator.items_on_page(self.working.len());
        if self.cursor + 1 < visible {
            self.cursor += 1;
        }
    }

    /// Dismisses the currently displayed error, if any.
    pub fn dismiss_error(&self) {
        self.errors.close_error_modal();
    }

    /// Rebuilds the working set from the scoped collection and the query,
    /// then re-clamps pagination and the cursor.
    ///
    /// Invoked on every query edit, limit change, and service-collection
    /// load, so the page never points past the end of the list.
    pub(super) fn refresh_working_set(&mut self) {
        self.working = filter::filter_services(&self.services.items, self.search.value());
        self.paginator.set_total_items(self.working.len());
        let visible = self.paginator.items_on_page(self.working.len());
        if self.cursor >= visible {
            self.cursor = visible.saturating_sub(1);
        }
    }
}
