//! Tests for the services page controller.
//!
//! Collaborators are in-memory fakes: the gateway serves canned results, the
//! router and action layer record what the page asked of them, and commands
//! are awaited directly so completion messages can be delivered in any order.

use super::*;
use crate::error::{ActionError, FetchError, PageError};
use crate::gateway::{
    ActionFuture, ErrorChannel, FetchFuture, PreferenceStore, Router, ServiceActions,
    ServiceGateway,
};
use crate::record::{
    Account, AccountId, Group, GroupId, Payload, Service, ServiceDraft, ServiceId, ServicePatch,
    ServiceToken,
};
use crate::route::Route;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::{Arc, Mutex};

struct StubGateway {
    services: Mutex<Result<Vec<Service>, FetchError>>,
    all_services: Mutex<Result<Vec<Service>, FetchError>>,
}

impl StubGateway {
    fn with_services(items: Vec<Service>) -> Self {
        Self {
            services: Mutex::new(Ok(items)),
            all_services: Mutex::new(Ok(Vec::new())),
        }
    }

    fn set_services(&self, items: Vec<Service>) {
        *self.services.lock().unwrap() = Ok(items);
    }

    fn set_all_services(&self, items: Vec<Service>) {
        *self.all_services.lock().unwrap() = Ok(items);
    }
}

impl ServiceGateway for StubGateway {
    fn fetch_services(&self) -> FetchFuture<Vec<Service>> {
        let result = self.services.lock().unwrap().clone();
        Box::pin(async move { result })
    }

    fn fetch_all_services(&self) -> FetchFuture<Vec<Service>> {
        let result = self.all_services.lock().unwrap().clone();
        Box::pin(async move { result })
    }

    fn fetch_accounts(&self) -> FetchFuture<Vec<Account>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn fetch_groups(&self) -> FetchFuture<Vec<Group>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn fetch_payloads(&self) -> FetchFuture<Vec<Payload>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn fetch_service_token(&self, _service: &Service) -> FetchFuture<ServiceToken> {
        Box::pin(async { Ok(ServiceToken("tok-1".into())) })
    }
}

#[derive(Default)]
struct RecordingActions {
    adds: Mutex<Vec<ServiceDraft>>,
    updates: Mutex<Vec<(ServiceId, ServicePatch)>>,
    deletes: Mutex<Vec<Service>>,
    removals: Mutex<Vec<(GroupId, AccountId)>>,
    fail_delete: Mutex<bool>,
}

impl ServiceActions for RecordingActions {
    fn add_service(&self, draft: ServiceDraft) -> ActionFuture {
        self.adds.lock().unwrap().push(draft);
        Box::pin(async { Ok(()) })
    }

    fn update_service(&self, service: &Service, patch: ServicePatch) -> ActionFuture {
        self.updates.lock().unwrap().push((service.svc_id, patch));
        Box::pin(async { Ok(()) })
    }

    fn delete_service(&self, service: &Service) -> ActionFuture {
        self.deletes.lock().unwrap().push(service.clone());
        let fail = *self.fail_delete.lock().unwrap();
        Box::pin(async move {
            if fail {
                Err(ActionError::rejected("delete", "forbidden"))
            } else {
                Ok(())
            }
        })
    }

    fn remove_group_account(&self, group: GroupId, account: AccountId) -> ActionFuture {
        self.removals.lock().unwrap().push((group, account));
        Box::pin(async { Ok(()) })
    }
}

#[derive(Default)]
struct RecordingRouter {
    navigations: Mutex<Vec<String>>,
    location: Mutex<String>,
    param: Mutex<Option<ServiceId>>,
}

impl RecordingRouter {
    fn at(location: &str, param: Option<ServiceId>) -> Self {
        Self {
            navigations: Mutex::new(Vec::new()),
            location: Mutex::new(location.to_string()),
            param: Mutex::new(param),
        }
    }

    /// Moves the router without recording a navigation, as an external
    /// route change (back button, deep link) would.
    fn jump(&self, location: &str) {
        *self.location.lock().unwrap() = location.to_string();
        *self.param.lock().unwrap() = Route::parse(location).and_then(|r| r.service_id());
    }

    fn recorded(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl Router for RecordingRouter {
    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
        self.jump(path);
    }

    fn location(&self) -> String {
        self.location.lock().unwrap().clone()
    }

    fn service_param(&self) -> Option<ServiceId> {
        *self.param.lock().unwrap()
    }
}

#[derive(Default)]
struct RecordingErrors {
    reported: Mutex<Vec<String>>,
    closed: Mutex<usize>,
}

impl ErrorChannel for RecordingErrors {
    fn report(&self, error: &PageError) {
        self.reported.lock().unwrap().push(error.to_string());
    }

    fn close_error_modal(&self) {
        *self.closed.lock().unwrap() += 1;
    }
}

#[derive(Default)]
struct MemoryPrefs {
    limit: Mutex<Option<usize>>,
}

impl PreferenceStore for MemoryPrefs {
    fn page_limit(&self) -> Option<usize> {
        *self.limit.lock().unwrap()
    }

    fn set_page_limit(&self, limit: usize) {
        *self.limit.lock().unwrap() = Some(limit);
    }
}

struct Harness {
    page: Model,
    gateway: Arc<StubGateway>,
    actions: Arc<RecordingActions>,
    router: Arc<RecordingRouter>,
    errors: Arc<RecordingErrors>,
    prefs: Arc<MemoryPrefs>,
}

fn harness_at(services: Vec<Service>, location: &str, param: Option<ServiceId>) -> Harness {
    let gateway = Arc::new(StubGateway::with_services(services));
    let actions = Arc::new(RecordingActions::default());
    let router = Arc::new(RecordingRouter::at(location, param));
    let errors = Arc::new(RecordingErrors::default());
    let prefs = Arc::new(MemoryPrefs::default());
    let page = Model::new(
        gateway.clone(),
        actions.clone(),
        router.clone(),
        errors.clone(),
        prefs.clone(),
    );
    Harness {
        page,
        gateway,
        actions,
        router,
        errors,
        prefs,
    }
}

fn harness(services: Vec<Service>) -> Harness {
    harness_at(services, "/services", None)
}

fn svc(id: u64, name: &str) -> Service {
    Service::new(ServiceId(id), name)
}

fn many(n: usize) -> Vec<Service> {
    (1..=n).map(|i| svc(i as u64, &format!("Service {i}"))).collect()
}

fn names(services: &[Service]) -> Vec<&str> {
    services.iter().map(|s| s.name.as_str()).collect()
}

/// Mounts the page and delivers every initial fetch completion.
async fn mount_and_settle(h: &mut Harness) {
    let cmds = h.page.mount();
    deliver_all(h, cmds).await;
}

async fn deliver_all(h: &mut Harness, cmds: Vec<Cmd>) {
    for cmd in cmds {
        deliver(h, cmd).await;
    }
}

/// Awaits one command and feeds its message back into the page.
async fn deliver(h: &mut Harness, cmd: Cmd) -> Option<Cmd> {
    let msg = cmd.await.expect("command produced no message");
    h.page.update(msg)
}

fn press(page: &mut Model, code: KeyCode) -> Option<Cmd> {
    page.update(Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }) as Msg)
}

#[test]
fn test_mount_dispatches_all_fetches() {
    let mut h = harness(many(3));
    let cmds = h.page.mount();
    assert_eq!(cmds.len(), 5);
    assert!(h.page.is_fetching());
}

#[tokio::test]
async fn test_services_load_populates_working_set() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;
    assert!(!h.page.is_fetching());
    assert_eq!(h.page.working_set().len(), 3);
    assert_eq!(h.page.visible_page().len(), 3);
}

#[tokio::test]
async fn test_mount_with_route_param_navigates_exactly_once() {
    let mut h = harness_at(
        vec![svc(254, "Test Service")],
        "/services",
        Some(ServiceId(254)),
    );
    mount_and_settle(&mut h).await;

    assert_eq!(h.router.recorded(), vec!["/services/254".to_string()]);
    assert_eq!(
        h.page.selected_service().map(|s| s.svc_id),
        Some(ServiceId(254))
    );
}

#[tokio::test]
async fn test_route_id_resolves_from_global_fallback() {
    let mut h = harness_at(vec![svc(1, "Scoped")], "/services", Some(ServiceId(77)));
    h.gateway.set_all_services(vec![svc(77, "Unscoped")]);
    mount_and_settle(&mut h).await;

    assert_eq!(h.router.recorded(), vec!["/services/77".to_string()]);
    assert_eq!(
        h.page.selected_service().map(|s| s.name.clone()),
        Some("Unscoped".to_string())
    );
}

#[tokio::test]
async fn test_unresolvable_route_id_stays_pending_without_error() {
    let mut h = harness_at(many(2), "/services", Some(ServiceId(999)));
    mount_and_settle(&mut h).await;

    assert_eq!(*h.page.selection(), Selection::PendingLookup(ServiceId(999)));
    assert!(h.router.recorded().is_empty());
    assert!(h.errors.reported.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_filter_query_narrows_working_set() {
    let mut h = harness(vec![svc(1, "Service A"), svc(2, "Service B")]);
    mount_and_settle(&mut h).await;

    h.page.set_query("Service A");
    assert_eq!(names(h.page.working_set()), vec!["Service A"]);
    assert!(!h.page.view().contains("Service B"));
}

#[tokio::test]
async fn test_whitespace_query_filters_nothing() {
    let mut h = harness(vec![svc(1, "Service A"), svc(2, "Service B")]);
    mount_and_settle(&mut h).await;

    h.page.set_query("   ");
    assert_eq!(h.page.working_set().len(), 2);
}

#[tokio::test]
async fn test_search_keys_edit_the_query() {
    let mut h = harness(vec![svc(1, "Service A"), svc(2, "Service B")]);
    mount_and_settle(&mut h).await;

    press(&mut h.page, KeyCode::Char('/'));
    for c in "a b".chars() {
        press(&mut h.page, KeyCode::Char(c));
    }
    press(&mut h.page, KeyCode::Backspace);
    press(&mut h.page, KeyCode::Backspace);
    press(&mut h.page, KeyCode::Enter);

    assert_eq!(h.page.query(), "a");
    assert_eq!(names(h.page.working_set()), vec!["Service A"]);
}

#[tokio::test]
async fn test_pagination_scenario_fifteen_items() {
    let mut h = harness(many(15));
    mount_and_settle(&mut h).await;

    assert_eq!(h.page.visible_page().len(), 10);
    assert_eq!(h.page.visible_page()[0].name, "Service 1");

    press(&mut h.page, KeyCode::Right);
    assert_eq!(h.page.visible_page().len(), 5);
    assert_eq!(h.page.visible_page()[0].name, "Service 11");
    assert!(h.page.view().contains("Page 2/2"));

    press(&mut h.page, KeyCode::Left);
    assert_eq!(h.page.visible_page().len(), 10);
    assert_eq!(h.page.visible_page()[0].name, "Service 1");
    assert!(h.page.view().contains("Page 1/2"));
}

#[tokio::test]
async fn test_narrowing_filter_reclamps_page() {
    let mut h = harness(many(30));
    mount_and_settle(&mut h).await;

    press(&mut h.page, KeyCode::Right);
    press(&mut h.page, KeyCode::Right);
    assert_eq!(h.page.page(), 3);

    // Only "Service 3" and "Service 30" survive this query.
    h.page.set_query("Service 3");
    assert_eq!(h.page.page(), 1);
    assert_eq!(h.page.working_set().len(), 2);
}

#[tokio::test]
async fn test_set_limit_resets_page_and_persists() {
    let mut h = harness(many(30));
    mount_and_settle(&mut h).await;

    press(&mut h.page, KeyCode::Right);
    assert_eq!(h.page.page(), 2);

    h.page.set_limit(25);
    assert_eq!(h.page.page(), 1);
    assert_eq!(h.page.limit(), 25);
    assert_eq!(*h.prefs.limit.lock().unwrap(), Some(25));
}

#[tokio::test]
async fn test_select_under_cursor_navigates_to_detail() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;

    press(&mut h.page, KeyCode::Down);
    press(&mut h.page, KeyCode::Enter);

    assert_eq!(h.router.recorded(), vec!["/services/2".to_string()]);
    assert_eq!(
        h.page.selected_service().map(|s| s.svc_id),
        Some(ServiceId(2))
    );
}

#[tokio::test]
async fn test_deactivate_confirm_deletes_then_navigates_to_list() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;

    press(&mut h.page, KeyCode::Char('x'));
    assert!(h.page.dialog_open());

    let done = press(&mut h.page, KeyCode::Char('y')).expect("confirm dispatches the delete");
    {
        let deletes = h.actions.deletes.lock().unwrap();
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].svc_id, ServiceId(1));
    }

    let refetch = deliver(&mut h, done).await;
    assert!(refetch.is_some(), "successful delete refetches the list");
    assert!(!h.page.dialog_open());
    assert!(h.page.selection().is_none());
    assert_eq!(h.router.recorded(), vec!["/services".to_string()]);
}

#[tokio::test]
async fn test_deactivate_cancel_never_invokes_delete() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;

    press(&mut h.page, KeyCode::Char('x'));
    assert!(h.page.dialog_open());
    press(&mut h.page, KeyCode::Char('n'));

    assert!(!h.page.dialog_open());
    assert!(h.actions.deletes.lock().unwrap().is_empty());
    assert!(h.router.recorded().is_empty());
}

#[tokio::test]
async fn test_double_confirm_dispatches_single_delete() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;

    press(&mut h.page, KeyCode::Char('x'));
    let first = press(&mut h.page, KeyCode::Char('y'));
    let second = press(&mut h.page, KeyCode::Char('y'));

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(h.actions.deletes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_second_deactivate_request_is_ignored_while_dialog_open() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;

    h.page.request_deactivate(svc(1, "Service 1"));
    h.page.request_deactivate(svc(2, "Service 2"));

    let done = h.page.confirm_pending().expect("dialog has a target");
    deliver(&mut h, done).await;

    let deletes = h.actions.deletes.lock().unwrap();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].svc_id, ServiceId(1));
}

#[tokio::test]
async fn test_delete_failure_leaves_selection_and_reports() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;
    *h.actions.fail_delete.lock().unwrap() = true;

    h.page.select(svc(1, "Service 1"));
    assert_eq!(h.router.recorded().len(), 1);

    h.page.request_deactivate(svc(1, "Service 1"));
    let done = h.page.confirm_pending().expect("confirm dispatches");
    let follow = deliver(&mut h, done).await;

    assert!(follow.is_none());
    assert!(!h.page.dialog_open());
    assert_eq!(
        h.page.selected_service().map(|s| s.svc_id),
        Some(ServiceId(1)),
        "failed delete must not clear the selection"
    );
    assert_eq!(h.router.recorded().len(), 1, "no navigation on failure");
    assert_eq!(
        h.errors.reported.lock().unwrap().as_slice(),
        ["delete rejected: forbidden"]
    );
}

#[tokio::test]
async fn test_fetch_failure_reports_and_keeps_rendering() {
    let mut h = harness(Vec::new());
    *h.gateway.services.lock().unwrap() = Err(FetchError::Request("connection refused".into()));
    mount_and_settle(&mut h).await;

    assert_eq!(
        h.errors.reported.lock().unwrap().as_slice(),
        ["loading services: request failed: connection refused"]
    );
    assert!(h.page.working_set().is_empty());
    assert!(h.page.view().contains("No services."));

    // Still responsive after the failure.
    press(&mut h.page, KeyCode::Right);
    h.page.dismiss_error();
    assert_eq!(*h.errors.closed.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_out_of_order_completions_last_delivery_wins() {
    let mut h = harness(Vec::new());
    mount_and_settle(&mut h).await;

    h.gateway.set_services(vec![svc(1, "First Batch")]);
    let older = h.page.refetch_services();
    h.gateway.set_services(vec![svc(2, "Second Batch")]);
    let newer = h.page.refetch_services();

    // The later-requested fetch completes first; the older request's
    // completion arrives last and wins the collection wholesale.
    deliver(&mut h, newer).await;
    assert_eq!(names(h.page.working_set()), vec!["Second Batch"]);
    deliver(&mut h, older).await;
    assert_eq!(names(h.page.working_set()), vec!["First Batch"]);
}

#[tokio::test]
async fn test_completion_after_unmount_is_ignored() {
    let mut h = harness(many(3));
    let cmds = h.page.mount();
    h.page.unmount();
    deliver_all(&mut h, cmds).await;

    assert!(h.page.working_set().is_empty());
    assert!(h.router.recorded().is_empty());
}

#[tokio::test]
async fn test_toggle_conformity_patches_without_touching_selection() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;
    h.page.select(svc(2, "Service 2"));

    let cmd = press(&mut h.page, KeyCode::Char('t')).expect("toggle dispatches an update");
    {
        let updates = h.actions.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, ServiceId(1));
        assert_eq!(updates[0].1, ServicePatch::conformity(true));
    }

    let refetch = deliver(&mut h, cmd).await;
    assert!(refetch.is_some(), "successful update refetches the list");
    assert_eq!(
        h.page.selected_service().map(|s| s.svc_id),
        Some(ServiceId(2)),
        "toggling conformity must not move the selection"
    );
}

#[tokio::test]
async fn test_start_create_clears_selection_and_navigates() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;
    h.page.select(svc(1, "Service 1"));

    press(&mut h.page, KeyCode::Char('a'));

    assert!(h.page.selection().is_none());
    assert_eq!(
        h.router.recorded().last().map(String::as_str),
        Some("/services/add")
    );
}

#[tokio::test]
async fn test_start_edit_requires_matching_selection() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;

    // No selection at all: no navigation.
    h.page.start_edit(&svc(1, "Service 1"));
    assert!(h.router.recorded().is_empty());

    // Selection exists but is a different service: still no navigation.
    h.page.select(svc(2, "Service 2"));
    h.page.start_edit(&svc(1, "Service 1"));
    assert_eq!(h.router.recorded(), vec!["/services/2".to_string()]);

    // Matching selection: navigates to the edit route.
    h.page.start_edit(&svc(2, "Service 2"));
    assert_eq!(
        h.router.recorded().last().map(String::as_str),
        Some("/services/2/edit")
    );
}

#[tokio::test]
async fn test_external_route_change_clears_selection() {
    let mut h = harness(many(3));
    mount_and_settle(&mut h).await;
    h.page.select(svc(1, "Service 1"));

    h.router.jump("/services");
    h.page.update(Box::new(RouteChangedMsg {
        location: "/services".into(),
    }) as Msg);

    assert!(h.page.selection().is_none());
    assert_eq!(h.router.recorded().len(), 1, "clearing by route does not navigate");
}

#[tokio::test]
async fn test_submit_service_refetches_and_returns_to_list() {
    let mut h = harness(Vec::new());
    mount_and_settle(&mut h).await;

    let cmd = h
        .page
        .submit_service(ServiceDraft::named("New Service"))
        .expect("submission dispatches");
    assert_eq!(h.actions.adds.lock().unwrap().len(), 1);

    let refetch = deliver(&mut h, cmd).await;
    assert!(refetch.is_some());
    assert_eq!(
        h.router.recorded().last().map(String::as_str),
        Some("/services")
    );
}

#[tokio::test]
async fn test_remove_group_account_refetches_groups() {
    let mut h = harness(Vec::new());
    mount_and_settle(&mut h).await;

    let cmd = h
        .page
        .remove_group_account(GroupId(4), AccountId(9))
        .expect("removal dispatches");
    assert_eq!(
        h.actions.removals.lock().unwrap().as_slice(),
        [(GroupId(4), AccountId(9))]
    );

    let refetch = deliver(&mut h, cmd).await;
    assert!(refetch.is_some(), "successful removal refetches groups");
}

#[tokio::test]
async fn test_fetch_token_stores_token() {
    let mut h = harness(many(1));
    mount_and_settle(&mut h).await;

    let cmd = h.page.fetch_token(&svc(1, "Service 1"));
    deliver(&mut h, cmd).await;

    assert_eq!(h.page.token(), Some(&ServiceToken("tok-1".into())));
}
