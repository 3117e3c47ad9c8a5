//! End-to-end navigation through the point-of-sale catalog.

use std::cell::RefCell;
use std::time::Duration;

use route_guard::{
    pos_router, AccessOutcome, AccessTrail, Chrome, Decision, Error, GuardConfig, History,
    MemoryStorage, Navigator, Notice, NoticeLog, Notifier, Page, RedirectOptions, RedirectReason,
    ResolutionPolicy, Role, Router, Session, Severity,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn router() -> Router<Page> {
    init_tracing();
    pos_router(GuardConfig::default()).unwrap()
}

fn storage(token: Option<&str>, roles: &str) -> MemoryStorage {
    let storage = MemoryStorage::new();
    if let Some(token) = token {
        storage.set_item("token", token);
    }
    storage.set_item("roles", roles);
    storage
}

/// Records notices and redirects into one ordered log.
#[derive(Default)]
struct Timeline(RefCell<Vec<String>>);

impl Notifier for Timeline {
    fn notify(&self, notice: &Notice) {
        self.0.borrow_mut().push(format!("notice:{}", notice.title));
    }
}

impl Navigator for Timeline {
    fn redirect(&self, path: &str, options: RedirectOptions) {
        self.0.borrow_mut().push(format!("redirect:{}:{}", path, options.replace));
    }
}

#[test]
fn cashier_opens_the_till() {
    let router = router();
    let history = History::starting_at("/cashier");
    let notices = NoticeLog::new();
    let storage = storage(Some("t1"), r#"["ROLE_CASHIER"]"#);

    let session = router.stored_session(&storage);
    let decision = router.navigate("/cashier", &session, &history, &notices);

    match decision {
        Decision::Render { page, chrome, .. } => {
            assert_eq!(*page, Page::Cashier);
            assert_eq!(chrome, Chrome::Bare);
        }
        other => panic!("expected render, got {other:?}"),
    }
    assert!(notices.is_empty());
    assert_eq!(history.current().as_deref(), Some("/cashier"));
}

#[test]
fn anonymous_reports_visit_goes_to_login() {
    let router = router();
    let history = History::starting_at("/reports");
    let notices = NoticeLog::new();
    let storage = MemoryStorage::new();

    let session = router.stored_session(&storage);
    let decision = router.navigate("/reports", &session, &history, &notices);

    assert_eq!(decision.reason(), Some(RedirectReason::Unauthenticated));
    let notice = notices.last().unwrap();
    assert_eq!(notice.title, "Session Expired");
    assert_eq!(notice.message, "Please log in again.");
    assert_eq!(notice.severity, Severity::Warning);
    assert_eq!(notice.auto_dismiss, Duration::from_millis(2000));
    assert_eq!(history.current().as_deref(), Some("/login"));
    assert_eq!(history.len(), 1);
}

#[test]
fn cashier_is_refused_settings() {
    let router = router();
    let history = History::starting_at("/settings");
    let notices = NoticeLog::new();
    let storage = storage(Some("t2"), r#"["ROLE_CASHIER"]"#);

    let session = router.stored_session(&storage);
    let decision = router.navigate("/settings", &session, &history, &notices);

    assert_eq!(decision.reason(), Some(RedirectReason::Forbidden));
    let notice = notices.last().unwrap();
    assert_eq!(notice.title, "Access Denied");
    assert_eq!(notice.message, "You do not have permission to access this section.");
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(history.current().as_deref(), Some("/unauthorized"));
}

#[test]
fn supervisor_inventory_is_shadowed_under_first_match() {
    let router = router();
    let session = Session::new("t3", [Role::Supervisor]);

    let decision = router.decide("/inventory", &session);
    assert_eq!(decision.reason(), Some(RedirectReason::Forbidden));
    assert_eq!(decision.redirect_target(), Some("/unauthorized"));
}

#[test]
fn supervisor_inventory_is_allowed_when_merged() {
    init_tracing();
    let config = GuardConfig {
        resolution: ResolutionPolicy::Merge,
        ..GuardConfig::default()
    };
    let router = pos_router(config).unwrap();
    let session = Session::new("t3", [Role::Supervisor]);

    assert_eq!(router.decide("/inventory", &session).page(), Some(&Page::Inventory));
    // Admins keep their access after the merge
    let admin = Session::new("t5", [Role::Admin]);
    assert_eq!(router.decide("/inventory", &admin).page(), Some(&Page::Inventory));
}

#[test]
fn cashier_opens_a_sale() {
    let router = router();
    let session = Session::new("t4", [Role::Cashier]);

    match router.decide("/sales/42", &session) {
        Decision::Render { page, params, .. } => {
            assert_eq!(*page, Page::SaleDetail);
            assert_eq!(params.get("saleId"), Some("42"));
        }
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn sales_history_wins_over_sale_parameter() {
    let router = router();
    let session = Session::new("t4", [Role::Cashier]);
    assert_eq!(router.decide("/sales/history", &session).page(), Some(&Page::SalesHistory));
}

#[test]
fn unknown_path_falls_back_silently() {
    let router = router();
    let history = History::starting_at("/nonexistent");
    let notices = NoticeLog::new();
    let storage = storage(Some("t1"), r#"["ROLE_ADMIN"]"#);

    let session = router.stored_session(&storage);
    let decision = router.navigate("/nonexistent", &session, &history, &notices);

    assert_eq!(decision.reason(), Some(RedirectReason::NotFound));
    assert!(notices.is_empty());
    assert_eq!(history.current().as_deref(), Some("/"));
    assert_eq!(history.redirects(), vec![("/".to_string(), RedirectOptions::replace())]);
}

#[test]
fn notice_is_shown_before_the_redirect() {
    let router = router();
    let timeline = Timeline::default();
    let storage = storage(Some("t2"), r#"["ROLE_CASHIER"]"#);

    router.navigate("/reports", &router.stored_session(&storage), &timeline, &timeline);

    assert_eq!(
        *timeline.0.borrow(),
        vec!["notice:Access Denied".to_string(), "redirect:/unauthorized:true".to_string()]
    );
}

#[test]
fn malformed_roles_are_forbidden_not_fatal() {
    let router = router();
    let history = History::new();
    let notices = NoticeLog::new();

    for roles in ["{not json", r#""ROLE_ADMIN""#, "[1, 2]", r#"["ROLE_OWNER"]"#] {
        let storage = storage(Some("t9"), roles);
        let session = router.stored_session(&storage);
    let decision = router.navigate("/settings", &session, &history, &notices);
        assert_eq!(decision.reason(), Some(RedirectReason::Forbidden), "roles = {roles}");
    }
}

#[test]
fn empty_token_counts_as_logged_out() {
    let router = router();
    let history = History::new();
    let notices = NoticeLog::new();
    let storage = storage(Some(""), r#"["ROLE_ADMIN"]"#);

    let decision = router.navigate("/", &router.stored_session(&storage), &history, &notices);
    assert_eq!(decision.reason(), Some(RedirectReason::Unauthenticated));
}

#[test]
fn public_screens_need_no_session() {
    let router = router();
    for (path, page) in [
        ("/login", Page::Login),
        ("/redirect", Page::RoleRedirect),
        ("/unauthorized", Page::Unauthorized),
    ] {
        assert_eq!(router.decide(path, &Session::anonymous()).page(), Some(&page));
    }
}

#[test]
fn trail_follows_a_login_round_trip() {
    init_tracing();
    let router = pos_router(GuardConfig::default())
        .unwrap()
        .with_trail(AccessTrail::new());
    let history = History::starting_at("/reports");
    let notices = NoticeLog::new();
    let storage = MemoryStorage::new();

    router.navigate("/reports", &router.stored_session(&storage), &history, &notices);
    router.navigate("/login", &router.stored_session(&storage), &history, &notices);

    storage.set_item("token", "t1");
    storage.set_item("roles", r#"["ROLE_SUPERADMIN"]"#);
    router.navigate("/reports", &router.stored_session(&storage), &history, &notices);

    let trail = router.trail().unwrap();
    assert_eq!(
        trail.outcomes(),
        [AccessOutcome::Unauthenticated, AccessOutcome::Allowed, AccessOutcome::Allowed]
    );
    assert_eq!(trail.denials().len(), 1);
    assert_eq!(trail.denials()[0].target(), Some("/login"));
    assert_eq!(notices.len(), 1);
}

#[test]
fn invalid_config_is_rejected_before_building() {
    let config = GuardConfig {
        unauthorized_path: "unauthorized".to_string(),
        ..GuardConfig::default()
    };
    assert!(matches!(pos_router(config), Err(Error::Config(_))));
}
