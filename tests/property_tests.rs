//! Property tests over the point-of-sale catalog.
//!
//! These check the gate's classification for every declared route and
//! arbitrary sessions, and that unmatched paths never fail.

use proptest::prelude::*;
use route_guard::{
    pos_router, Access, AccessEvent, AccessOutcome, GuardConfig, Page, RedirectReason, Role,
    RoleSet, Router, Session,
};

fn router() -> Router<Page> {
    pos_router(GuardConfig::default()).unwrap()
}

// Strategy: any subset of the four roles
fn arb_roles() -> impl Strategy<Value = RoleSet> {
    prop::sample::subsequence(Role::ALL.to_vec(), 0..=4).prop_map(RoleSet::from_iter)
}

// Strategy: a session with or without a token
fn arb_session() -> impl Strategy<Value = Session> {
    (
        prop::option::of(prop::string::string_regex("[a-z0-9]{1,12}").unwrap()),
        arb_roles(),
    )
        .prop_map(|(token, roles)| match token {
            Some(token) => Session::new(token, roles),
            None => Session {
                token: None,
                roles,
            },
        })
}

// Strategy: the path of a declared route, with parameters filled in
fn arb_catalog_path() -> impl Strategy<Value = String> {
    let patterns: Vec<String> = router()
        .table()
        .entries()
        .iter()
        .map(|e| e.pattern.as_str().to_string())
        .collect();
    (prop::sample::select(patterns), "[0-9]{1,6}")
        .prop_map(|(pattern, id)| pattern.replace(":saleId", &id))
}

proptest! {
    /// Property: every declared route classifies exactly as its access rule says
    #[test]
    fn proptest_catalog_routes_follow_their_access(
        path in arb_catalog_path(),
        session in arb_session()
    ) {
        let router = router();
        let access = router.table().resolve(&path).unwrap().entry.access.clone();
        let decision = router.decide(&path, &session);

        match access {
            Access::Public => prop_assert!(decision.page().is_some()),
            _ if session.token.is_none() => {
                prop_assert_eq!(decision.reason(), Some(RedirectReason::Unauthenticated));
                prop_assert_eq!(decision.redirect_target(), Some("/login"));
            }
            Access::AnyOf(required) if !required.intersects(&session.roles) => {
                prop_assert_eq!(decision.reason(), Some(RedirectReason::Forbidden));
                prop_assert_eq!(decision.redirect_target(), Some("/unauthorized"));
            }
            _ => prop_assert!(decision.page().is_some()),
        }
    }

    /// Property: the same session and path always give the same decision
    #[test]
    fn proptest_decisions_are_idempotent(
        path in arb_catalog_path(),
        session in arb_session()
    ) {
        let router = router();
        prop_assert_eq!(router.decide(&path, &session), router.decide(&path, &session));
    }

    /// Property: unmatched paths redirect to the fallback and never carry a notice
    #[test]
    fn proptest_unmatched_paths_fall_back(
        tail in "[a-z]{1,10}(/[a-z0-9]{1,6}){0,3}",
        session in arb_session()
    ) {
        let router = router();
        let path = format!("/zz-{}", tail);
        let decision = router.decide(&path, &session);

        prop_assert_eq!(decision.reason(), Some(RedirectReason::NotFound));
        prop_assert_eq!(decision.redirect_target(), Some("/"));
        prop_assert!(decision.notice().is_none());
    }

    /// Property: denial notices accompany exactly the gate's redirects
    #[test]
    fn proptest_notices_only_on_denial(
        path in arb_catalog_path(),
        session in arb_session()
    ) {
        let router = router();
        let decision = router.decide(&path, &session);
        let denied = matches!(
            decision.reason(),
            Some(RedirectReason::Unauthenticated | RedirectReason::Forbidden)
        );
        prop_assert_eq!(decision.notice().is_some(), denied);
    }

    /// Property: access event output never includes the session token
    #[test]
    fn proptest_access_events_never_leak_tokens(
        token in "tok-[a-z0-9]{10,20}",
        roles in arb_roles(),
        outcome in prop_oneof![
            Just(AccessOutcome::Allowed),
            Just(AccessOutcome::Unauthenticated),
            Just(AccessOutcome::Forbidden),
            Just(AccessOutcome::NotFound),
        ]
    ) {
        let session = Session::new(token.clone(), roles);
        let event = AccessEvent::new(1, "/reports", outcome).with_roles(session.roles.clone());

        prop_assert!(!event.to_string().contains(&token));
        let event_debug = format!("{:?}", event);
        let session_debug = format!("{:?}", session);
        prop_assert!(!event_debug.contains(&token));
        prop_assert!(!session_debug.contains(&token));
    }
}
