use crate::router::Router;

use voxmail_core::{Navigator, Route};

/// WHAT: Start route follows the restored identity
/// WHY: Signed-in users skip the login screen
#[test]
fn given_auth_state_when_creating_router_then_start_route_matches() {
    assert_eq!(Router::new(true).current(), &Route::Dashboard);
    assert_eq!(Router::new(false).current(), &Route::Login);
}

/// WHAT: Private routes redirect to login while signed out
/// WHY: Route guard
#[test]
fn given_signed_out_when_navigating_to_inbox_then_login() {
    let mut router = Router::new(false);

    router.navigate(Route::Inbox);

    assert_eq!(router.current(), &Route::Login);
}

/// WHAT: Public routes stay reachable while signed out
/// WHY: Unknown links still show not-found
#[test]
fn given_signed_out_when_navigating_to_not_found_then_allowed() {
    let mut router = Router::new(false);

    router.navigate(Route::NotFound);

    assert_eq!(router.current(), &Route::NotFound);
}

/// WHAT: Signing out on a private route bounces to login
/// WHY: No private screen stays visible after logout
#[test]
fn given_message_detail_when_signed_out_then_login() {
    let mut router = Router::new(true);
    router.navigate(Route::MessageDetail("1".to_string()));

    router.set_authenticated(false);

    assert_eq!(router.current(), &Route::Login);
}
