use super::*;

use std::rc::Rc;

use shared::domain::Role;

fn viewer_or_admin(user_id: &UserId) -> Vec<Role> {
    match user_id.as_str() {
        "user_admin" => default_roles(user_id),
        _ => vec![Role::new("viewer", "Viewer", "Read only", vec![Permission::Read])],
    }
}

#[test]
fn nobody_has_permissions_before_login() {
    let auth = AuthManager::new(viewer_or_admin);

    assert!(!auth.is_authenticated());
    assert_eq!(auth.current_user(), None);
    for permission in Permission::ALL {
        assert!(!auth.check_permission(permission));
    }
}

#[test]
fn permissions_follow_the_users_roles() {
    let auth = AuthManager::new(viewer_or_admin);

    auth.login("user_alice");
    assert!(auth.check_permission(Permission::Read));
    assert!(!auth.check_permission(Permission::ManageUsers));

    auth.login("user_admin");
    assert!(auth.check_permission(Permission::ManageUsers));
    assert!(auth.check_permission(Permission::ManageRoles));
    assert!(!auth.check_permission(Permission::Read));

    auth.logout();
    assert!(!auth.check_permission(Permission::ManageUsers));
}

#[test]
fn login_and_logout_notify_listeners() {
    let auth = AuthManager::new(viewer_or_admin);
    let auth_events = Rc::new(RefCell::new(Vec::new()));
    let permission_events = Rc::new(RefCell::new(Vec::new()));

    let _auth_sub = {
        let events = Rc::clone(&auth_events);
        auth.on_authentication_changed(move |signed_in| events.borrow_mut().push(*signed_in))
    };
    let _perm_sub = {
        let events = Rc::clone(&permission_events);
        auth.on_permission_changed(move |change| events.borrow_mut().push(*change))
    };

    auth.login("user_alice");
    assert_eq!(*auth_events.borrow(), vec![true]);
    {
        let events = permission_events.borrow();
        assert_eq!(events.len(), Permission::ALL.len());
        assert_eq!(events[0], (Permission::Read, true));
        assert!(events[1..].iter().all(|(_, granted)| !granted));
    }

    permission_events.borrow_mut().clear();
    auth.logout();
    assert_eq!(*auth_events.borrow(), vec![true, false]);
    assert!(permission_events
        .borrow()
        .iter()
        .all(|(_, granted)| !granted));
}

#[test]
fn guards_only_run_allowed_actions() {
    let auth = AuthManager::new(viewer_or_admin);

    assert_eq!(
        auth.require_authenticated(|| "ran"),
        Err(AuthError::NotAuthenticated)
    );

    auth.login("user_alice");
    assert_eq!(auth.require_authenticated(|| "ran"), Ok("ran"));
    assert_eq!(auth.require_permission(Permission::Read, || 1), Ok(1));
    assert_eq!(
        auth.require_permission(Permission::Delete, || 1),
        Err(AuthError::PermissionDenied(Permission::Delete))
    );
}

#[test]
fn guard_errors_map_to_user_facing_codes() {
    let denied: UserFacingError = AuthError::PermissionDenied(Permission::ManageSettings).into();
    assert_eq!(denied.code, ErrorCode::Forbidden);
    assert_eq!(denied.message, "missing permission 'manage_settings'");

    let anonymous: UserFacingError = AuthError::NotAuthenticated.into();
    assert_eq!(anonymous.code, ErrorCode::Unauthorized);
}
