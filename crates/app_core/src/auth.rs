//! Session state and permission checks for the signed-in user.
//!
//! Roles come from a caller-supplied provider so the manager stays agnostic
//! of where they are stored. Like the theme engine it lives on the UI thread
//! and is shared by `Rc`.

use std::cell::RefCell;

use shared::{
    domain::{has_permission, Permission, Role, UserId},
    error::{ErrorCode, UserFacingError},
    Signal, Subscription,
};
use thiserror::Error;
use tracing::{debug, info};

pub type RoleProvider = Box<dyn Fn(&UserId) -> Vec<Role>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("not signed in")]
    NotAuthenticated,
    #[error("missing permission '{}'", .0.as_str())]
    PermissionDenied(Permission),
}

impl From<AuthError> for UserFacingError {
    fn from(value: AuthError) -> Self {
        let code = match value {
            AuthError::NotAuthenticated => ErrorCode::Unauthorized,
            AuthError::PermissionDenied(_) => ErrorCode::Forbidden,
        };
        UserFacingError::new(code, value.to_string())
    }
}

pub struct AuthManager {
    roles_for_user: RoleProvider,
    current_user: RefCell<Option<UserId>>,
    authentication_changed: Signal<bool>,
    permission_changed: Signal<(Permission, bool)>,
}

impl AuthManager {
    pub fn new(roles_for_user: impl Fn(&UserId) -> Vec<Role> + 'static) -> Self {
        Self {
            roles_for_user: Box::new(roles_for_user),
            current_user: RefCell::new(None),
            authentication_changed: Signal::new(),
            permission_changed: Signal::new(),
        }
    }

    pub fn login(&self, user_id: impl Into<UserId>) {
        let user_id = user_id.into();
        info!(user = %user_id, "user signed in");
        *self.current_user.borrow_mut() = Some(user_id);
        self.authentication_changed.emit(&true);
        self.emit_permission_changes();
    }

    pub fn logout(&self) {
        if let Some(user_id) = self.current_user.borrow_mut().take() {
            info!(user = %user_id, "user signed out");
        }
        self.authentication_changed.emit(&false);
        self.emit_permission_changes();
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.borrow().is_some()
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.current_user.borrow().clone()
    }

    pub fn check_permission(&self, permission: Permission) -> bool {
        let Some(user_id) = self.current_user() else {
            return false;
        };
        has_permission(&(self.roles_for_user)(&user_id), permission)
    }

    /// Runs `action` only for a signed-in user.
    pub fn require_authenticated<T>(&self, action: impl FnOnce() -> T) -> Result<T, AuthError> {
        if !self.is_authenticated() {
            debug!("rejected unauthenticated action");
            return Err(AuthError::NotAuthenticated);
        }
        Ok(action())
    }

    /// Runs `action` only when the current user holds `permission`.
    pub fn require_permission<T>(
        &self,
        permission: Permission,
        action: impl FnOnce() -> T,
    ) -> Result<T, AuthError> {
        if !self.check_permission(permission) {
            debug!(permission = permission.as_str(), "rejected action");
            return Err(AuthError::PermissionDenied(permission));
        }
        Ok(action())
    }

    pub fn on_authentication_changed(
        &self,
        callback: impl Fn(&bool) + 'static,
    ) -> Subscription {
        self.authentication_changed.connect(callback)
    }

    pub fn on_permission_changed(
        &self,
        callback: impl Fn(&(Permission, bool)) + 'static,
    ) -> Subscription {
        self.permission_changed.connect(callback)
    }

    fn emit_permission_changes(&self) {
        for permission in Permission::ALL {
            let granted = self.check_permission(permission);
            self.permission_changed.emit(&(permission, granted));
        }
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("current_user", &self.current_user.borrow())
            .finish_non_exhaustive()
    }
}

/// Stand-in provider until roles are backed by storage: everyone is admin.
pub fn default_roles(_user_id: &UserId) -> Vec<Role> {
    vec![Role::new(
        "admin-role",
        "Admin",
        "System administrator",
        vec![Permission::ManageUsers, Permission::ManageRoles],
    )]
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
