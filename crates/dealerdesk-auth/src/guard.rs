use crate::error::AuthError;
use crate::permissions::PermissionCatalog;
use crate::types::CurrentUser;

pub fn require_permission(
    catalog: &PermissionCatalog,
    user: &CurrentUser,
    permission: &str,
) -> Result<(), AuthError> {
    if catalog.has_permission(&user.role, permission) {
        Ok(())
    } else {
        tracing::debug!(user = %user.id, role = %user.role, permission, "permission denied");
        Err(AuthError::Forbidden(format!(
            "missing permission: {permission}"
        )))
    }
}

/// Passes when the caller holds at least one of `permissions`.
pub fn require_any_permission(
    catalog: &PermissionCatalog,
    user: &CurrentUser,
    permissions: &[&str],
) -> Result<(), AuthError> {
    if permissions
        .iter()
        .any(|p| catalog.has_permission(&user.role, p))
    {
        Ok(())
    } else {
        tracing::debug!(user = %user.id, role = %user.role, ?permissions, "permission denied");
        Err(AuthError::Forbidden(format!(
            "missing permission: one of {}",
            permissions.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{ORDER_VIEW_ALL, ORDER_VIEW_OWN, USER_MANAGE};

    #[test]
    fn allowed_role_passes() {
        let catalog = PermissionCatalog::builtin();
        let user = CurrentUser::new("u1", "Sam", "sales");
        assert!(require_permission(&catalog, &user, ORDER_VIEW_ALL).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let catalog = PermissionCatalog::builtin();
        let user = CurrentUser::new("u2", "Dee", "dealer");
        let err = require_permission(&catalog, &user, ORDER_VIEW_ALL).unwrap_err();
        assert!(matches!(err, AuthError::Forbidden(ref m) if m == "missing permission: order.view.all"));
    }

    #[test]
    fn unknown_role_is_forbidden() {
        let catalog = PermissionCatalog::builtin();
        let user = CurrentUser::new("u3", "Ghost", "superadmin");
        assert!(user.known_role().is_none());
        assert!(require_permission(&catalog, &user, ORDER_VIEW_OWN).is_err());
    }

    #[test]
    fn any_permission() {
        let catalog = PermissionCatalog::builtin();
        let dealer = CurrentUser::new("u4", "Dee", "dealer");
        assert!(require_any_permission(&catalog, &dealer, &[ORDER_VIEW_ALL, ORDER_VIEW_OWN]).is_ok());
        assert!(require_any_permission(&catalog, &dealer, &[USER_MANAGE]).is_err());
        assert!(require_any_permission(&catalog, &dealer, &[]).is_err());
    }
}
