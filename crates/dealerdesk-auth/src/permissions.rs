use std::collections::BTreeMap;

use dealerdesk_core::Role;
use dealerdesk_core::config::DealerDeskConfig;

use crate::seed;
use crate::types::{PermissionEntry, RolePermissions};

pub const ORDER_VIEW_ALL: &str = "order.view.all";
pub const ORDER_VIEW_OWN: &str = "order.view.own";
pub const ORDER_CREATE: &str = "order.create";
pub const ORDER_UPDATE: &str = "order.update";
pub const ORDER_APPROVE: &str = "order.approve";
pub const ORDER_DELETE: &str = "order.delete";
pub const SHIPMENT_VIEW: &str = "shipment.view";
pub const SHIPMENT_CREATE: &str = "shipment.create";
pub const SHIPMENT_UPDATE: &str = "shipment.update";
pub const CLAIM_VIEW: &str = "claim.view";
pub const CLAIM_CREATE: &str = "claim.create";
pub const CLAIM_RESOLVE: &str = "claim.resolve";
pub const DOCUMENT_VIEW: &str = "document.view";
pub const DOCUMENT_UPLOAD: &str = "document.upload";
pub const DOCUMENT_DELETE: &str = "document.delete";
pub const TARGET_VIEW: &str = "target.view";
pub const TARGET_MANAGE: &str = "target.manage";
pub const DASHBOARD_VIEW: &str = "dashboard.view";
pub const REPORT_EXPORT: &str = "report.export";
pub const USER_VIEW: &str = "user.view";
pub const USER_MANAGE: &str = "user.manage";
pub const ROLE_MANAGE: &str = "role.manage";
pub const SETTINGS_VIEW: &str = "settings.view";
pub const SETTINGS_MANAGE: &str = "settings.manage";

pub const PERMISSIONS: &[(&str, &str)] = &[
    (ORDER_VIEW_ALL, "View every order"),
    (ORDER_VIEW_OWN, "View orders placed by or for the caller"),
    (ORDER_CREATE, "Place orders"),
    (ORDER_UPDATE, "Edit open orders"),
    (ORDER_APPROVE, "Approve or reject orders"),
    (ORDER_DELETE, "Delete orders"),
    (SHIPMENT_VIEW, "View shipments"),
    (SHIPMENT_CREATE, "Create shipments"),
    (SHIPMENT_UPDATE, "Update shipment status and tracking"),
    (CLAIM_VIEW, "View claims"),
    (CLAIM_CREATE, "File claims against orders"),
    (CLAIM_RESOLVE, "Resolve claims"),
    (DOCUMENT_VIEW, "View documents"),
    (DOCUMENT_UPLOAD, "Upload documents"),
    (DOCUMENT_DELETE, "Delete documents"),
    (TARGET_VIEW, "View sales targets"),
    (TARGET_MANAGE, "Set and edit sales targets"),
    (DASHBOARD_VIEW, "View dashboards"),
    (REPORT_EXPORT, "Export reports"),
    (USER_VIEW, "View user list"),
    (USER_MANAGE, "Create, update, and delete users"),
    (ROLE_MANAGE, "Change user roles"),
    (SETTINGS_VIEW, "View system settings"),
    (SETTINGS_MANAGE, "Modify system settings"),
];

/// Description of a catalogued permission.
pub fn describe(permission: &str) -> Option<&'static str> {
    PERMISSIONS
        .iter()
        .find(|(p, _)| *p == permission)
        .map(|(_, d)| *d)
}

/// Read-only role → permission table.
///
/// Built once at startup and shared with request handlers. Every [`Role`] has an
/// entry, possibly empty. Lookups match permission strings exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCatalog {
    table: BTreeMap<Role, Vec<String>>,
}

impl PermissionCatalog {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self::from_table(seed::builtin_table())
    }

    /// Build from an explicit table. Missing roles get an empty set, and repeated
    /// permissions within a role keep their first position.
    pub fn from_table(table: BTreeMap<Role, Vec<String>>) -> Self {
        let mut normalized = BTreeMap::new();
        for role in Role::ALL {
            normalized.insert(role, Vec::new());
        }
        for (role, permissions) in table {
            let entry: &mut Vec<String> = normalized.entry(role).or_default();
            for permission in permissions {
                if !entry.contains(&permission) {
                    entry.push(permission);
                }
            }
        }
        Self { table: normalized }
    }

    /// The configured `[roles]` table, or the built-in one when the config has none.
    pub fn from_config(config: &DealerDeskConfig) -> dealerdesk_core::Result<Self> {
        match config.role_table()? {
            Some(table) => {
                tracing::info!(roles = table.len(), "using configured role table");
                Ok(Self::from_table(table))
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Whether `role` (wire name) holds `permission`. Unknown roles hold nothing.
    pub fn has_permission(&self, role: &str, permission: &str) -> bool {
        Role::from_name(role).is_some_and(|r| self.has_role_permission(r, permission))
    }

    pub fn has_role_permission(&self, role: Role, permission: &str) -> bool {
        self.role_permissions(role).iter().any(|p| p == permission)
    }

    /// Permissions of `role` (wire name) in display order; empty for unknown roles.
    pub fn permissions_for(&self, role: &str) -> &[String] {
        match Role::from_name(role) {
            Some(r) => self.role_permissions(r),
            None => &[],
        }
    }

    pub fn role_permissions(&self, role: Role) -> &[String] {
        self.table.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Roles that hold `permission`.
    pub fn roles_with(&self, permission: &str) -> Vec<Role> {
        self.table
            .iter()
            .filter(|(_, perms)| perms.iter().any(|p| p == permission))
            .map(|(role, _)| *role)
            .collect()
    }

    /// Every distinct permission in the table, in first-seen order.
    pub fn all_permissions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for perms in self.table.values() {
            for p in perms {
                if !seen.contains(&p.as_str()) {
                    seen.push(p.as_str());
                }
            }
        }
        seen
    }

    pub fn roles(&self) -> impl Iterator<Item = (Role, &[String])> {
        self.table.iter().map(|(r, p)| (*r, p.as_slice()))
    }

    /// Display form of a role's permissions, with catalogue descriptions.
    pub fn describe_role(&self, role: Role) -> RolePermissions {
        RolePermissions {
            role,
            permissions: self
                .role_permissions(role)
                .iter()
                .map(|p| PermissionEntry {
                    permission: p.clone(),
                    description: describe(p).map(str::to_string),
                })
                .collect(),
        }
    }
}

impl Default for PermissionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
