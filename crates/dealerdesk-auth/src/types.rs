use serde::{Deserialize, Serialize};

pub use dealerdesk_core::Role;

/// The authenticated caller as handed to request handlers.
///
/// `role` is kept as the raw wire name from the user record so that a record
/// carrying a retired or misspelt role simply resolves to no permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
        }
    }

    /// Typed role, if the wire name is recognised.
    pub fn known_role(&self) -> Option<Role> {
        Role::from_name(&self.role)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionEntry {
    pub permission: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolePermissions {
    pub role: Role,
    pub permissions: Vec<PermissionEntry>,
}
