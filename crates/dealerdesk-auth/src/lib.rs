pub mod error;
pub mod guard;
pub mod permissions;
pub mod seed;
pub mod types;

pub use error::AuthError;
pub use guard::{require_any_permission, require_permission};
pub use permissions::{PERMISSIONS, PermissionCatalog};
pub use types::*;
