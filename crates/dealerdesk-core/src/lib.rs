pub mod config;
pub mod error;
pub mod types;
pub mod validation;
pub mod window;

pub use error::{CoreError, Result};
pub use types::Role;
