// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use warden::prelude::*;` to get started quickly.

pub use crate::error::{ConfigError, PermissionError, WardenError};
pub use crate::permission::names;
pub use crate::permission::{Identity, PermissionConfig, PermissionStore};
