// ABOUTME: Defines PermissionConfig - server-side permission assignment settings.
// ABOUTME: Loaded from JSON; seeds new players and the local host bypass.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::names;
use super::{Identity, PermissionStore};
use crate::error::ConfigError;

/// Permission settings for a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PermissionConfig {
    /// Permissions granted to every player when they connect.
    pub default_permissions: Vec<String>,

    /// Whether the local host (if any) bypasses all checks.
    pub local_bypass: bool,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            default_permissions: vec![names::CHAT.to_string()],
            local_bypass: true,
        }
    }
}

impl PermissionConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Check the config for entries that can never take effect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for permission in &self.default_permissions {
            if names::is_no_permission(permission) {
                return Err(ConfigError::Invalid(
                    "defaultPermissions contains an empty permission name".to_string(),
                ));
            }
            if !names::is_well_known(permission) {
                tracing::debug!(permission, "custom default permission");
            }
        }
        Ok(())
    }
}

impl<I: Identity> PermissionStore<I> {
    /// Create a store from a config.
    ///
    /// `local` is only honoured when the config enables the local bypass.
    /// The config's default permissions are kept for [`PermissionStore::on_connect`].
    pub fn from_config(config: &PermissionConfig, local: Option<I>) -> Self {
        let store = match local {
            Some(local) if config.local_bypass => Self::with_local_identity(local),
            _ => Self::new(),
        };
        store.with_default_permissions(config.default_permissions.iter().cloned())
    }
}
