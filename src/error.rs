// ABOUTME: Defines all error types for the warden library using thiserror.
// ABOUTME: Each concern has its own error enum, unified under WardenError.

/// Top-level error type for the warden library.
#[derive(Debug, thiserror::Error)]
pub enum WardenError {
    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from permission gates.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error("Permission '{permission}' required")]
    Denied { permission: String },
}

/// Errors from loading permission configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
