//! Error types for the tanktrack CLI
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for tanktrack operations
pub type Result<T> = std::result::Result<T, TanktrackError>;

/// Main error type for all tanktrack operations
#[derive(Debug, Error)]
pub enum TanktrackError {
    /// No .tanktrack directory found walking up from the working directory
    #[error("Data directory not found: {0}")]
    DataDirNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No tank with this id on the given level
    #[error("Tank not found: {id} on level {level}")]
    TankNotFound { level: String, id: String },

    /// Sub-tank index out of range, or tank is not grouped
    #[error("Sub-tank not found: {0}")]
    SubTankNotFound(String),

    /// Level key outside the closed set
    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    /// Stage name that is not part of the catalog
    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    /// Stage transition was refused
    #[error("State transition error: {0}")]
    StateTransition(String),

    /// Destructive operation attempted without confirmation
    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl TanktrackError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            TanktrackError::DataDirNotFound(_) => "DATA_DIR_NOT_FOUND",
            TanktrackError::InvalidJson(_) => "INVALID_JSON",
            TanktrackError::FileNotFound(_) => "FILE_NOT_FOUND",
            TanktrackError::ConfigError(_) => "CONFIG_ERROR",
            TanktrackError::TankNotFound { .. } => "TANK_NOT_FOUND",
            TanktrackError::SubTankNotFound(_) => "SUB_TANK_NOT_FOUND",
            TanktrackError::InvalidLevel(_) => "INVALID_LEVEL",
            TanktrackError::InvalidStage(_) => "INVALID_STAGE",
            TanktrackError::StateTransition(_) => "STATE_TRANSITION",
            TanktrackError::ConfirmationRequired(_) => "CONFIRMATION_REQUIRED",
            TanktrackError::Storage(_) => "STORAGE_ERROR",
            TanktrackError::Io(_) => "IO_ERROR",
            TanktrackError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        TanktrackError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &TanktrackError) -> i32 {
    match error {
        TanktrackError::ConfirmationRequired(_) => 2,
        TanktrackError::InvalidLevel(_) | TanktrackError::InvalidStage(_) => 64, // EX_USAGE
        _ => 1,
    }
}
