//! Error types for the designer crate.
//!
//! Problems with the design itself are validation results; these errors
//! cover refused intents and broken inputs (files, registries, catalogues).

use cabinetkit_core::{GateError, MaterialError};
use cabinetkit_hardware::HardwareError;
use cabinetkit_settings::SettingsError;
use thiserror::Error;

/// Errors that can occur while applying design intents.
#[derive(Error, Debug)]
pub enum CabinetError {
    /// The gate refused a transition or mutation.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// A material registry could not be built.
    #[error(transparent)]
    Material(#[from] MaterialError),

    /// The manufacturing configuration is invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The hardware catalogue could not be loaded.
    #[error(transparent)]
    Hardware(#[from] HardwareError),

    /// Core I/O or serialization failure.
    #[error(transparent)]
    Core(#[from] cabinetkit_core::Error),

    /// The intent itself is malformed (not a design problem).
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),
}

impl CabinetError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidIntent(msg.into())
    }

    /// Whether the gate refused the request
    pub fn is_gate_error(&self) -> bool {
        matches!(self, Self::Gate(_))
    }
}

/// Result type alias for designer operations.
pub type CabinetResult<T> = Result<T, CabinetError>;
