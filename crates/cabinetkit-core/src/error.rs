//! Error handling for CabinetKit
//!
//! Only programmer errors and refused state transitions are `Err` values.
//! Problems with a design itself (out-of-range dimensions, overloaded
//! shelves, unknown material ids in user input) are reported as
//! [`ValidationResult`](crate::data::ValidationResult)s so that the pipeline
//! always produces an inspectable cabinet.
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::data::MaterialKind;
use crate::gate::GateState;
use thiserror::Error;

/// Material registry error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// The id is not present in the registry
    #[error("Unknown {kind} material: {id}")]
    UnknownMaterial {
        /// Which registry was searched.
        kind: MaterialKind,
        /// The id that could not be resolved.
        id: String,
    },

    /// The registry fallback id does not name a registered record
    #[error("Fallback {kind} material {id} is not registered")]
    MissingFallback {
        /// Which registry was being built.
        kind: MaterialKind,
        /// The missing fallback id.
        id: String,
    },

    /// Two records share one id
    #[error("Duplicate {kind} material: {id}")]
    Duplicate {
        /// Which registry was being built.
        kind: MaterialKind,
        /// The duplicated id.
        id: String,
    },

    /// A record carries a non-physical value
    #[error("Invalid {kind} material {id}: {reason}")]
    InvalidRecord {
        /// Which registry was being built.
        kind: MaterialKind,
        /// The offending record.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Gate error type
///
/// Represents a refused transition of the DRAFT/FROZEN/RELEASED gate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    /// The transition is not part of the gate lifecycle
    #[error("Invalid gate transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current state.
        from: GateState,
        /// The requested state.
        to: GateState,
        /// Why the lifecycle forbids it.
        reason: String,
    },

    /// The transition is part of the lifecycle but error-severity results block it
    #[error("Transition to {to} blocked by {error_count} validation error(s)")]
    BlockedByValidation {
        /// The requested state.
        to: GateState,
        /// Number of blocking error-severity results.
        error_count: usize,
    },

    /// The design was released and can no longer change
    #[error("Design is released and can no longer be modified")]
    Released,
}

/// Main error type for CabinetKit core
#[derive(Error, Debug)]
pub enum Error {
    /// Material registry error
    #[error(transparent)]
    Material(#[from] MaterialError),

    /// Gate error
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a material registry error
    pub fn is_material_error(&self) -> bool {
        matches!(self, Error::Material(_))
    }

    /// Check if this is a gate error
    pub fn is_gate_error(&self) -> bool {
        matches!(self, Error::Gate(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
