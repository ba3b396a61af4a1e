//! Artifact generation errors
//!
//! A refused export is an `Err` here but carries the gate's blocking
//! messages so callers can report it without failing the process.

use cabinetkit_core::{ExportFormat, GateState};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CamToolError {
    /// Gate state or open errors forbid the format
    #[error("{format} export not permitted (requires {required}, current {current}): {}", .blocking.join("; "))]
    ExportNotPermitted {
        format: ExportFormat,
        required: GateState,
        current: GateState,
        blocking: Vec<String>,
    },

    #[error("Panel not found: {0}")]
    PanelNotFound(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Flushing a CSV buffer
    #[error("artifact buffer: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON artifact: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type CamToolResult<T> = Result<T, CamToolError>;
