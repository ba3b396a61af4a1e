//! Release gate
//!
//! DRAFT -> FROZEN -> RELEASED state machine. Transitions are guarded by the
//! error count of the validation set they are asked against; the gate keeps
//! no validation state of its own, so it can never be checked against a
//! stale geometry snapshot.
//!
//! RELEASED is final: there is no transition out of it, and a released
//! design refuses further mutation.

use crate::data::validation::{error_count, ValidationResult};
use crate::error::GateError;
use serde::{Deserialize, Serialize};

/// Specification state of a design
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateState {
    /// Open for editing
    #[default]
    Draft,
    /// Geometry agreed, ready for machine data
    Frozen,
    /// Released for production
    Released,
}

impl GateState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Frozen => "FROZEN",
            Self::Released => "RELEASED",
        }
    }
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Artifacts a cabinet can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Cut list CSV
    CutList,
    /// Bill of materials
    Bom,
    /// Manifest JSON
    Manifest,
    /// DXF drawings with machine layers
    Dxf,
    /// Machine-neutral operation program
    CncProgram,
}

impl ExportFormat {
    /// Get all formats
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::CutList,
            ExportFormat::Bom,
            ExportFormat::Manifest,
            ExportFormat::Dxf,
            ExportFormat::CncProgram,
        ]
    }

    /// Lowest gate state the format may be produced in
    pub fn required_state(&self) -> GateState {
        match self {
            Self::CutList | Self::Bom => GateState::Draft,
            Self::Manifest | Self::Dxf => GateState::Frozen,
            Self::CncProgram => GateState::Released,
        }
    }

    /// File extension of the artifact
    pub fn extension(&self) -> &'static str {
        match self {
            Self::CutList | Self::Bom => "csv",
            Self::Manifest | Self::CncProgram => "json",
            Self::Dxf => "dxf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CutList => write!(f, "cut list"),
            Self::Bom => write!(f, "BOM"),
            Self::Manifest => write!(f, "manifest"),
            Self::Dxf => write!(f, "DXF"),
            Self::CncProgram => write!(f, "CNC program"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cutlist" | "cut_list" | "cut-list" => Ok(Self::CutList),
            "bom" => Ok(Self::Bom),
            "manifest" => Ok(Self::Manifest),
            "dxf" => Ok(Self::Dxf),
            "cnc" | "cnc_program" | "cnc-program" => Ok(Self::CncProgram),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Answer to an export permission query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPermission {
    pub format: ExportFormat,
    pub allowed: bool,
    pub required: GateState,
    pub current: GateState,
    /// Reasons the export is refused (empty when allowed)
    pub blocking: Vec<String>,
}

/// Whether `format` may be exported in `state` given the current validation set
///
/// Formats that require FROZEN or later are also refused while any
/// error-severity result exists, since a frozen design may have been edited
/// into an invalid state.
pub fn can_export(
    format: ExportFormat,
    state: GateState,
    validation: &[ValidationResult],
) -> ExportPermission {
    let required = format.required_state();
    let mut blocking = Vec::new();

    if state < required {
        blocking.push(format!(
            "{} export requires {} (current: {})",
            format, required, state
        ));
    }
    if required >= GateState::Frozen {
        blocking.extend(
            validation
                .iter()
                .filter(|r| r.is_error())
                .map(|r| r.to_string()),
        );
    }

    ExportPermission {
        format,
        allowed: blocking.is_empty(),
        required,
        current: state,
        blocking,
    }
}

/// Gate state of a cabinet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GateStatus {
    pub spec_state: GateState,
}

impl GateStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.spec_state
    }

    /// Whether design intent may still change
    pub fn accepts_mutations(&self) -> bool {
        self.spec_state != GateState::Released
    }

    /// DRAFT -> FROZEN, allowed when the validation set has no errors
    pub fn freeze(&self, validation: &[ValidationResult]) -> Result<GateStatus, GateError> {
        match self.spec_state {
            GateState::Draft => {
                Self::check_errors(GateState::Frozen, validation)?;
                Ok(Self::to(GateState::Frozen))
            }
            from => Err(GateError::InvalidTransition {
                from,
                to: GateState::Frozen,
                reason: "only a draft can be frozen".to_string(),
            }),
        }
    }

    /// FROZEN -> RELEASED, allowed when still frozen and error free
    pub fn release(&self, validation: &[ValidationResult]) -> Result<GateStatus, GateError> {
        match self.spec_state {
            GateState::Frozen => {
                Self::check_errors(GateState::Released, validation)?;
                Ok(Self::to(GateState::Released))
            }
            from => Err(GateError::InvalidTransition {
                from,
                to: GateState::Released,
                reason: "only a frozen design can be released".to_string(),
            }),
        }
    }

    /// FROZEN -> DRAFT, always allowed from FROZEN
    pub fn unfreeze(&self) -> Result<GateStatus, GateError> {
        match self.spec_state {
            GateState::Frozen => Ok(Self::to(GateState::Draft)),
            GateState::Released => Err(GateError::InvalidTransition {
                from: GateState::Released,
                to: GateState::Draft,
                reason: "released designs are final".to_string(),
            }),
            GateState::Draft => Err(GateError::InvalidTransition {
                from: GateState::Draft,
                to: GateState::Draft,
                reason: "design is not frozen".to_string(),
            }),
        }
    }

    /// Export permission in the current state
    pub fn can_export(
        &self,
        format: ExportFormat,
        validation: &[ValidationResult],
    ) -> ExportPermission {
        can_export(format, self.spec_state, validation)
    }

    fn to(state: GateState) -> GateStatus {
        GateStatus { spec_state: state }
    }

    fn check_errors(to: GateState, validation: &[ValidationResult]) -> Result<(), GateError> {
        let errors = error_count(validation);
        if errors > 0 {
            return Err(GateError::BlockedByValidation {
                to,
                error_count: errors,
            });
        }
        Ok(())
    }
}
