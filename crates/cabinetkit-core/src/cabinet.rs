//! The Cabinet aggregate
//!
//! A `Cabinet` is an immutable snapshot: design intent plus everything
//! derived from it. Each accepted intent produces a new snapshot through the
//! designer's reducer; nothing in here is updated in place.

use crate::data::{
    error_count, CabinetPanel, DesignIntent, FittingAssignment, OperationGraph, PanelRole,
    Severity, ValidationResult, ValidationSummary,
};
use crate::gate::{ExportFormat, ExportPermission, GateStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fully computed cabinet snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cabinet {
    /// Document id, fixed for the lifetime of the design
    pub id: Uuid,
    /// Incremented on every accepted intent
    pub revision: u64,
    pub intent: DesignIntent,
    pub panels: Vec<CabinetPanel>,
    pub fittings: Vec<FittingAssignment>,
    pub operations: OperationGraph,
    pub validation: Vec<ValidationResult>,
    pub gate: GateStatus,
}

impl Cabinet {
    /// Panel by id
    pub fn panel(&self, panel_id: &str) -> Option<&CabinetPanel> {
        self.panels.iter().find(|p| p.id == panel_id)
    }

    /// Panels with the given role, in decomposition order
    pub fn panels_with_role(&self, role: PanelRole) -> impl Iterator<Item = &CabinetPanel> {
        self.panels.iter().filter(move |p| p.role == role)
    }

    /// Fittings attached to a panel
    pub fn fittings_for(&self, panel_id: &str) -> impl Iterator<Item = &FittingAssignment> + '_ {
        let panel_id = panel_id.to_string();
        self.fittings.iter().filter(move |f| f.panel_id == panel_id)
    }

    pub fn error_count(&self) -> usize {
        error_count(&self.validation)
    }

    pub fn warning_count(&self) -> usize {
        self.validation
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .count()
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary::from_results(&self.validation)
    }

    /// Export permission for this snapshot
    pub fn can_export(&self, format: ExportFormat) -> ExportPermission {
        self.gate.can_export(format, &self.validation)
    }
}
