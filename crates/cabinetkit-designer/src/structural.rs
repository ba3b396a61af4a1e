//! Load check for panels resting on hardware

use cabinetkit_core::{
    CabinetPanel, FittingAssignment, ValidationCategory, ValidationResult,
};
use cabinetkit_hardware::HardwareCatalogue;
use cabinetkit_settings::StructuralSettings;

/// Load against capacity for one panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadCase {
    pub load_kg: f64,
    pub capacity_kg: f64,
}

impl LoadCase {
    pub fn ratio(&self) -> f64 {
        if self.capacity_kg <= 0.0 {
            f64::INFINITY
        } else {
            self.load_kg / self.capacity_kg
        }
    }
}

/// Load case of a panel, `None` when it carries no hardware
///
/// Capacity is the set rating of each assignment on the panel, independent
/// of its piece count; unknown fittings contribute nothing.
pub fn load_case(
    panel: &CabinetPanel,
    assignments: &[FittingAssignment],
    catalogue: &HardwareCatalogue,
    settings: &StructuralSettings,
) -> Option<LoadCase> {
    let mut attached = assignments.iter().filter(|a| a.panel_id == panel.id).peekable();
    attached.peek()?;

    let capacity_kg = attached
        .filter_map(|a| catalogue.get(&a.fitting_id).ok())
        .map(|f| f.load_capacity_kg)
        .sum();
    Some(LoadCase {
        load_kg: panel.computed.weight_kg + settings.content_load_kg,
        capacity_kg,
    })
}

/// Compare every load-bearing panel's load with its hardware capacity
pub fn check_structure(
    panels: &[CabinetPanel],
    assignments: &[FittingAssignment],
    catalogue: &HardwareCatalogue,
    settings: &StructuralSettings,
) -> Vec<ValidationResult> {
    let mut results = Vec::new();

    for panel in panels.iter().filter(|p| p.role.is_load_bearing()) {
        let Some(case) = load_case(panel, assignments, catalogue, settings) else {
            continue;
        };
        let ratio = case.ratio();
        let message = format!(
            "load {:.2} kg on {:.2} kg rated hardware ({:.0}%)",
            case.load_kg,
            case.capacity_kg,
            ratio * 100.0
        );

        if ratio > settings.error_ratio {
            results.push(
                ValidationResult::error(ValidationCategory::Safety, "overload", message)
                    .with_panel(&panel.id),
            );
        } else if ratio > settings.warning_ratio {
            results.push(
                ValidationResult::warning(ValidationCategory::Safety, "near_capacity", message)
                    .with_panel(&panel.id),
            );
        }
    }

    tracing::debug!("Structural check produced {} findings", results.len());
    results
}
