//! Fitting assignment
//!
//! Requested fittings are checked for physical fit against their panel;
//! load is left to the structural check so an overload is reported once.
//! Shelves and doors without hardware get the top-ranked candidate when
//! auto-assignment is enabled.

use cabinetkit_core::{
    CabinetPanel, DesignIntent, FittingAssignment, FittingRequest, FittingRole, PanelRole,
    SafetyStatus, ValidationCategory, ValidationResult,
};
use cabinetkit_hardware::{evaluate, rank, FittingContext, HardwareCatalogue};
use cabinetkit_settings::ManufacturingConfig;

/// Assignments and the findings made while resolving them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FittingResolution {
    pub assignments: Vec<FittingAssignment>,
    pub results: Vec<ValidationResult>,
}

pub struct FittingResolver<'a> {
    catalogue: &'a HardwareCatalogue,
    config: &'a ManufacturingConfig,
}

impl<'a> FittingResolver<'a> {
    pub fn new(catalogue: &'a HardwareCatalogue, config: &'a ManufacturingConfig) -> Self {
        Self { catalogue, config }
    }

    pub fn resolve(&self, intent: &DesignIntent, panels: &[CabinetPanel]) -> FittingResolution {
        let mut resolution = FittingResolution::default();

        for request in &intent.fittings {
            self.explicit(request, panels, &mut resolution);
        }
        if self.config.fittings.auto_assign {
            for panel in panels {
                if let Some(role) = auto_role(panel.role) {
                    let covered = resolution
                        .assignments
                        .iter()
                        .any(|a| a.panel_id == panel.id && a.role == role);
                    if !covered {
                        self.automatic(panel, role, &mut resolution);
                    }
                }
            }
        }

        tracing::debug!(
            "Resolved {} fitting assignments ({} findings)",
            resolution.assignments.len(),
            resolution.results.len()
        );
        resolution
    }

    fn explicit(
        &self,
        request: &FittingRequest,
        panels: &[CabinetPanel],
        resolution: &mut FittingResolution,
    ) {
        let Some(panel) = panels.iter().find(|p| p.id == request.panel_id) else {
            resolution.results.push(ValidationResult::error(
                ValidationCategory::Safety,
                "fitting_panel_missing",
                format!(
                    "{} assigned to {}, which is not part of the cabinet",
                    request.fitting_id, request.panel_id
                ),
            ));
            return;
        };
        let fitting = match self.catalogue.get(&request.fitting_id) {
            Ok(fitting) => fitting,
            Err(err) => {
                resolution.results.push(
                    ValidationResult::error(
                        ValidationCategory::Safety,
                        "unknown_fitting",
                        err.to_string(),
                    )
                    .with_panel(&panel.id),
                );
                return;
            }
        };

        // fit only; load is the structural check's job
        let context = FittingContext::new(request.role, panel.computed.real_thickness, 0.0);
        let evaluation = evaluate(fitting, &context);
        match evaluation.status {
            SafetyStatus::Incompatible => {
                let reasons: Vec<String> =
                    evaluation.reasons.iter().map(|r| r.to_string()).collect();
                resolution.results.push(
                    ValidationResult::error(
                        ValidationCategory::Safety,
                        "fitting_incompatible",
                        format!("{} {}", fitting.id, reasons.join(", ")),
                    )
                    .with_panel(&panel.id),
                );
            }
            SafetyStatus::LowConfidence => resolution
                .results
                .push(low_confidence(&fitting.id, &panel.id)),
            SafetyStatus::Compatible => {}
        }

        let quantity = if request.quantity > 0 {
            request.quantity
        } else {
            self.default_quantity(panel, request.role)
        };
        resolution.assignments.push(FittingAssignment {
            fitting_id: fitting.id.clone(),
            panel_id: panel.id.clone(),
            role: request.role,
            status: evaluation.status,
            quantity,
            automatic: false,
        });
    }

    fn automatic(&self, panel: &CabinetPanel, role: FittingRole, resolution: &mut FittingResolution) {
        let load = panel.computed.weight_kg + self.config.structural.content_load_kg;
        let context = FittingContext::new(role, panel.computed.real_thickness, load);
        let ranking = rank(self.catalogue, &context);

        match ranking.ranked.first() {
            Some(best) => {
                if best.status == SafetyStatus::LowConfidence {
                    resolution
                        .results
                        .push(low_confidence(&best.fitting_id, &panel.id));
                }
                resolution.assignments.push(FittingAssignment {
                    fitting_id: best.fitting_id.clone(),
                    panel_id: panel.id.clone(),
                    role,
                    status: best.status,
                    quantity: self.default_quantity(panel, role),
                    automatic: true,
                });
            }
            None => resolution.results.push(
                ValidationResult::warning(
                    ValidationCategory::Safety,
                    "no_fitting_candidate",
                    format!(
                        "no {} in the catalogue fits a {:.1} mm panel carrying {:.1} kg ({} rejected)",
                        role,
                        panel.computed.real_thickness,
                        load,
                        ranking.rejected.len()
                    ),
                )
                .with_panel(&panel.id),
            ),
        }
    }

    fn default_quantity(&self, panel: &CabinetPanel, role: FittingRole) -> u32 {
        match role {
            FittingRole::Bracket => self.config.fittings.supports_per_shelf,
            FittingRole::Hinge => self.config.hinge.hinge_count(panel.finish_height) as u32,
            FittingRole::Rail => 2,
        }
    }
}

/// Hardware a panel receives automatically
fn auto_role(role: PanelRole) -> Option<FittingRole> {
    match role {
        PanelRole::Shelf => Some(FittingRole::Bracket),
        PanelRole::Door => Some(FittingRole::Hinge),
        PanelRole::LeftSide
        | PanelRole::RightSide
        | PanelRole::Top
        | PanelRole::Bottom
        | PanelRole::Back
        | PanelRole::Divider => None,
    }
}

fn low_confidence(fitting_id: &str, panel_id: &str) -> ValidationResult {
    ValidationResult::warning(
        ValidationCategory::Safety,
        "fitting_low_confidence",
        format!("{} is compatible by declared values only", fitting_id),
    )
    .with_panel(panel_id)
}
