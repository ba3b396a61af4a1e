//! Dimension, structure and machine validation
//!
//! Validators never stop the pipeline. Each returns the findings for its
//! category and the gate decides what they block.

use crate::decomposer::CarcassMeasures;
use cabinetkit_core::units::EPSILON_MM;
use cabinetkit_core::{
    CabinetDimensions, CabinetPanel, DesignIntent, PanelRole, ValidationCategory,
    ValidationResult,
};
use cabinetkit_settings::{DimensionBounds, ManufacturingConfig, MachineEnvelope, Range};

fn out_of_range(name: &str, value: f64, range: &Range) -> Option<ValidationResult> {
    if value.is_finite() && range.contains(value) {
        return None;
    }
    Some(ValidationResult::error(
        ValidationCategory::Dimension,
        format!("{}_out_of_range", name),
        format!(
            "{} {} mm outside {}..{} mm",
            name.replace('_', " "),
            value,
            range.min,
            range.max
        ),
    ))
}

/// Outer dimensions against the configured bounds
pub fn validate_dimensions(
    dims: &CabinetDimensions,
    bounds: &DimensionBounds,
) -> Vec<ValidationResult> {
    let mut results: Vec<ValidationResult> = [
        out_of_range("width", dims.width, &bounds.width),
        out_of_range("height", dims.height, &bounds.height),
        out_of_range("depth", dims.depth, &bounds.depth),
        out_of_range("toe_kick", dims.toe_kick_height, &bounds.toe_kick),
    ]
    .into_iter()
    .flatten()
    .collect();

    if dims.toe_kick_height >= dims.height {
        results.push(ValidationResult::error(
            ValidationCategory::Dimension,
            "toe_kick_exceeds_height",
            format!(
                "toe kick {} mm leaves no body in a {} mm cabinet",
                dims.toe_kick_height, dims.height
            ),
        ));
    }
    results
}

/// Spacing, depth and placement collisions
pub fn validate_structure(
    intent: &DesignIntent,
    panels: &[CabinetPanel],
    measures: &CarcassMeasures,
    config: &ManufacturingConfig,
) -> Vec<ValidationResult> {
    let structure = &intent.structure;
    let bounds = &config.bounds;
    let mut results = Vec::new();

    if measures.internal_depth <= 0.0 {
        results.push(ValidationResult::error(
            ValidationCategory::Structure,
            "internal_depth_non_positive",
            format!(
                "internal depth {:.1} mm: back allowance {:.1} mm and setbacks leave no room",
                measures.internal_depth, measures.back_allowance
            ),
        ));
    }

    if measures.shelf_count > 0 && measures.shelf_gap < bounds.min_shelf_spacing {
        results.push(ValidationResult::error(
            ValidationCategory::Structure,
            "shelf_spacing_too_small",
            format!(
                "{} shelves leave a {:.1} mm clear gap, minimum is {} mm",
                structure.shelf_count, measures.shelf_gap, bounds.min_shelf_spacing
            ),
        ));
    }

    for (what, requested) in [
        ("shelf", structure.shelf_count),
        ("divider", structure.divider_count),
    ] {
        let limit = config.machine.clamp_count(requested);
        if requested > limit {
            results.push(ValidationResult::error(
                ValidationCategory::Structure,
                format!("{}_count_exceeds_limit", what),
                format!("{} {}s requested, at most {} are laid out", requested, what, limit),
            ));
        }
    }

    if measures.divider_count > 0 && measures.compartment_width < bounds.min_compartment_width {
        results.push(ValidationResult::error(
            ValidationCategory::Structure,
            "compartment_too_narrow",
            format!(
                "{} dividers leave {:.1} mm compartments, minimum is {} mm",
                structure.divider_count, measures.compartment_width, bounds.min_compartment_width
            ),
        ));
    }

    if structure.door_count > config.doors.max_doors {
        results.push(ValidationResult::error(
            ValidationCategory::Structure,
            "too_many_doors",
            format!(
                "{} doors requested, at most {} supported",
                structure.door_count, config.doors.max_doors
            ),
        ));
    }

    let bottom_thickness = thickness_of(panels, PanelRole::Bottom);
    let top_limit = measures.body_height - thickness_of(panels, PanelRole::Top);
    for shelf in panels.iter().filter(|p| p.role == PanelRole::Shelf) {
        let low = shelf.placement.y;
        let high = low + shelf.computed.real_thickness;
        if low < bottom_thickness - EPSILON_MM || high > top_limit + EPSILON_MM {
            results.push(
                ValidationResult::error(
                    ValidationCategory::Structure,
                    "shelf_position_out_of_range",
                    format!(
                        "shelf at {:.1} mm is outside the clear height {:.1}..{:.1} mm",
                        low, bottom_thickness, top_limit
                    ),
                )
                .with_panel(&shelf.id),
            );
        }
    }

    let hinge = &config.hinge;
    for door in panels.iter().filter(|p| p.role == PanelRole::Door) {
        if door.finish_height > 0.0 && !hinge.fits(door.finish_height) {
            results.push(
                ValidationResult::error(
                    ValidationCategory::Structure,
                    "door_too_short_for_hinges",
                    format!(
                        "{:.1} mm door is shorter than the {:.1} mm two hinge cups need",
                        door.finish_height,
                        hinge.min_door_height()
                    ),
                )
                .with_panel(&door.id),
            );
        }
    }

    for panel in panels {
        if panel.finish_width <= 0.0 || panel.finish_height <= 0.0 {
            results.push(
                ValidationResult::error(
                    ValidationCategory::Structure,
                    "degenerate_panel",
                    format!(
                        "panel is {:.1} x {:.1} mm",
                        panel.finish_width, panel.finish_height
                    ),
                )
                .with_panel(&panel.id),
            );
        }
    }

    for panel_id in intent.overrides.keys() {
        if !panels.iter().any(|p| &p.id == panel_id) {
            results.push(ValidationResult::warning(
                ValidationCategory::Structure,
                "unknown_panel_override",
                format!("override for {} matches no panel", panel_id),
            ));
        }
    }

    results
}

fn thickness_of(panels: &[CabinetPanel], role: PanelRole) -> f64 {
    panels
        .iter()
        .find(|p| p.role == role)
        .map(|p| p.computed.real_thickness)
        .unwrap_or(0.0)
}

/// Panel count and sizes against the machine envelope
pub fn validate_machine(
    panels: &[CabinetPanel],
    envelope: &MachineEnvelope,
) -> Vec<ValidationResult> {
    let mut results = Vec::new();

    if panels.len() > envelope.max_panel_count {
        results.push(ValidationResult::error(
            ValidationCategory::Machine,
            "too_many_panels",
            format!(
                "{} panels exceed the job limit of {}",
                panels.len(),
                envelope.max_panel_count
            ),
        ));
    }

    for panel in panels {
        let (w, h) = (panel.computed.cut_width, panel.computed.cut_height);
        let (long, short) = if w >= h { (w, h) } else { (h, w) };

        if long > envelope.max_panel_length || short > envelope.max_panel_width {
            results.push(
                ValidationResult::error(
                    ValidationCategory::Machine,
                    "panel_exceeds_envelope",
                    format!(
                        "cut size {:.1} x {:.1} mm exceeds {} x {} mm",
                        w, h, envelope.max_panel_length, envelope.max_panel_width
                    ),
                )
                .with_panel(&panel.id),
            );
        }
        if panel.computed.real_thickness > envelope.max_thickness {
            results.push(
                ValidationResult::error(
                    ValidationCategory::Machine,
                    "panel_too_thick",
                    format!(
                        "{:.1} mm thick, machine takes {} mm",
                        panel.computed.real_thickness, envelope.max_thickness
                    ),
                )
                .with_panel(&panel.id),
            );
        }
        if short > 0.0 && short < envelope.min_panel_side {
            results.push(
                ValidationResult::warning(
                    ValidationCategory::Machine,
                    "panel_below_minimum",
                    format!(
                        "{:.1} mm side is below the {} mm the machine can hold",
                        short, envelope.min_panel_side
                    ),
                )
                .with_panel(&panel.id),
            );
        }
    }

    results
}
