//! Material stack resolver
//!
//! Core, bonded surfaces and glue lines give a panel its real thickness;
//! edge bands turn finish sizes into cut sizes. Every formula works on
//! plain millimetre values, so repeated recomputation gives identical
//! results.

use cabinetkit_core::units::{area_m2, mm_to_m};
use cabinetkit_core::{
    CabinetPanel, ComputedFields, CoreMaterial, EdgeMaterial, MaterialRegistries, PanelEdge,
    RegistryPolicy, Resolution, SurfaceMaterial, ValidationCategory, ValidationResult,
};
use cabinetkit_settings::{ManufacturingConfig, SetbackSettings};

/// Core plus each bonded surface and its glue line
///
/// A face without a covering contributes neither surface nor glue.
pub fn total_thickness(
    core: f64,
    surface_a: Option<f64>,
    surface_b: Option<f64>,
    glue: f64,
) -> f64 {
    [surface_a, surface_b]
        .into_iter()
        .flatten()
        .fold(core, |total, surface| total + surface + glue)
}

/// Finish size minus the bands on both ends of the axis
pub fn cut_dimension(finish: f64, band_start: f64, band_end: f64) -> f64 {
    finish - band_start - band_end
}

/// Usable depth for shelves and dividers
///
/// Not clamped: a non-positive result is reported by structure validation.
pub fn internal_depth(depth: f64, back_allowance: f64, setbacks: &SetbackSettings) -> f64 {
    depth - back_allowance - setbacks.front - setbacks.back
}

/// Resolves panel materials against the registries
pub struct MaterialStack<'a> {
    materials: &'a MaterialRegistries,
    policy: RegistryPolicy,
    glue: f64,
}

impl<'a> MaterialStack<'a> {
    pub fn new(materials: &'a MaterialRegistries, config: &ManufacturingConfig) -> Self {
        Self {
            materials,
            policy: config.stack.registry_policy,
            glue: config.stack.glue_thickness,
        }
    }

    pub fn core(&self, id: &str) -> Resolution<'a, CoreMaterial> {
        self.materials.cores.resolve(id, self.policy)
    }

    pub fn surface(&self, id: &str) -> Resolution<'a, SurfaceMaterial> {
        self.materials.surfaces.resolve(id, self.policy)
    }

    pub fn edge(&self, id: &str) -> Resolution<'a, EdgeMaterial> {
        self.materials.edges.resolve(id, self.policy)
    }

    /// Real thickness of a panel from its current material ids
    pub fn real_thickness(&self, panel: &CabinetPanel) -> f64 {
        let surface = |id: &Option<String>| id.as_deref().map(|id| self.surface(id).record.thickness);
        total_thickness(
            self.core(&panel.core_material_id).record.thickness,
            surface(&panel.faces.face_a),
            surface(&panel.faces.face_b),
            self.glue,
        )
    }

    /// Band thickness on one edge, zero when unbanded
    pub fn band_thickness(&self, panel: &CabinetPanel, edge: PanelEdge) -> f64 {
        panel
            .edges
            .get(edge)
            .map(|id| self.edge(id).record.thickness)
            .unwrap_or(0.0)
    }

    /// Fill in the computed fields and report unresolved or unsuitable materials
    pub fn resolve(&self, panel: &mut CabinetPanel) -> Vec<ValidationResult> {
        let mut issues = Vec::new();
        let panel_id = panel.id.clone();

        let core = self.core(&panel.core_material_id);
        issues.extend(core.issue(Some(panel_id.as_str())));
        for id in [&panel.faces.face_a, &panel.faces.face_b].into_iter().flatten() {
            issues.extend(self.surface(id).issue(Some(panel_id.as_str())));
        }

        let real_thickness = self.real_thickness(panel);
        let mut edge_length = 0.0;
        for (edge, id) in panel.edges.banded() {
            let band = self.edge(id);
            issues.extend(band.issue(Some(panel_id.as_str())));
            if band.is_exact() && band.record.height < real_thickness {
                issues.push(
                    ValidationResult::warning(
                        ValidationCategory::Material,
                        "edge_band_too_narrow",
                        format!(
                            "{} band {} is {} mm high, panel is {:.1} mm thick",
                            edge, band.record.id, band.record.height, real_thickness
                        ),
                    )
                    .with_panel(&panel_id),
                );
            }
            edge_length += if edge.runs_along_width() {
                mm_to_m(panel.finish_width)
            } else {
                mm_to_m(panel.finish_height)
            };
        }

        let surface_area = area_m2(panel.finish_width, panel.finish_height);
        panel.computed = ComputedFields {
            real_thickness,
            cut_width: cut_dimension(
                panel.finish_width,
                self.band_thickness(panel, PanelEdge::Left),
                self.band_thickness(panel, PanelEdge::Right),
            ),
            cut_height: cut_dimension(
                panel.finish_height,
                self.band_thickness(panel, PanelEdge::Bottom),
                self.band_thickness(panel, PanelEdge::Top),
            ),
            surface_area,
            edge_length,
            weight_kg: surface_area * core.record.areal_density_kg_m2(),
        };
        issues
    }
}
