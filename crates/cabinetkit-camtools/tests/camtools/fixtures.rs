//! Hand-resolved panels of the reference cabinet
//!
//! 600 x 720 x 560, toe kick 100, one shelf, back panel, inset joints,
//! pb_18 with white melamine on both faces (18.6 mm), abs_1 front bands.

use cabinetkit_core::{
    Cabinet, CabinetPanel, DesignIntent, FittingAssignment, FittingRole, GateStatus,
    MaterialRegistries, PanelEdge, PanelEdges, PanelFaces, PanelRole, Placement, SafetyStatus,
    ValidationResult,
};
use cabinetkit_settings::ManufacturingConfig;
use uuid::Uuid;

pub const THICKNESS: f64 = 18.6;
pub const BACK_ALLOWANCE: f64 = 18.5;

fn panel(
    role: PanelRole,
    index: u32,
    finish: (f64, f64),
    banded: &[PanelEdge],
    placement: Placement,
) -> CabinetPanel {
    let mut panel = CabinetPanel::new(role, index, finish.0, finish.1);
    panel.core_material_id = "pb_18".to_string();
    panel.faces = PanelFaces::both("mel_white");
    panel.edges = PanelEdges::on(banded, "abs_1");
    panel.placement = placement;
    let band = |edge: PanelEdge| if banded.contains(&edge) { 1.0 } else { 0.0 };
    panel.computed.real_thickness = THICKNESS;
    panel.computed.cut_width = finish.0 - band(PanelEdge::Left) - band(PanelEdge::Right);
    panel.computed.cut_height = finish.1 - band(PanelEdge::Top) - band(PanelEdge::Bottom);
    panel.computed.surface_area = finish.0 * finish.1 / 1_000_000.0;
    panel.computed.weight_kg = panel.computed.surface_area * 11.52;
    panel
}

pub fn intent(door_count: u32) -> DesignIntent {
    let mut intent = DesignIntent::default();
    intent.structure.door_count = door_count;
    intent
}

pub fn panels(door_count: u32) -> Vec<CabinetPanel> {
    let body = 620.0;
    let inner = 600.0 - 2.0 * THICKNESS;
    let carcass_depth = 560.0 - BACK_ALLOWANCE;

    let mut back = CabinetPanel::new(PanelRole::Back, 1, 600.0, body);
    back.core_material_id = "hdf_8".to_string();
    back.placement = Placement::new(0.0, 0.0, 560.0 - 8.0);
    back.computed.real_thickness = 8.0;
    back.computed.cut_width = 600.0;
    back.computed.cut_height = body;

    let mut panels = vec![
        panel(
            PanelRole::LeftSide,
            1,
            (560.0, body),
            &[PanelEdge::Right],
            Placement::default(),
        ),
        panel(
            PanelRole::RightSide,
            1,
            (560.0, body),
            &[PanelEdge::Right],
            Placement::new(600.0 - THICKNESS, 0.0, 0.0),
        ),
        panel(
            PanelRole::Top,
            1,
            (inner, carcass_depth),
            &[PanelEdge::Bottom],
            Placement::new(THICKNESS, body - THICKNESS, 0.0),
        ),
        panel(
            PanelRole::Bottom,
            1,
            (inner, carcass_depth),
            &[PanelEdge::Bottom],
            Placement::new(THICKNESS, 0.0, 0.0),
        ),
        back,
        panel(
            PanelRole::Shelf,
            1,
            (inner - 2.0, 519.5),
            &[PanelEdge::Bottom],
            Placement::new(THICKNESS + 1.0, 310.0, 20.0),
        ),
    ];

    let door_width = (600.0 - f64::from(door_count + 1) * 2.0) / f64::from(door_count.max(1));
    for index in 1..=door_count {
        panels.push(panel(
            PanelRole::Door,
            index,
            (door_width, body - 4.0),
            PanelEdge::all(),
            Placement::new(2.0 + f64::from(index - 1) * (door_width + 2.0), 2.0, -THICKNESS),
        ));
    }
    panels
}

pub fn cabinet_with(door_count: u32, validation: Vec<ValidationResult>) -> Cabinet {
    let config = ManufacturingConfig::default();
    let materials = cabinetkit_core::init_standard_library();
    cabinet_from(door_count, validation, &materials, &config)
}

pub fn cabinet_from(
    door_count: u32,
    validation: Vec<ValidationResult>,
    materials: &MaterialRegistries,
    config: &ManufacturingConfig,
) -> Cabinet {
    let intent = intent(door_count);
    let panels = panels(door_count);
    let operations =
        cabinetkit_camtools::build_operation_graph(&intent, &panels, materials, config);
    let fittings = vec![FittingAssignment {
        fitting_id: "pin_5_steel".to_string(),
        panel_id: "shelf_1".to_string(),
        role: FittingRole::Bracket,
        status: SafetyStatus::Compatible,
        quantity: 4,
        automatic: true,
    }];
    Cabinet {
        id: Uuid::nil(),
        revision: 1,
        intent,
        panels,
        fittings,
        operations,
        validation,
        gate: GateStatus::new(),
    }
}

pub fn cabinet() -> Cabinet {
    cabinet_with(0, Vec::new())
}
