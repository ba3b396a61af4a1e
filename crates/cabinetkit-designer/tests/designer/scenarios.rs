use cabinetkit_core::units::approx_eq;
use cabinetkit_core::{
    init_standard_library, CoreMaterial, DesignIntent, FittingRequest, FittingRole, MaterialCategory,
    PanelEdge, PanelEdges, PanelFaces, PanelOverride, PanelRole, Severity, SurfaceMaterial,
    SurfaceType, ValidationCategory,
};
use cabinetkit_designer::{apply, CabinetError, Intent, MaterialStack, Workshop};
use cabinetkit_settings::ManufacturingConfig;

#[test]
fn reference_cabinet_has_six_panels() {
    let workshop = Workshop::standard();
    let computation = workshop.compute(&DesignIntent::default());

    let mut roles: Vec<PanelRole> = computation.panels.iter().map(|p| p.role).collect();
    roles.sort();
    assert_eq!(
        roles,
        vec![
            PanelRole::LeftSide,
            PanelRole::RightSide,
            PanelRole::Top,
            PanelRole::Bottom,
            PanelRole::Back,
            PanelRole::Shelf,
        ]
    );
    assert!(computation.measures.internal_depth > 0.0);
    assert!(approx_eq(computation.measures.internal_depth, 560.0 - 18.5 - 20.0 - 2.0));

    let shelf = computation
        .panels
        .iter()
        .find(|p| p.role == PanelRole::Shelf)
        .unwrap();
    assert!(approx_eq(shelf.finish_height, computation.measures.internal_depth));
}

#[test]
fn stack_of_sixteen_core_and_thick_faces() {
    let mut materials = init_standard_library();
    materials
        .surfaces
        .upsert(SurfaceMaterial {
            id: "laminate_08".to_string(),
            name: "Laminate 0.8".to_string(),
            surface_type: SurfaceType::Hpl,
            thickness: 0.8,
            color: "grey".to_string(),
            texture: None,
            cost_per_m2: 0.0,
            co2_per_m2: 0.0,
        })
        .unwrap();
    let config = ManufacturingConfig::default();
    let stack = MaterialStack::new(&materials, &config);

    let mut panel = cabinetkit_core::CabinetPanel::new(PanelRole::Top, 1, 500.0, 400.0);
    panel.core_material_id = "pb_16".to_string();
    panel.faces = PanelFaces::both("laminate_08");
    assert!(stack.resolve(&mut panel).is_empty());
    assert!(approx_eq(panel.computed.real_thickness, 17.8));
}

#[test]
fn cut_width_deducts_both_bands() {
    let materials = init_standard_library();
    let config = ManufacturingConfig::default();
    let stack = MaterialStack::new(&materials, &config);

    let mut panel = cabinetkit_core::CabinetPanel::new(PanelRole::Shelf, 1, 500.0, 300.0);
    panel.core_material_id = "pb_18".to_string();
    panel.edges = PanelEdges::on(&[PanelEdge::Left, PanelEdge::Right], "abs_1");
    stack.resolve(&mut panel);
    assert!(approx_eq(panel.computed.cut_width, 498.0));
    assert!(approx_eq(panel.computed.cut_height, 300.0));
}

/// Workshop with a shelf core dense enough to make the default shelf weigh 12 kg
fn heavy_shelf_workshop() -> Workshop {
    let mut workshop = Workshop::standard();
    let area = workshop
        .compute(&DesignIntent::default())
        .panels
        .iter()
        .find(|p| p.role == PanelRole::Shelf)
        .map(|p| p.computed.surface_area)
        .unwrap();

    let mut heavy = CoreMaterial::new("heavy_18", "Ballast Board 18", 18.0);
    heavy.category = MaterialCategory::Particleboard;
    heavy.density_kg_m3 = 12.0 / (area * 0.018);
    workshop.materials.cores.upsert(heavy).unwrap();
    workshop
}

fn heavy_shelf_intent() -> DesignIntent {
    let mut intent = DesignIntent::default();
    intent.overrides.insert(
        "shelf_1".to_string(),
        PanelOverride {
            core: Some("heavy_18".to_string()),
            ..Default::default()
        },
    );
    intent.fittings.push(FittingRequest {
        fitting_id: "pin_5_plastic".to_string(),
        panel_id: "shelf_1".to_string(),
        role: FittingRole::Bracket,
        quantity: 4,
    });
    intent
}

#[test]
fn overloaded_shelf_blocks_freeze() {
    let workshop = heavy_shelf_workshop();
    let cabinet = workshop.create(heavy_shelf_intent());

    let shelf = cabinet.panel("shelf_1").unwrap();
    assert!((shelf.computed.weight_kg - 12.0).abs() < 1e-9);

    let safety_errors: Vec<_> = cabinet
        .validation
        .iter()
        .filter(|r| r.category == ValidationCategory::Safety && r.severity == Severity::Error)
        .collect();
    assert_eq!(safety_errors.len(), 1, "{:?}", cabinet.validation);
    assert_eq!(safety_errors[0].code, "overload");
    assert_eq!(safety_errors[0].panel_id.as_deref(), Some("shelf_1"));
    assert_eq!(cabinet.error_count(), 1);

    let err = apply(&cabinet, Intent::Freeze, &workshop).unwrap_err();
    assert!(matches!(err, CabinetError::Gate(_)));
}

#[test]
fn stronger_support_clears_the_overload() {
    let workshop = heavy_shelf_workshop();
    let cabinet = workshop.create(heavy_shelf_intent());
    let fixed = apply(
        &cabinet,
        Intent::AssignFitting(FittingRequest {
            fitting_id: "pin_5_steel".to_string(),
            panel_id: "shelf_1".to_string(),
            role: FittingRole::Bracket,
            quantity: 4,
        }),
        &workshop,
    )
    .unwrap();

    assert_eq!(fixed.error_count(), 0, "{:?}", fixed.validation);
    assert_eq!(fixed.intent.fittings.len(), 1);
    assert!(apply(&fixed, Intent::Freeze, &workshop).is_ok());
}

#[test]
fn runaway_shelf_count_is_reported_not_laid_out() {
    let workshop = Workshop::standard();
    let mut intent = DesignIntent::default();
    intent.structure.shelf_count = u32::MAX;
    let computation = workshop.compute(&intent);

    let shelves = computation
        .panels
        .iter()
        .filter(|p| p.role == PanelRole::Shelf)
        .count();
    assert_eq!(shelves, 40);
    let limit = computation
        .validation
        .iter()
        .find(|r| r.code == "shelf_count_exceeds_limit")
        .unwrap();
    assert_eq!(limit.severity, Severity::Error);
    assert!(limit.message.starts_with(&u32::MAX.to_string()));
}

#[test]
fn short_door_cannot_take_two_hinges() {
    let workshop = Workshop::standard();
    let mut intent = DesignIntent::default();
    intent.dimensions.height = 320.0;
    intent.dimensions.toe_kick_height = 150.0;
    intent.structure.shelf_count = 0;
    intent.structure.door_count = 1;
    let computation = workshop.compute(&intent);

    let door = computation
        .panels
        .iter()
        .find(|p| p.role == PanelRole::Door)
        .unwrap();
    assert!(approx_eq(door.finish_height, 166.0));

    let short: Vec<_> = computation
        .validation
        .iter()
        .filter(|r| r.code == "door_too_short_for_hinges")
        .collect();
    assert_eq!(short.len(), 1, "{:?}", computation.validation);
    assert_eq!(short[0].category, ValidationCategory::Structure);
    assert_eq!(short[0].panel_id.as_deref(), Some("door_1"));
    assert!(computation
        .operations
        .panel("door_1")
        .map_or(true, |p| p.operations.is_empty()));
}

#[test]
fn shelf_spacing_measures_the_clear_gap() {
    let workshop = Workshop::standard();
    let spacing_error = |shelves: u32| {
        let mut intent = DesignIntent::default();
        intent.structure.shelf_count = shelves;
        workshop
            .compute(&intent)
            .validation
            .into_iter()
            .find(|r| r.code == "shelf_spacing_too_small")
    };

    // 582.8 mm clear height: 4 shelves leave 98.0 mm gaps
    assert!(spacing_error(4).is_none());
    // 5 shelves pitch at 97.1 mm but leave only 78.5 mm between boards
    let err = spacing_error(5).unwrap();
    assert_eq!(err.message, "5 shelves leave a 78.5 mm clear gap, minimum is 80 mm");
}
