use cabinetkit_core::{
    CabinetDimensions, CabinetStructure, DesignIntent, PanelEdge, SurfaceMaterial, SurfaceType,
};
use cabinetkit_designer::{MaterialStack, Workshop};
use proptest::prelude::*;

fn intent_strategy() -> impl Strategy<Value = DesignIntent> {
    (
        300.0f64..1200.0,
        500.0f64..2400.0,
        300.0f64..700.0,
        0.0f64..150.0,
        0u32..5,
        0u32..3,
        any::<bool>(),
        0u32..3,
    )
        .prop_map(
            |(width, height, depth, toe_kick, shelves, dividers, back, doors)| {
                let mut intent = DesignIntent::default();
                intent.dimensions = CabinetDimensions::new(width, height, depth, toe_kick);
                intent.structure = CabinetStructure {
                    shelf_count: shelves,
                    divider_count: dividers,
                    has_back_panel: back,
                    door_count: doors,
                    ..Default::default()
                };
                intent
            },
        )
}

fn with_surface(workshop: &mut Workshop, thickness: f64) {
    workshop
        .materials
        .surfaces
        .upsert(SurfaceMaterial {
            id: "test_face".to_string(),
            name: "Test Face".to_string(),
            surface_type: SurfaceType::Melamine,
            thickness,
            color: "white".to_string(),
            texture: None,
            cost_per_m2: 0.0,
            co2_per_m2: 0.0,
        })
        .unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn recompute_is_identical(intent in intent_strategy()) {
        let workshop = Workshop::standard();
        let first = workshop.compute(&intent);
        let second = workshop.compute(&intent);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cut_plus_bands_gives_finish(intent in intent_strategy()) {
        let workshop = Workshop::standard();
        let stack = MaterialStack::new(&workshop.materials, &workshop.config);
        for panel in workshop.compute(&intent).panels {
            let across = stack.band_thickness(&panel, PanelEdge::Left)
                + stack.band_thickness(&panel, PanelEdge::Right);
            let along = stack.band_thickness(&panel, PanelEdge::Bottom)
                + stack.band_thickness(&panel, PanelEdge::Top);
            prop_assert!((panel.computed.cut_width + across - panel.finish_width).abs() < 1e-6);
            prop_assert!((panel.computed.cut_height + along - panel.finish_height).abs() < 1e-6);
        }
    }

    #[test]
    fn thicker_faces_make_thicker_panels(
        intent in intent_strategy(),
        thin in 0.1f64..1.0,
        extra in 0.05f64..1.0,
    ) {
        let mut intent = intent;
        intent.materials.default_surface = "test_face".to_string();

        let mut workshop = Workshop::standard();
        with_surface(&mut workshop, thin);
        let before = workshop.compute(&intent).panels;
        with_surface(&mut workshop, thin + extra);
        let after = workshop.compute(&intent).panels;

        prop_assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            prop_assert_eq!(a.role, b.role);
            prop_assert_eq!(&a.id, &b.id);
            if a.faces.face_a.is_some() || a.faces.face_b.is_some() {
                prop_assert!(b.computed.real_thickness > a.computed.real_thickness);
            } else {
                prop_assert_eq!(b.computed.real_thickness, a.computed.real_thickness);
            }
        }
    }
}
