use crate::fixtures;
use cabinetkit_camtools::{mirror_x, DxfGenerator};
use cabinetkit_core::{Face, MachineOperation, PanelEdge, PanelOperations, PanelRole};
use cabinetkit_settings::DxfSettings;
use dxf::entities::EntityType;
use dxf::Drawing;
use proptest::prelude::*;

fn load(document: &str) -> Drawing {
    let mut bytes = document.as_bytes();
    Drawing::load(&mut bytes).expect("emitted DXF must parse")
}

fn face_b_panel() -> PanelOperations {
    PanelOperations {
        panel_id: "right_side".to_string(),
        role: PanelRole::RightSide,
        width: 400.0,
        height: 700.0,
        thickness: 18.6,
        operations: vec![
            MachineOperation::DrillHorizontal {
                x: 50.0,
                y: 0.0,
                z: 9.3,
                diameter: 8.2,
                depth: 30.0,
                edge: PanelEdge::Bottom,
                face: Face::B,
            },
            MachineOperation::DrillVertical {
                x: 37.0,
                y: 82.6,
                diameter: 5.1,
                depth: 12.0,
                face: Face::A,
            },
        ],
    }
}

#[test]
fn test_face_b_horizontal_drill_parses_back_mirrored() {
    let document = DxfGenerator::default().panel_document(&face_b_panel());
    let drawing = load(&document);

    let mut lines = 0;
    let mut circles = 0;
    for entity in drawing.entities() {
        match &entity.specific {
            EntityType::Line(line) => {
                assert_eq!(entity.common.layer, "DRILL_H_8.2_Z9.3_D30");
                assert!((line.p1.x - 350.0).abs() < 1e-9);
                assert!((line.p1.y - 0.0).abs() < 1e-9);
                assert!((line.p2.y - 30.0).abs() < 1e-9);
                lines += 1;
            }
            EntityType::Circle(circle) => {
                assert_eq!(entity.common.layer, "DRILL_V_5.1_D12");
                assert!((circle.center.x - 37.0).abs() < 1e-9);
                assert!((circle.radius - 2.55).abs() < 1e-9);
                circles += 1;
            }
            _ => {}
        }
    }
    assert_eq!((lines, circles), (1, 1));
    assert!(document.contains("10\n350.000\n"));
}

#[test]
fn test_layer_table_lists_used_layers() {
    let document = DxfGenerator::default().panel_document(&face_b_panel());
    let drawing = load(&document);
    let mut layers: Vec<String> = drawing.layers().map(|l| l.name.clone()).collect();
    layers.sort();
    assert_eq!(
        layers,
        vec![
            "ANNOTATION",
            "CUT_OUT",
            "DRILL_H_8.2_Z9.3_D30",
            "DRILL_V_5.1_D12",
        ]
    );
}

#[test]
fn test_outline_and_annotation() {
    let document = DxfGenerator::default().panel_document(&face_b_panel());
    let drawing = load(&document);

    let outline = drawing
        .entities()
        .find_map(|e| match &e.specific {
            EntityType::Polyline(p) => Some(p.clone()),
            _ => None,
        })
        .expect("cut outline");
    let corners: Vec<(f64, f64)> = outline
        .vertices()
        .map(|v| (v.location.x, v.location.y))
        .collect();
    assert_eq!(
        corners,
        vec![(0.0, 0.0), (400.0, 0.0), (400.0, 700.0), (0.0, 700.0)]
    );
    assert!(outline.is_closed());

    let text = drawing
        .entities()
        .find_map(|e| match &e.specific {
            EntityType::Text(t) => Some(t.value.clone()),
            _ => None,
        })
        .expect("annotation");
    assert_eq!(text, "right_side 400 x 700 x 18.6");
}

#[test]
fn test_job_document_lays_out_panels() {
    let cabinet = fixtures::cabinet_with(1, Vec::new());
    let generator = DxfGenerator::new(DxfSettings {
        layout_gap: 100.0,
        text_height: 10.0,
    });
    let document = generator.job_document(&cabinet.operations);
    let drawing = load(&document);

    let origins: Vec<f64> = drawing
        .entities()
        .filter_map(|e| match &e.specific {
            EntityType::Polyline(p) => p.vertices().next().map(|v| v.location.x),
            _ => None,
        })
        .collect();
    assert_eq!(origins.len(), cabinet.panels.len());
    let mut expected = 0.0;
    for (origin, panel) in origins.iter().zip(&cabinet.operations.panels) {
        assert!((origin - expected).abs() < 1e-6);
        expected += panel.width + 100.0;
    }

    let cups = drawing
        .entities()
        .filter(|e| e.common.layer == "HINGE_CUP_35")
        .count();
    assert_eq!(cups, 2);
    assert!(drawing.entities().any(|e| e.common.layer == "SAW_GROOVE_D8"));
}

#[test]
fn test_identical_input_gives_identical_bytes() {
    let a = fixtures::cabinet_with(2, Vec::new());
    let b = fixtures::cabinet_with(2, Vec::new());
    let generator = DxfGenerator::default();
    assert_eq!(
        generator.job_document(&a.operations),
        generator.job_document(&b.operations)
    );
}

proptest! {
    #[test]
    fn prop_mirror_is_an_involution(x in 0.0f64..3000.0, width in 1.0f64..3000.0) {
        let twice = mirror_x(mirror_x(x, width), width);
        prop_assert!((twice - x).abs() < 1e-6);
    }

    #[test]
    fn prop_face_b_circle_is_mirrored_once(x in 0.0f64..400.0, y in 0.0f64..700.0) {
        let mut panel = face_b_panel();
        panel.operations = vec![MachineOperation::DrillVertical {
            x,
            y,
            diameter: 5.0,
            depth: 12.0,
            face: Face::B,
        }];
        let entities = DxfGenerator::default().panel_entities(&panel, 0.0);
        match &entities[1] {
            cabinetkit_camtools::DxfEntity::Circle { center, .. } => {
                prop_assert!((center.0 - (400.0 - x)).abs() < 1e-9);
                prop_assert_eq!(center.1, y);
            }
            other => prop_assert!(false, "unexpected entity {:?}", other),
        }
    }
}
