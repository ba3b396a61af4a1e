use crate::fixtures;
use cabinetkit_camtools::{build_operation_graph, hinged_left, MAX_ROW_HOLES};
use cabinetkit_core::units::approx_eq;
use cabinetkit_core::{init_standard_library, Face, MachineOperation, PanelEdge, PanelRole};
use cabinetkit_settings::ManufacturingConfig;

fn pins(ops: &[MachineOperation]) -> Vec<(f64, f64, Face)> {
    ops.iter()
        .filter_map(|op| match op {
            MachineOperation::DrillVertical {
                x, y, diameter, face, ..
            } if approx_eq(*diameter, 5.1) => Some((*x, *y, *face)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_left_side_layout() {
    let cabinet = fixtures::cabinet();
    let side = cabinet.operations.panel("left_side").unwrap();
    assert!(approx_eq(side.width, 559.0));
    assert!(approx_eq(side.height, 620.0));
    assert!(approx_eq(side.thickness, 18.6));

    match &side.operations[0] {
        MachineOperation::Groove {
            x_start,
            x_end,
            y_start,
            y_end,
            width,
            depth,
            face,
        } => {
            assert!(approx_eq(*x_start, 14.5));
            assert!(approx_eq(*x_end, 14.5));
            assert_eq!(*y_start, 0.0);
            assert!(approx_eq(*y_end, 620.0));
            assert!(approx_eq(*width, 8.5));
            assert_eq!(*depth, 8.0);
            assert_eq!(*face, Face::A);
        }
        other => panic!("expected groove first, got {:?}", other),
    }

    // 15 heights from 82.6 to 530.6 in two rows
    let pins = pins(&side.operations);
    assert_eq!(pins.len(), 30);
    assert!(pins.iter().all(|(_, _, face)| *face == Face::A));
    assert!(approx_eq(pins[0].0, 523.0));
    assert!(approx_eq(pins[0].1, 82.6));
    assert!(approx_eq(pins[14].1, 530.6));
    assert!(approx_eq(pins[15].0, 55.5));
}

#[test]
fn test_right_side_uses_face_b_in_same_frame() {
    let cabinet = fixtures::cabinet();
    let left = cabinet.operations.panel("left_side").unwrap();
    let right = cabinet.operations.panel("right_side").unwrap();
    assert_eq!(left.operations.len(), right.operations.len());
    for (a, b) in left.operations.iter().zip(&right.operations) {
        assert_eq!(a.face(), Face::A);
        assert_eq!(b.face(), Face::B);
        assert_eq!(a.label(), b.label());
        assert_eq!(a.depth(), b.depth());
    }
}

#[test]
fn test_inset_joint_dowels_line_up() {
    let cabinet = fixtures::cabinet();
    let side = cabinet.operations.panel("left_side").unwrap();
    let side_dowels: Vec<(f64, f64)> = side
        .operations
        .iter()
        .filter_map(|op| match op {
            MachineOperation::DrillVertical { x, y, diameter, .. } if approx_eq(*diameter, 8.2) => {
                Some((*x, *y))
            }
            _ => None,
        })
        .collect();
    assert_eq!(side_dowels.len(), 4);
    assert!(approx_eq(side_dowels[0].0, 55.5));
    assert!(approx_eq(side_dowels[0].1, 9.3));
    assert!(approx_eq(side_dowels[1].0, 523.0));
    assert!(approx_eq(side_dowels[2].1, 610.7));

    let bottom = cabinet.operations.panel("bottom").unwrap();
    let edges: Vec<(PanelEdge, f64, f64, f64)> = bottom
        .operations
        .iter()
        .filter_map(|op| match op {
            MachineOperation::DrillHorizontal { x, y, z, edge, .. } => Some((*edge, *x, *y, *z)),
            _ => None,
        })
        .collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[0].0, PanelEdge::Left);
    assert_eq!(edges[0].1, 0.0);
    // front band of 1 mm shifts the cut frame
    assert!(approx_eq(edges[0].2, 36.0));
    assert!(approx_eq(edges[0].3, 9.3));
    assert_eq!(edges[2].0, PanelEdge::Right);
    assert!(approx_eq(edges[2].1, bottom.width));

    // bottom rows measured from the back match the side dowel positions
    let depth = 541.5;
    assert!(approx_eq(18.5 + depth - (edges[0].2 + 1.0), 523.0));
    assert!(approx_eq(18.5 + depth - (edges[1].2 + 1.0), 55.5));
}

#[test]
fn test_overlay_joint_swaps_drilling_direction() {
    let materials = init_standard_library();
    let config = ManufacturingConfig::default();
    let mut intent = fixtures::intent(0);
    intent.structure.bottom_joint = cabinetkit_core::JointType::Overlay;
    let panels = fixtures::panels(0);
    let graph = build_operation_graph(&intent, &panels, &materials, &config);

    let side = graph.panel("left_side").unwrap();
    let horizontal: Vec<&MachineOperation> = side
        .operations
        .iter()
        .filter(|op| matches!(op, MachineOperation::DrillHorizontal { .. }))
        .collect();
    assert_eq!(horizontal.len(), 2);
    match horizontal[0] {
        MachineOperation::DrillHorizontal { y, edge, z, .. } => {
            assert_eq!(*edge, PanelEdge::Bottom);
            assert_eq!(*y, 0.0);
            assert!(approx_eq(*z, 9.3));
        }
        _ => unreachable!(),
    }

    let bottom = graph.panel("bottom").unwrap();
    assert_eq!(bottom.operations.len(), 4);
    assert!(bottom
        .operations
        .iter()
        .all(|op| matches!(op, MachineOperation::DrillVertical { .. })));
}

#[test]
fn test_no_pins_without_shelves() {
    let materials = init_standard_library();
    let config = ManufacturingConfig::default();
    let mut intent = fixtures::intent(0);
    intent.structure.shelf_count = 0;
    let panels: Vec<_> = fixtures::panels(0)
        .into_iter()
        .filter(|p| p.role != PanelRole::Shelf)
        .collect();
    let graph = build_operation_graph(&intent, &panels, &materials, &config);
    let side = graph.panel("left_side").unwrap();
    assert!(pins(&side.operations).is_empty());
    assert_eq!(side.operations.len(), 5);
}

#[test]
fn test_hinge_cups_and_plates() {
    let cabinet = fixtures::cabinet_with(1, Vec::new());
    let door = cabinet.operations.panel("door_1").unwrap();
    assert_eq!(door.operations.len(), 2);
    match &door.operations[0] {
        MachineOperation::Pocket {
            x,
            y,
            diameter,
            depth,
            face,
        } => {
            assert!(approx_eq(*x, 21.5));
            assert!(approx_eq(*y, 99.0));
            assert_eq!(*diameter, 35.0);
            assert!(approx_eq(*depth, 13.5));
            assert_eq!(*face, Face::B);
        }
        other => panic!("expected pocket, got {:?}", other),
    }

    let plates: Vec<(f64, f64)> = cabinet
        .operations
        .panel("left_side")
        .unwrap()
        .operations
        .iter()
        .filter_map(|op| match op {
            MachineOperation::DrillVertical { x, y, diameter, .. } if *diameter == 5.0 => {
                Some((*x, *y))
            }
            _ => None,
        })
        .collect();
    assert_eq!(plates, vec![(523.0, 86.0), (523.0, 118.0), (523.0, 502.0), (523.0, 534.0)]);

    let right_plates = cabinet
        .operations
        .panel("right_side")
        .unwrap()
        .operations
        .iter()
        .filter(|op| matches!(op, MachineOperation::DrillVertical { diameter, .. } if *diameter == 5.0))
        .count();
    assert_eq!(right_plates, 0);
}

#[test]
fn test_second_door_hinges_right() {
    assert!(hinged_left(1, 1));
    assert!(hinged_left(1, 2));
    assert!(!hinged_left(2, 2));

    let cabinet = fixtures::cabinet_with(2, Vec::new());
    let door = cabinet.operations.panel("door_2").unwrap();
    match &door.operations[0] {
        MachineOperation::Pocket { x, .. } => {
            // 297 wide finish, 1 mm band on the left
            assert!(approx_eq(*x, 297.0 - 22.5 - 1.0));
        }
        other => panic!("expected pocket, got {:?}", other),
    }
}

#[test]
fn test_graph_is_deterministic() {
    let a = fixtures::cabinet_with(2, Vec::new());
    let b = fixtures::cabinet_with(2, Vec::new());
    assert_eq!(a.operations, b.operations);
    assert_eq!(a.operations.panels.len(), a.panels.len());
}

#[test]
fn test_short_door_gets_no_hinge_layout() {
    let materials = init_standard_library();
    let config = ManufacturingConfig::default();
    let intent = fixtures::intent(1);
    let mut panels = fixtures::panels(1);
    let door = panels.iter_mut().find(|p| p.role == PanelRole::Door).unwrap();
    door.finish_height = 166.0;
    door.computed.cut_height = 164.0;

    let graph = build_operation_graph(&intent, &panels, &materials, &config);
    assert!(graph.panel("door_1").unwrap().operations.is_empty());
    let plates = graph
        .panel("left_side")
        .unwrap()
        .operations
        .iter()
        .filter(|op| matches!(op, MachineOperation::DrillVertical { diameter, .. } if *diameter == 5.0))
        .count();
    assert_eq!(plates, 0);
}

#[test]
fn test_pin_rows_stay_bounded_for_runaway_height() {
    let materials = init_standard_library();
    let config = ManufacturingConfig::default();
    let mut intent = fixtures::intent(0);
    intent.dimensions.height = 1.0e10;
    let graph = build_operation_graph(&intent, &fixtures::panels(0), &materials, &config);

    let side = graph.panel("left_side").unwrap();
    assert_eq!(pins(&side.operations).len(), 2 * MAX_ROW_HOLES);
}
