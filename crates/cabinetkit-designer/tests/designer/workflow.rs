use cabinetkit_camtools::{export, CamToolError, ExportContext};
use cabinetkit_core::{CabinetStructure, DesignIntent, ExportFormat, FittingRole, PanelRole};
use cabinetkit_designer::{apply, apply_all, Intent, Workshop};

fn two_door_intent() -> DesignIntent {
    let mut intent = DesignIntent::default();
    intent.structure = CabinetStructure {
        shelf_count: 2,
        door_count: 2,
        ..Default::default()
    };
    intent
}

#[test]
fn doors_get_hinges_and_cups() {
    let workshop = Workshop::standard();
    let cabinet = workshop.create(two_door_intent());
    assert_eq!(cabinet.error_count(), 0, "{:?}", cabinet.validation);

    let doors: Vec<_> = cabinet.panels_with_role(PanelRole::Door).collect();
    assert_eq!(doors.len(), 2);
    for door in &doors {
        let hinges: Vec<_> = cabinet
            .fittings_for(&door.id)
            .filter(|f| f.role == FittingRole::Hinge)
            .collect();
        assert_eq!(hinges.len(), 1);
        assert_eq!(hinges[0].fitting_id, "hinge_clip_110");
        assert_eq!(hinges[0].quantity, 2);

        let ops = cabinet.operations.panel(&door.id).unwrap();
        assert_eq!(ops.operations.len(), 2);
    }
    assert_eq!(cabinet.panels_with_role(PanelRole::Shelf).count(), 2);
}

#[test]
fn exports_follow_the_gate() {
    let workshop = Workshop::standard();
    let ctx = ExportContext::new(&workshop.materials, &workshop.catalogue)
        .with_dxf(workshop.config.dxf.clone());
    let draft = workshop.create(two_door_intent());

    let cut_list = export(&draft, ExportFormat::CutList, &ctx).unwrap();
    assert_eq!(cut_list[0].file_name, "cut_list.csv");
    assert!(cut_list[0].content.contains("door_2"));
    assert!(matches!(
        export(&draft, ExportFormat::Dxf, &ctx),
        Err(CamToolError::ExportNotPermitted { .. })
    ));

    let frozen = apply(&draft, Intent::Freeze, &workshop).unwrap();
    let dxf = export(&frozen, ExportFormat::Dxf, &ctx).unwrap();
    assert_eq!(dxf.len(), 1 + frozen.panels.len());
    let job = &dxf[0].content;
    for layer in ["CUT_OUT", "HINGE_CUP_35", "ANNOTATION", "SAW_GROOVE_D8"] {
        assert!(job.contains(layer), "missing layer {layer}");
    }
    assert!(job.contains("DRILL_V_5.1_D12"));
    assert!(export(&frozen, ExportFormat::CncProgram, &ctx).is_err());

    let released = apply(&frozen, Intent::Release, &workshop).unwrap();
    let program = export(&released, ExportFormat::CncProgram, &ctx).unwrap();
    let json: serde_json::Value = serde_json::from_str(&program[0].content).unwrap();
    assert_eq!(json["revision"], 0);
    assert_eq!(json["units"], "mm");
}

#[test]
fn intents_replay_from_json() {
    let workshop = Workshop::standard();
    let script = r#"[
        {"type": "set_width", "value": 800.0},
        {"type": "set_shelf_count", "value": 3},
        {"type": "freeze"}
    ]"#;
    let intents: Vec<Intent> = serde_json::from_str(script).unwrap();
    let cabinet = apply_all(&workshop.create(DesignIntent::default()), intents, &workshop).unwrap();
    assert_eq!(cabinet.revision, 2);
    assert_eq!(cabinet.intent.dimensions.width, 800.0);
    assert_eq!(cabinet.panels_with_role(PanelRole::Shelf).count(), 3);
}
