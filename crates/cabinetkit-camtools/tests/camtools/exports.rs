use crate::fixtures;
use cabinetkit_camtools::{
    cut_list_csv, export, export_panel_dxf, Bom, CamToolError, CncProgram, ExportContext,
    Manifest,
};
use cabinetkit_core::{
    init_standard_library, ExportFormat, GateState, ValidationCategory, ValidationResult,
};
use cabinetkit_hardware::HardwareCatalogue;
use cabinetkit_settings::DxfSettings;
use chrono::{TimeZone, Utc};

#[test]
fn test_cut_list_rows() {
    let cabinet = fixtures::cabinet();
    let csv = cut_list_csv(&cabinet).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + cabinet.panels.len());
    assert!(lines[0].starts_with("panel_id,role,core,finish_width"));
    assert_eq!(
        lines[1],
        "left_side,LEFT_SIDE,pb_18,560.000,620.000,559.000,620.000,18.600,mel_white,mel_white,,,,abs_1"
    );
    assert!(lines[6].starts_with("shelf_1,SHELF,pb_18,560.800,519.500,560.800,518.500"));
}

#[test]
fn test_bom_aggregates_by_material() {
    let cabinet = fixtures::cabinet();
    let materials = init_standard_library();
    let bom = Bom::build(&cabinet, &materials, &HardwareCatalogue::standard());

    let ids: Vec<&str> = bom.boards.iter().map(|b| b.material_id.as_str()).collect();
    assert_eq!(ids, vec!["hdf_8", "pb_18"]);
    assert_eq!(bom.boards[1].panels, 5);
    assert_eq!(bom.surfaces.len(), 1);
    assert_eq!(bom.surfaces[0].faces, 10);

    // two side fronts, top, bottom and shelf fronts
    let edge = &bom.edges[0];
    assert_eq!(edge.material_id, "abs_1");
    let expected = (2.0 * 620.0 + 2.0 * 562.8 + 560.8) / 1000.0;
    assert!((edge.length_m - expected).abs() < 1e-9);
    assert!((edge.cost - expected * 0.55).abs() < 1e-9);

    assert_eq!(bom.fittings.len(), 1);
    assert_eq!(bom.fittings[0].quantity, 4);
    // 0.48 per pin
    assert!((bom.fittings[0].cost - 1.92).abs() < 1e-9);

    assert!(bom.totals.cost > bom.fittings[0].cost);
    assert!((bom.totals.edge_length_m - expected).abs() < 1e-9);

    let csv = bom.to_csv().unwrap();
    assert!(csv.starts_with("section,id,quantity,unit,amount,cost,co2_kg\n"));
    assert!(csv.contains("\nfitting,pin_5_steel,4,pcs,4,1.92,\n"));
    assert!(csv.lines().last().unwrap().starts_with("total,"));
}

#[test]
fn test_cut_list_allowed_in_draft_with_errors() {
    let errors = vec![ValidationResult::error(
        ValidationCategory::Dimension,
        "width_out_of_range",
        "width 2000 mm outside 150..1200",
    )];
    let cabinet = fixtures::cabinet_with(0, errors);
    let materials = init_standard_library();
    let catalogue = HardwareCatalogue::standard();
    let context = ExportContext::new(&materials, &catalogue);

    let artifacts = export(&cabinet, ExportFormat::CutList, &context).unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].file_name, "cut_list.csv");
    assert!(export(&cabinet, ExportFormat::Bom, &context).is_ok());
}

#[test]
fn test_dxf_refused_in_draft() {
    let cabinet = fixtures::cabinet();
    let materials = init_standard_library();
    let catalogue = HardwareCatalogue::standard();
    let context = ExportContext::new(&materials, &catalogue);

    match export(&cabinet, ExportFormat::Dxf, &context) {
        Err(CamToolError::ExportNotPermitted {
            required, current, ..
        }) => {
            assert_eq!(required, GateState::Frozen);
            assert_eq!(current, GateState::Draft);
        }
        other => panic!("expected refusal, got {:?}", other.map(|a| a.len())),
    }
    assert!(export_panel_dxf(&cabinet, "left_side", &DxfSettings::default()).is_err());
}

#[test]
fn test_frozen_exports() {
    let mut cabinet = fixtures::cabinet();
    cabinet.gate = cabinet.gate.freeze(&cabinet.validation).unwrap();
    let materials = init_standard_library();
    let catalogue = HardwareCatalogue::standard();
    let stamp = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let context = ExportContext::new(&materials, &catalogue).with_timestamp(stamp);

    let dxf = export(&cabinet, ExportFormat::Dxf, &context).unwrap();
    assert_eq!(dxf.len(), 1 + cabinet.panels.len());
    assert_eq!(dxf[0].file_name, "cabinet.dxf");
    assert_eq!(dxf[1].file_name, "left_side.dxf");

    let manifest = export(&cabinet, ExportFormat::Manifest, &context).unwrap();
    let parsed: Manifest = serde_json::from_str(&manifest[0].content).unwrap();
    assert_eq!(parsed.state, GateState::Frozen);
    assert_eq!(parsed.panels.len(), 6);
    assert_eq!(parsed.generated_at, Some(stamp));
    assert_eq!(parsed.panels[0].cut_width, 559.0);

    assert!(matches!(
        export(&cabinet, ExportFormat::CncProgram, &context),
        Err(CamToolError::ExportNotPermitted { .. })
    ));

    let panel = export_panel_dxf(&cabinet, "shelf_1", &DxfSettings::default()).unwrap();
    assert!(panel.content.contains("CUT_OUT"));
    assert!(matches!(
        export_panel_dxf(&cabinet, "shelf_9", &DxfSettings::default()),
        Err(CamToolError::PanelNotFound(_))
    ));
}

#[test]
fn test_frozen_export_blocked_by_new_error() {
    let mut cabinet = fixtures::cabinet();
    cabinet.gate = cabinet.gate.freeze(&cabinet.validation).unwrap();
    cabinet.validation.push(ValidationResult::error(
        ValidationCategory::Machine,
        "panel_too_long",
        "left_side exceeds the machine envelope",
    ));
    let materials = init_standard_library();
    let catalogue = HardwareCatalogue::standard();
    let context = ExportContext::new(&materials, &catalogue);

    match export(&cabinet, ExportFormat::Manifest, &context) {
        Err(CamToolError::ExportNotPermitted { blocking, .. }) => {
            assert!(blocking.iter().any(|b| b.contains("machine envelope")));
        }
        other => panic!("expected refusal, got {:?}", other.map(|a| a.len())),
    }
}

#[test]
fn test_released_cnc_program() {
    let mut cabinet = fixtures::cabinet_with(1, Vec::new());
    cabinet.gate = cabinet.gate.freeze(&cabinet.validation).unwrap();
    cabinet.gate = cabinet.gate.release(&cabinet.validation).unwrap();
    let materials = init_standard_library();
    let catalogue = HardwareCatalogue::standard();
    let context = ExportContext::new(&materials, &catalogue);

    let artifacts = export(&cabinet, ExportFormat::CncProgram, &context).unwrap();
    assert_eq!(artifacts[0].file_name, "cnc_program.json");
    let program: CncProgram = serde_json::from_str(&artifacts[0].content).unwrap();
    assert_eq!(program.units, "mm");
    assert_eq!(program.graph.panels.len(), cabinet.operations.panels.len());
    assert_eq!(
        program.graph.operation_count(),
        cabinet.operations.operation_count()
    );
    assert_eq!(program.graph.panel("door_1").unwrap().operations.len(), 2);
}
