use cabinetkit_core::data::*;

#[test]
fn test_intent_json_round_trip() {
    let mut intent = DesignIntent::default();
    intent.structure.shelf_count = 3;
    intent.overrides.insert(
        "shelf_2".to_string(),
        PanelOverride {
            core: Some("mdf_18".to_string()),
            position: Some(250.0),
            ..Default::default()
        },
    );
    intent.fittings.push(FittingRequest {
        fitting_id: "pin_5_nickel".to_string(),
        panel_id: "shelf_1".to_string(),
        role: FittingRole::Bracket,
        quantity: 4,
    });

    let json = intent.to_json().unwrap();
    let back = DesignIntent::from_json(&json).unwrap();
    assert_eq!(back, intent);
}

#[test]
fn test_intent_minimal_json_uses_defaults() {
    let json = r#"{
        "dimensions": {"width": 800, "height": 720, "depth": 560, "toe_kick_height": 100},
        "structure": {"shelf_count": 2, "divider_count": 0, "has_back_panel": true,
                      "top_joint": "INSET", "bottom_joint": "INSET"},
        "materials": {"default_core": "pb_18", "default_surface": "mel_white", "default_edge": "abs_1"}
    }"#;
    let intent = DesignIntent::from_json(json).unwrap();
    assert!(intent.overrides.is_empty());
    assert!(intent.fittings.is_empty());
    assert_eq!(intent.dimensions.width, 800.0);
}

#[test]
fn test_override_face_keys() {
    let json = r#"{"faces": {"B": null}, "edges": {"top": "abs_2"}}"#;
    let ov: PanelOverride = serde_json::from_str(json).unwrap();
    assert_eq!(ov.faces.get(&Face::B), Some(&None));
    assert_eq!(
        ov.edges.get(&PanelEdge::Top),
        Some(&Some("abs_2".to_string()))
    );
    assert!(ov.core.is_none());
}
