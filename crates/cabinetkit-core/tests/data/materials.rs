use cabinetkit_core::data::materials::*;
use cabinetkit_core::{MaterialError, Severity};

#[test]
fn test_standard_library_fallbacks() {
    let lib = init_standard_library();
    assert_eq!(lib.cores.fallback_id(), "pb_18");
    assert_eq!(lib.surfaces.fallback_id(), "mel_white");
    assert_eq!(lib.edges.fallback_id(), "abs_1");
    assert_eq!(lib.cores.fallback().thickness, 18.0);
}

#[test]
fn test_lookup_unknown_core() {
    let lib = init_standard_library();
    let err = lib.cores.get("walnut_22").unwrap_err();
    assert_eq!(
        err,
        MaterialError::UnknownMaterial {
            kind: MaterialKind::Core,
            id: "walnut_22".to_string()
        }
    );
}

#[test]
fn test_resolve_strict_reports_error() {
    let lib = init_standard_library();
    let resolution = lib.cores.resolve("walnut_22", RegistryPolicy::Strict);
    assert!(!resolution.is_exact());
    assert_eq!(resolution.record.id, "pb_18");

    let issue = resolution.issue(Some("left_side")).unwrap();
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.code, "unknown_material");
    assert_eq!(issue.panel_id.as_deref(), Some("left_side"));
}

#[test]
fn test_resolve_fallback_reports_warning() {
    let lib = init_standard_library();
    let resolution = lib.edges.resolve("abs_9", RegistryPolicy::FallbackToDefault);
    assert_eq!(resolution.record.id, "abs_1");
    assert_eq!(resolution.issue(None).unwrap().severity, Severity::Warning);

    let exact = lib.edges.resolve("abs_2", RegistryPolicy::Strict);
    assert!(exact.is_exact());
    assert!(exact.issue(None).is_none());
}

#[test]
fn test_registry_rejects_missing_fallback() {
    let err = Registry::new(vec![CoreMaterial::new("pb_16", "PB 16", 16.0)], "pb_18").unwrap_err();
    assert!(matches!(err, MaterialError::MissingFallback { .. }));
}

#[test]
fn test_registry_rejects_duplicates_and_bad_thickness() {
    let err = Registry::new(
        vec![
            CoreMaterial::new("pb_16", "PB 16", 16.0),
            CoreMaterial::new("pb_16", "PB 16 again", 16.0),
        ],
        "pb_16",
    )
    .unwrap_err();
    assert!(matches!(err, MaterialError::Duplicate { .. }));

    let err = Registry::new(vec![CoreMaterial::new("thin", "Thin", 0.0)], "thin").unwrap_err();
    assert!(matches!(err, MaterialError::InvalidRecord { .. }));
}

#[test]
fn test_upsert_checks_thickness() {
    let mut lib = init_standard_library();
    lib.cores.upsert(CoreMaterial::new("pb_16", "PB 16", 16.0)).unwrap();
    assert!(lib.cores.contains("pb_16"));

    let err = lib.cores.upsert(CoreMaterial::new("pb_18", "Flat", 0.0)).unwrap_err();
    assert!(matches!(err, MaterialError::InvalidRecord { .. }));
    assert_eq!(lib.cores.get("pb_18").unwrap().thickness, 18.0);
    assert!(lib.cores.upsert(CoreMaterial::new("nan", "NaN", f64::NAN)).is_err());
}

#[test]
fn test_category_classes() {
    assert_eq!(
        MaterialCategory::SolidWood.expansion_class(),
        ExpansionClass::High
    );
    assert_eq!(
        MaterialCategory::Particleboard.machining_class(),
        MachiningClass::Chipping
    );
    for category in MaterialCategory::all() {
        // every category classifies without panicking
        let _ = (category.expansion_class(), category.machining_class());
    }
}

#[test]
fn test_library_file_round_trip() {
    let lib = init_standard_library();
    let json = serde_json::to_string(&lib.to_file()).unwrap();
    let file: MaterialLibraryFile = serde_json::from_str(&json).unwrap();
    let back = file.into_registries().unwrap();
    assert_eq!(back, lib);
}

#[test]
fn test_areal_density() {
    let lib = init_standard_library();
    let pb = lib.cores.get("pb_18").unwrap();
    assert!((pb.areal_density_kg_m2() - 11.52).abs() < 1e-9);
}
