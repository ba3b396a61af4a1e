use cabinetkit_core::{DesignIntent, GateError, GateState};
use cabinetkit_designer::{apply, apply_all, CabinetError, Intent, Workshop};

#[test]
fn clean_draft_freezes() {
    let workshop = Workshop::standard();
    let draft = workshop.create(DesignIntent::default());
    assert_eq!(draft.error_count(), 0);

    let frozen = apply(&draft, Intent::Freeze, &workshop).unwrap();
    assert_eq!(frozen.gate.state(), GateState::Frozen);
    assert_eq!(frozen.panels, draft.panels);
}

#[test]
fn injected_error_blocks_release_without_touching_earlier_snapshots() {
    let workshop = Workshop::standard();
    let draft = workshop.create(DesignIntent::default());
    let frozen = apply(&draft, Intent::Freeze, &workshop).unwrap();

    let broken = apply(&frozen, Intent::SetWidth(5000.0), &workshop).unwrap();
    assert_eq!(broken.gate.state(), GateState::Frozen);
    assert!(broken.error_count() > 0);

    let err = apply(&broken, Intent::Release, &workshop).unwrap_err();
    assert!(matches!(
        err,
        CabinetError::Gate(GateError::BlockedByValidation {
            to: GateState::Released,
            ..
        })
    ));

    assert_eq!(draft.gate.state(), GateState::Draft);
    assert_eq!(draft.intent.dimensions.width, 600.0);
    assert_eq!(draft.error_count(), 0);
    assert_eq!(frozen.intent.dimensions.width, 600.0);
}

#[test]
fn release_requires_frozen() {
    let workshop = Workshop::standard();
    let draft = workshop.create(DesignIntent::default());
    let err = apply(&draft, Intent::Release, &workshop).unwrap_err();
    assert!(matches!(
        err,
        CabinetError::Gate(GateError::InvalidTransition {
            from: GateState::Draft,
            to: GateState::Released,
            ..
        })
    ));
}

#[test]
fn released_is_final() {
    let workshop = Workshop::standard();
    let draft = workshop.create(DesignIntent::default());
    let released = apply_all(&draft, [Intent::Freeze, Intent::Release], &workshop).unwrap();

    for intent in [
        Intent::SetShelfCount(3),
        Intent::Unfreeze,
        Intent::Freeze,
        Intent::Release,
    ] {
        assert!(apply(&released, intent, &workshop).is_err());
    }
    assert_eq!(released.revision, 0);
}

#[test]
fn unfreeze_returns_to_draft_and_allows_fixes() {
    let workshop = Workshop::standard();
    let draft = workshop.create(DesignIntent::default());
    let broken = apply_all(
        &draft,
        [Intent::Freeze, Intent::SetWidth(2000.0), Intent::Unfreeze],
        &workshop,
    )
    .unwrap();
    assert_eq!(broken.gate.state(), GateState::Draft);
    assert!(broken.error_count() > 0);

    let fixed = apply(&broken, Intent::SetWidth(600.0), &workshop).unwrap();
    assert_eq!(fixed.error_count(), 0);
    assert_eq!(fixed.revision, 2);
    assert_eq!(fixed.panels, draft.panels);
}
