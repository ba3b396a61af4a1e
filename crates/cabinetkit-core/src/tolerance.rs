//! Tolerance engine
//!
//! Maps a core material's behavioural category and the kind of feature
//! being dimensioned to a gap in millimetres. Movement-driven gaps follow
//! the expansion class, fit-driven gaps follow the machining class. The
//! table is total: every pair has a value, zero where no allowance applies.

use crate::data::materials::{ExpansionClass, MachiningClass, MaterialCategory};
use serde::{Deserialize, Serialize};

/// Feature a tolerance is injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceKind {
    /// Extra groove offset and width for the back panel
    BackPanelGroove,
    /// Extra hinge cup depth
    HingeCupClearance,
    /// Shelf pin hole oversize
    ShelfPinFit,
    /// Gap between a shelf and each side
    ShelfSideClearance,
    /// Extra door reveal gap
    DoorGap,
    /// Dowel hole oversize
    DowelFit,
}

impl ToleranceKind {
    /// Get all kinds
    pub fn all() -> &'static [ToleranceKind] {
        &[
            ToleranceKind::BackPanelGroove,
            ToleranceKind::HingeCupClearance,
            ToleranceKind::ShelfPinFit,
            ToleranceKind::ShelfSideClearance,
            ToleranceKind::DoorGap,
            ToleranceKind::DowelFit,
        ]
    }
}

/// A gap in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct ToleranceValue(pub f64);

impl ToleranceValue {
    pub fn mm(&self) -> f64 {
        self.0
    }
}

/// Tolerance for a feature cut into or fitted against a material category
pub fn tolerance(category: MaterialCategory, kind: ToleranceKind) -> ToleranceValue {
    let mm = match kind {
        ToleranceKind::BackPanelGroove => match category.expansion_class() {
            ExpansionClass::Stable => 0.2,
            ExpansionClass::Moderate => 0.5,
            ExpansionClass::High => 1.5,
        },
        ToleranceKind::ShelfSideClearance => match category.expansion_class() {
            ExpansionClass::Stable => 0.5,
            ExpansionClass::Moderate => 1.0,
            ExpansionClass::High => 2.0,
        },
        ToleranceKind::DoorGap => match category.expansion_class() {
            ExpansionClass::Stable | ExpansionClass::Moderate => 0.0,
            ExpansionClass::High => 1.0,
        },
        ToleranceKind::HingeCupClearance => match category.machining_class() {
            MachiningClass::Clean => 0.2,
            MachiningClass::Chipping | MachiningClass::Fibrous => 0.5,
        },
        ToleranceKind::ShelfPinFit => match category.machining_class() {
            MachiningClass::Clean => 0.0,
            MachiningClass::Chipping => 0.1,
            MachiningClass::Fibrous => 0.2,
        },
        ToleranceKind::DowelFit => match category.machining_class() {
            MachiningClass::Clean => 0.0,
            MachiningClass::Chipping => 0.2,
            MachiningClass::Fibrous => 0.1,
        },
    };
    ToleranceValue(mm)
}
