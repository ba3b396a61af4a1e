//! Fitting compatibility and ranking
//!
//! A fitting is compatible with a panel context when its rated load covers
//! the required load and it physically fits the panel (thickness range and,
//! for hinges, opening angle). Compatible fittings are ranked in three
//! tiers:
//!
//! 1. certified, preferred brand tier and factory preferred
//! 2. certified
//! 3. low confidence (compatible by declared values, not certified)
//!
//! Within a tier cheaper fittings come first, ties broken by id.
//! Incompatible fittings are kept out of the ranking and reported with
//! every predicate they fail.

use crate::catalogue::HardwareCatalogue;
use crate::model::{BrandTier, Fitting};
use cabinetkit_core::{FittingRole, SafetyStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The panel a fitting is being chosen for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingContext {
    pub role: FittingRole,
    /// Real thickness of the panel the fitting mounts on (mm)
    pub panel_thickness: f64,
    /// Load the fitting set has to carry (kg)
    pub required_load_kg: f64,
    /// Opening angle the fitting must reach (degrees)
    #[serde(default)]
    pub required_opening_angle: Option<f64>,
}

impl FittingContext {
    pub fn new(role: FittingRole, panel_thickness: f64, required_load_kg: f64) -> Self {
        Self {
            role,
            panel_thickness,
            required_load_kg,
            required_opening_angle: None,
        }
    }

    pub fn with_opening_angle(mut self, angle: f64) -> Self {
        self.required_opening_angle = Some(angle);
        self
    }
}

/// A failed compatibility predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    WrongRole {
        expected: FittingRole,
        actual: Option<FittingRole>,
    },
    Overload {
        capacity_kg: f64,
        required_kg: f64,
    },
    PanelTooThin {
        min: f64,
        actual: f64,
    },
    PanelTooThick {
        max: f64,
        actual: f64,
    },
    OpeningAngle {
        available: Option<f64>,
        required: f64,
    },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongRole { expected, actual } => match actual {
                Some(actual) => write!(f, "is a {} fitting, {} required", actual, expected),
                None => write!(f, "is not assignable as {}", expected),
            },
            Self::Overload {
                capacity_kg,
                required_kg,
            } => write!(
                f,
                "rated {:.1} kg, {:.1} kg required",
                capacity_kg, required_kg
            ),
            Self::PanelTooThin { min, actual } => {
                write!(f, "needs at least {} mm panel, got {:.1} mm", min, actual)
            }
            Self::PanelTooThick { max, actual } => {
                write!(f, "takes at most {} mm panel, got {:.1} mm", max, actual)
            }
            Self::OpeningAngle {
                available,
                required,
            } => match available {
                Some(available) => write!(f, "opens {}°, {}° required", available, required),
                None => write!(f, "has no opening angle, {}° required", required),
            },
        }
    }
}

/// Result of checking one fitting against a context
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub status: SafetyStatus,
    pub reasons: Vec<RejectionReason>,
}

/// Check a fitting against a panel context
pub fn evaluate(fitting: &Fitting, context: &FittingContext) -> Evaluation {
    let mut reasons = Vec::new();

    let role = fitting.category.role();
    if role != Some(context.role) {
        reasons.push(RejectionReason::WrongRole {
            expected: context.role,
            actual: role,
        });
    }
    if fitting.load_capacity_kg < context.required_load_kg {
        reasons.push(RejectionReason::Overload {
            capacity_kg: fitting.load_capacity_kg,
            required_kg: context.required_load_kg,
        });
    }
    if context.panel_thickness < fitting.spec.min_panel_thickness {
        reasons.push(RejectionReason::PanelTooThin {
            min: fitting.spec.min_panel_thickness,
            actual: context.panel_thickness,
        });
    }
    if context.panel_thickness > fitting.spec.max_panel_thickness {
        reasons.push(RejectionReason::PanelTooThick {
            max: fitting.spec.max_panel_thickness,
            actual: context.panel_thickness,
        });
    }
    if let Some(required) = context.required_opening_angle {
        let reaches = fitting
            .spec
            .opening_angle
            .is_some_and(|available| available >= required);
        if !reaches {
            reasons.push(RejectionReason::OpeningAngle {
                available: fitting.spec.opening_angle,
                required,
            });
        }
    }

    let status = if !reasons.is_empty() {
        SafetyStatus::Incompatible
    } else if fitting.certified {
        SafetyStatus::Compatible
    } else {
        SafetyStatus::LowConfidence
    };

    Evaluation { status, reasons }
}

/// Ranking tier of a compatible fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    /// Certified, preferred brand and factory preference
    Preferred,
    /// Certified
    Compatible,
    /// Compatible by declared values only
    LowConfidence,
}

fn tier_of(fitting: &Fitting, status: SafetyStatus) -> RankTier {
    match status {
        SafetyStatus::Compatible
            if fitting.brand_tier == BrandTier::Preferred && fitting.factory_preferred =>
        {
            RankTier::Preferred
        }
        SafetyStatus::Compatible => RankTier::Compatible,
        _ => RankTier::LowConfidence,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFitting {
    pub fitting_id: String,
    pub tier: RankTier,
    pub status: SafetyStatus,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub fitting_id: String,
    pub reasons: Vec<RejectionReason>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ranking {
    pub ranked: Vec<RankedFitting>,
    pub rejected: Vec<Rejection>,
}

impl Ranking {
    /// Top-ranked fitting id
    pub fn best(&self) -> Option<&str> {
        self.ranked.first().map(|r| r.fitting_id.as_str())
    }
}

/// Rank every catalogue fitting of the context's role
///
/// Fittings of other roles are not considered at all; only same-role
/// fittings that fail a predicate appear in `rejected`.
pub fn rank(catalogue: &HardwareCatalogue, context: &FittingContext) -> Ranking {
    let mut ranking = Ranking::default();

    for fitting in catalogue
        .iter()
        .filter(|f| f.category.role() == Some(context.role))
    {
        let evaluation = evaluate(fitting, context);
        if evaluation.status == SafetyStatus::Incompatible {
            ranking.rejected.push(Rejection {
                fitting_id: fitting.id.clone(),
                reasons: evaluation.reasons,
            });
        } else {
            ranking.ranked.push(RankedFitting {
                fitting_id: fitting.id.clone(),
                tier: tier_of(fitting, evaluation.status),
                status: evaluation.status,
                price: fitting.price,
            });
        }
    }

    ranking.ranked.sort_by(|a, b| {
        a.tier
            .cmp(&b.tier)
            .then_with(|| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal))
            .then_with(|| a.fitting_id.cmp(&b.fitting_id))
    });

    tracing::debug!(
        "Ranked {} {} fittings ({} rejected)",
        ranking.ranked.len(),
        context.role,
        ranking.rejected.len()
    );
    ranking
}
