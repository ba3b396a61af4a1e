//! Hardware assigned to panels

use serde::{Deserialize, Serialize};

/// What a fitting does for the panel it is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FittingRole {
    /// Door hinge
    Hinge,
    /// Shelf support or bracket
    Bracket,
    /// Drawer or pull-out rail
    Rail,
}

impl std::fmt::Display for FittingRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hinge => write!(f, "hinge"),
            Self::Bracket => write!(f, "bracket"),
            Self::Rail => write!(f, "rail"),
        }
    }
}

/// Outcome of checking a fitting against its panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyStatus {
    /// Catalogue-certified for this context
    Compatible,
    /// Fits by heuristics only
    LowConfidence,
    /// Fails a load or fit predicate
    Incompatible,
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compatible => write!(f, "COMPATIBLE"),
            Self::LowConfidence => write!(f, "LOW_CONFIDENCE"),
            Self::Incompatible => write!(f, "INCOMPATIBLE"),
        }
    }
}

/// A fitting the designer asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FittingRequest {
    pub fitting_id: String,
    pub panel_id: String,
    pub role: FittingRole,
    /// Pieces used on the panel (0 lets the pipeline decide)
    #[serde(default)]
    pub quantity: u32,
}

/// A fitting attached to a panel with its checked status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FittingAssignment {
    pub fitting_id: String,
    pub panel_id: String,
    pub role: FittingRole,
    pub status: SafetyStatus,
    /// Pieces used on the panel, priced per piece but rated as one set
    pub quantity: u32,
    /// Chosen by ranking rather than requested
    #[serde(default)]
    pub automatic: bool,
}
