//! Cabinet dimensions and carcass structure

use serde::{Deserialize, Serialize};

/// Outer cabinet dimensions in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CabinetDimensions {
    /// Overall width (left outer face to right outer face)
    pub width: f64,
    /// Overall height including the toe kick
    pub height: f64,
    /// Overall depth (front plane to back plane)
    pub depth: f64,
    /// Height of the plinth below the carcass
    pub toe_kick_height: f64,
}

impl CabinetDimensions {
    /// Create a new set of dimensions
    pub fn new(width: f64, height: f64, depth: f64, toe_kick_height: f64) -> Self {
        Self {
            width,
            height,
            depth,
            toe_kick_height,
        }
    }

    /// Height of the carcass body above the toe kick
    pub fn body_height(&self) -> f64 {
        self.height - self.toe_kick_height
    }
}

impl Default for CabinetDimensions {
    fn default() -> Self {
        Self::new(600.0, 720.0, 560.0, 100.0)
    }
}

/// How a horizontal carcass panel meets the sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JointType {
    /// Panel runs over the side edges (full cabinet width)
    Overlay,
    /// Panel sits between the sides
    Inset,
}

impl JointType {
    /// Number of side thicknesses the panel gains per joint end
    /// compared to the inset width.
    pub fn width_gain_per_end(&self) -> f64 {
        match self {
            Self::Overlay => 1.0,
            Self::Inset => 0.0,
        }
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overlay => write!(f, "OVERLAY"),
            Self::Inset => write!(f, "INSET"),
        }
    }
}

/// Interior structure of the carcass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinetStructure {
    /// Number of adjustable shelves
    pub shelf_count: u32,
    /// Number of vertical dividers
    pub divider_count: u32,
    /// Whether a grooved back panel is fitted
    pub has_back_panel: bool,
    /// Joint of the top panel
    pub top_joint: JointType,
    /// Joint of the bottom panel
    pub bottom_joint: JointType,
    /// Number of overlay doors (0, 1 or 2)
    #[serde(default)]
    pub door_count: u32,
}

impl Default for CabinetStructure {
    fn default() -> Self {
        Self {
            shelf_count: 1,
            divider_count: 0,
            has_back_panel: true,
            top_joint: JointType::Inset,
            bottom_joint: JointType::Inset,
            door_count: 0,
        }
    }
}
