//! Cabinet panels
//!
//! A panel is described in its own local frame: `finish_width` runs along
//! local x and `finish_height` along local y. For vertical panels (sides,
//! dividers) local x runs from the back edge (x = 0) to the front edge; for
//! horizontal panels (top, bottom, shelves) local y runs from the front edge
//! (y = 0) to the back.

use crate::data::operations::Face;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role of a panel in the carcass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PanelRole {
    /// Left carcass side
    LeftSide,
    /// Right carcass side
    RightSide,
    /// Top panel
    Top,
    /// Bottom panel
    Bottom,
    /// Grooved back panel
    Back,
    /// Adjustable shelf
    Shelf,
    /// Vertical divider
    Divider,
    /// Overlay door
    Door,
}

impl PanelRole {
    /// Get all roles
    pub fn all() -> &'static [PanelRole] {
        &[
            PanelRole::LeftSide,
            PanelRole::RightSide,
            PanelRole::Top,
            PanelRole::Bottom,
            PanelRole::Back,
            PanelRole::Shelf,
            PanelRole::Divider,
            PanelRole::Door,
        ]
    }

    /// Stable lowercase name, used for panel ids
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftSide => "left_side",
            Self::RightSide => "right_side",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Back => "back",
            Self::Shelf => "shelf",
            Self::Divider => "divider",
            Self::Door => "door",
        }
    }

    /// Whether the panel's weight rests on its assigned hardware
    pub fn is_load_bearing(&self) -> bool {
        match self {
            Self::Shelf | Self::Top | Self::Bottom | Self::Door => true,
            Self::LeftSide | Self::RightSide | Self::Back | Self::Divider => false,
        }
    }

    /// Whether several panels of this role can exist
    pub fn is_repeated(&self) -> bool {
        match self {
            Self::Shelf | Self::Divider | Self::Door => true,
            Self::LeftSide | Self::RightSide | Self::Top | Self::Bottom | Self::Back => false,
        }
    }

    /// Panel id for the `index`-th (1-based) panel of this role
    pub fn panel_id(&self, index: u32) -> String {
        if self.is_repeated() {
            format!("{}_{}", self.as_str(), index)
        } else {
            self.as_str().to_string()
        }
    }
}

impl std::fmt::Display for PanelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftSide => write!(f, "LEFT_SIDE"),
            Self::RightSide => write!(f, "RIGHT_SIDE"),
            Self::Top => write!(f, "TOP"),
            Self::Bottom => write!(f, "BOTTOM"),
            Self::Back => write!(f, "BACK"),
            Self::Shelf => write!(f, "SHELF"),
            Self::Divider => write!(f, "DIVIDER"),
            Self::Door => write!(f, "DOOR"),
        }
    }
}

/// One of the four panel edges in the local frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelEdge {
    /// y = height
    Top,
    /// y = 0
    Bottom,
    /// x = 0
    Left,
    /// x = width
    Right,
}

impl PanelEdge {
    /// Get all edges
    pub fn all() -> &'static [PanelEdge] {
        &[
            PanelEdge::Top,
            PanelEdge::Bottom,
            PanelEdge::Left,
            PanelEdge::Right,
        ]
    }

    /// Whether the edge runs along the width axis (its banding deducts height)
    pub fn runs_along_width(&self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl std::fmt::Display for PanelEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Edge banding per edge (edge material ids)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelEdges {
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
}

impl PanelEdges {
    /// No banding on any edge
    pub fn none() -> Self {
        Self::default()
    }

    /// Banding on the given edges with one material
    pub fn on(edges: &[PanelEdge], material_id: &str) -> Self {
        let mut result = Self::default();
        for edge in edges {
            result.set(*edge, Some(material_id.to_string()));
        }
        result
    }

    /// Band material on an edge
    pub fn get(&self, edge: PanelEdge) -> Option<&str> {
        match edge {
            PanelEdge::Top => self.top.as_deref(),
            PanelEdge::Bottom => self.bottom.as_deref(),
            PanelEdge::Left => self.left.as_deref(),
            PanelEdge::Right => self.right.as_deref(),
        }
    }

    /// Set or clear the band on an edge
    pub fn set(&mut self, edge: PanelEdge, material_id: Option<String>) {
        match edge {
            PanelEdge::Top => self.top = material_id,
            PanelEdge::Bottom => self.bottom = material_id,
            PanelEdge::Left => self.left = material_id,
            PanelEdge::Right => self.right = material_id,
        }
    }

    /// Banded edges with their material ids, in [`PanelEdge::all`] order
    pub fn banded(&self) -> Vec<(PanelEdge, &str)> {
        PanelEdge::all()
            .iter()
            .filter_map(|edge| self.get(*edge).map(|id| (*edge, id)))
            .collect()
    }
}

/// Surface covering ids of both faces
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelFaces {
    pub face_a: Option<String>,
    pub face_b: Option<String>,
}

impl PanelFaces {
    /// Same covering on both faces
    pub fn both(surface_id: &str) -> Self {
        Self {
            face_a: Some(surface_id.to_string()),
            face_b: Some(surface_id.to_string()),
        }
    }
}

/// Panel origin in cabinet body coordinates (mm)
///
/// x from the left outer face, y up from the top of the toe kick,
/// z back from the front plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Placement {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Values derived from the material stack
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComputedFields {
    /// Core + bonded surfaces + glue lines (mm)
    pub real_thickness: f64,
    /// Substrate cutting width after edge deduction (mm)
    pub cut_width: f64,
    /// Substrate cutting height after edge deduction (mm)
    pub cut_height: f64,
    /// One face, finish size (m²)
    pub surface_area: f64,
    /// Total banded edge length (m)
    pub edge_length: f64,
    /// Estimated panel weight (kg)
    pub weight_kg: f64,
}

/// A physical panel of the cabinet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetPanel {
    /// Deterministic id (`left_side`, `shelf_2`, ...)
    pub id: String,
    /// Role in the carcass
    pub role: PanelRole,
    /// 1-based index within the role
    pub index: u32,
    /// As-installed width including edge banding (mm)
    pub finish_width: f64,
    /// As-installed height including edge banding (mm)
    pub finish_height: f64,
    /// Edge banding
    pub edges: PanelEdges,
    /// Core material id
    pub core_material_id: String,
    /// Face coverings
    pub faces: PanelFaces,
    /// Position in the carcass
    pub placement: Placement,
    /// Derived values, filled in by the material stack resolver
    pub computed: ComputedFields,
}

impl CabinetPanel {
    /// Create a panel with no materials and zeroed computed fields
    pub fn new(role: PanelRole, index: u32, finish_width: f64, finish_height: f64) -> Self {
        Self {
            id: role.panel_id(index),
            role,
            index,
            finish_width,
            finish_height,
            edges: PanelEdges::none(),
            core_material_id: String::new(),
            faces: PanelFaces::default(),
            placement: Placement::default(),
            computed: ComputedFields::default(),
        }
    }
}

/// Per-panel override of defaulted materials and position
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOverride {
    /// Replacement core id
    pub core: Option<String>,
    /// Per-face replacement covering (`null` removes the face)
    pub faces: BTreeMap<Face, Option<String>>,
    /// Per-edge replacement band (`null` removes the band)
    pub edges: BTreeMap<PanelEdge, Option<String>>,
    /// Explicit vertical position (shelves), mm above the body bottom
    pub position: Option<f64>,
}
