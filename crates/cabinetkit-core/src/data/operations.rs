//! Machine-neutral operations
//!
//! Operations are stored in the panel's cut-substrate frame (origin at the
//! lower-left corner of the cut panel). Face B operations use the same frame
//! as face A; they are mirrored only when a machine format is written.

use crate::data::panel::{PanelEdge, PanelRole};
use serde::{Deserialize, Serialize};

/// Panel face an operation is machined from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Face {
    A,
    B,
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A single machining step on a panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MachineOperation {
    /// Bore into a face
    DrillVertical {
        x: f64,
        y: f64,
        diameter: f64,
        depth: f64,
        face: Face,
    },
    /// Bore into an edge, parallel to the face, `z` above face A
    DrillHorizontal {
        x: f64,
        y: f64,
        z: f64,
        diameter: f64,
        depth: f64,
        edge: PanelEdge,
        face: Face,
    },
    /// Straight saw groove
    Groove {
        x_start: f64,
        y_start: f64,
        x_end: f64,
        y_end: f64,
        width: f64,
        depth: f64,
        face: Face,
    },
    /// Flat-bottomed pocket (hinge cups)
    Pocket {
        x: f64,
        y: f64,
        diameter: f64,
        depth: f64,
        face: Face,
    },
}

impl MachineOperation {
    /// Face the operation is machined from
    pub fn face(&self) -> Face {
        match self {
            Self::DrillVertical { face, .. }
            | Self::DrillHorizontal { face, .. }
            | Self::Groove { face, .. }
            | Self::Pocket { face, .. } => *face,
        }
    }

    /// Depth of cut
    pub fn depth(&self) -> f64 {
        match self {
            Self::DrillVertical { depth, .. }
            | Self::DrillHorizontal { depth, .. }
            | Self::Groove { depth, .. }
            | Self::Pocket { depth, .. } => *depth,
        }
    }

    /// Short name of the operation type
    pub fn label(&self) -> &'static str {
        match self {
            Self::DrillVertical { .. } => "drill_vertical",
            Self::DrillHorizontal { .. } => "drill_horizontal",
            Self::Groove { .. } => "groove",
            Self::Pocket { .. } => "pocket",
        }
    }
}

/// Operations for one panel together with its cut outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelOperations {
    pub panel_id: String,
    pub role: PanelRole,
    /// Cut width (mm)
    pub width: f64,
    /// Cut height (mm)
    pub height: f64,
    /// Real thickness (mm)
    pub thickness: f64,
    pub operations: Vec<MachineOperation>,
}

impl PanelOperations {
    /// Operations machined from one face
    pub fn on_face(&self, face: Face) -> impl Iterator<Item = &MachineOperation> {
        self.operations.iter().filter(move |op| op.face() == face)
    }
}

/// Machine-neutral operation list for every panel of a cabinet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperationGraph {
    pub panels: Vec<PanelOperations>,
}

impl OperationGraph {
    /// Operations of one panel
    pub fn panel(&self, panel_id: &str) -> Option<&PanelOperations> {
        self.panels.iter().find(|p| p.panel_id == panel_id)
    }

    /// Total number of operations
    pub fn operation_count(&self) -> usize {
        self.panels.iter().map(|p| p.operations.len()).sum()
    }
}
