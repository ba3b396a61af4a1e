//! Design intent: the only state a designer edits directly

use crate::data::dimensions::{CabinetDimensions, CabinetStructure};
use crate::data::fittings::FittingRequest;
use crate::data::panel::PanelOverride;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default material ids applied to every panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialAssignment {
    pub default_core: String,
    pub default_surface: String,
    pub default_edge: String,
}

impl Default for MaterialAssignment {
    fn default() -> Self {
        Self {
            default_core: "pb_18".to_string(),
            default_surface: "mel_white".to_string(),
            default_edge: "abs_1".to_string(),
        }
    }
}

/// Everything the designer decides; all other cabinet state derives from it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignIntent {
    pub dimensions: CabinetDimensions,
    pub structure: CabinetStructure,
    pub materials: MaterialAssignment,
    /// Overrides keyed by panel id
    #[serde(default)]
    pub overrides: BTreeMap<String, PanelOverride>,
    /// Explicitly requested hardware
    #[serde(default)]
    pub fittings: Vec<FittingRequest>,
}

impl DesignIntent {
    pub fn new(
        dimensions: CabinetDimensions,
        structure: CabinetStructure,
        materials: MaterialAssignment,
    ) -> Self {
        Self {
            dimensions,
            structure,
            materials,
            overrides: BTreeMap::new(),
            fittings: Vec::new(),
        }
    }

    /// Override for a panel, if any
    pub fn override_for(&self, panel_id: &str) -> Option<&PanelOverride> {
        self.overrides.get(panel_id)
    }

    /// Load an intent from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
