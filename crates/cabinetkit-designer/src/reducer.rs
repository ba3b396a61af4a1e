//! Intent reducer
//!
//! `apply` takes a snapshot and one intent and returns the next snapshot.
//! Design mutations recompute the whole cabinet and bump the revision;
//! gate intents only move the gate. A released cabinet refuses both.

use crate::error::{CabinetError, CabinetResult};
use crate::pipeline::Workshop;
use cabinetkit_core::{
    Cabinet, CabinetDimensions, CabinetStructure, DesignIntent, FittingRequest, FittingRole,
    GateError, MaterialAssignment, PanelOverride,
};
use serde::{Deserialize, Serialize};

/// A single change requested by the designer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    SetDimensions(CabinetDimensions),
    SetWidth(f64),
    SetHeight(f64),
    SetDepth(f64),
    SetToeKick(f64),
    SetStructure(CabinetStructure),
    SetShelfCount(u32),
    SetMaterials(MaterialAssignment),
    SetPanelOverride {
        panel_id: String,
        #[serde(rename = "override")]
        value: PanelOverride,
    },
    ClearPanelOverride {
        panel_id: String,
    },
    AssignFitting(FittingRequest),
    RemoveFitting {
        panel_id: String,
        role: FittingRole,
    },
    Freeze,
    Release,
    Unfreeze,
}

impl Intent {
    /// Whether the intent changes the design rather than the gate
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Freeze | Self::Release | Self::Unfreeze)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SetDimensions(_) => "set_dimensions",
            Self::SetWidth(_) => "set_width",
            Self::SetHeight(_) => "set_height",
            Self::SetDepth(_) => "set_depth",
            Self::SetToeKick(_) => "set_toe_kick",
            Self::SetStructure(_) => "set_structure",
            Self::SetShelfCount(_) => "set_shelf_count",
            Self::SetMaterials(_) => "set_materials",
            Self::SetPanelOverride { .. } => "set_panel_override",
            Self::ClearPanelOverride { .. } => "clear_panel_override",
            Self::AssignFitting(_) => "assign_fitting",
            Self::RemoveFitting { .. } => "remove_fitting",
            Self::Freeze => "freeze",
            Self::Release => "release",
            Self::Unfreeze => "unfreeze",
        }
    }
}

/// Apply an intent, producing the next snapshot
///
/// The input snapshot is never modified. Refused intents return an error
/// and leave the caller holding the unchanged snapshot.
pub fn apply(cabinet: &Cabinet, intent: Intent, workshop: &Workshop) -> CabinetResult<Cabinet> {
    if intent.is_mutation() {
        mutate(cabinet, intent, workshop)
    } else {
        transition(cabinet, intent)
    }
}

/// Apply intents in order, stopping at the first refusal
pub fn apply_all(
    cabinet: &Cabinet,
    intents: impl IntoIterator<Item = Intent>,
    workshop: &Workshop,
) -> CabinetResult<Cabinet> {
    let mut current = cabinet.clone();
    for intent in intents {
        current = apply(&current, intent, workshop)?;
    }
    Ok(current)
}

fn mutate(cabinet: &Cabinet, intent: Intent, workshop: &Workshop) -> CabinetResult<Cabinet> {
    if !cabinet.gate.accepts_mutations() {
        tracing::warn!(
            "Refused {} on released cabinet {}",
            intent.name(),
            cabinet.id
        );
        return Err(GateError::Released.into());
    }

    let name = intent.name();
    let design = edit(cabinet.intent.clone(), intent)?;
    let next = workshop.snapshot(cabinet.id, cabinet.revision + 1, cabinet.gate, design);
    tracing::debug!(
        "Applied {} to cabinet {} (revision {}, {} errors)",
        name,
        next.id,
        next.revision,
        next.error_count()
    );
    Ok(next)
}

fn edit(mut design: DesignIntent, intent: Intent) -> CabinetResult<DesignIntent> {
    match intent {
        Intent::SetDimensions(dims) => design.dimensions = dims,
        Intent::SetWidth(width) => design.dimensions.width = width,
        Intent::SetHeight(height) => design.dimensions.height = height,
        Intent::SetDepth(depth) => design.dimensions.depth = depth,
        Intent::SetToeKick(toe_kick) => design.dimensions.toe_kick_height = toe_kick,
        Intent::SetStructure(structure) => design.structure = structure,
        Intent::SetShelfCount(count) => design.structure.shelf_count = count,
        Intent::SetMaterials(materials) => design.materials = materials,
        Intent::SetPanelOverride { panel_id, value } => {
            design.overrides.insert(panel_id, value);
        }
        Intent::ClearPanelOverride { panel_id } => {
            if design.overrides.remove(&panel_id).is_none() {
                return Err(CabinetError::invalid(format!("no override for {}", panel_id)));
            }
        }
        Intent::AssignFitting(request) => {
            design
                .fittings
                .retain(|f| !(f.panel_id == request.panel_id && f.role == request.role));
            design.fittings.push(request);
        }
        Intent::RemoveFitting { panel_id, role } => {
            let before = design.fittings.len();
            design
                .fittings
                .retain(|f| !(f.panel_id == panel_id && f.role == role));
            if design.fittings.len() == before {
                return Err(CabinetError::invalid(format!(
                    "no {} requested for {}",
                    role, panel_id
                )));
            }
        }
        Intent::Freeze | Intent::Release | Intent::Unfreeze => {
            return Err(CabinetError::invalid("gate intents do not edit the design"));
        }
    }
    Ok(design)
}

fn transition(cabinet: &Cabinet, intent: Intent) -> CabinetResult<Cabinet> {
    let from = cabinet.gate.state();
    let gate = match intent {
        Intent::Freeze => cabinet.gate.freeze(&cabinet.validation),
        Intent::Release => cabinet.gate.release(&cabinet.validation),
        Intent::Unfreeze => cabinet.gate.unfreeze(),
        _ => return Err(CabinetError::invalid("not a gate intent")),
    };

    match gate {
        Ok(gate) => {
            tracing::info!("Cabinet {} moved {} -> {}", cabinet.id, from, gate.state());
            Ok(Cabinet {
                gate,
                ..cabinet.clone()
            })
        }
        Err(err) => {
            tracing::warn!("Cabinet {} stays {}: {}", cabinet.id, from, err);
            Err(err.into())
        }
    }
}
