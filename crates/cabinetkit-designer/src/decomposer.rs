//! Panel decomposer
//!
//! Splits a cabinet intent into its physical panels with default materials,
//! per-panel overrides and placement in the carcass. Geometry depends on the
//! real thickness of the sides, top, bottom and dividers, so panels are
//! built in dependency order and each one's thickness is resolved as soon
//! as its materials are known.
//!
//! Out-of-range input never fails here; the resulting sizes are checked by
//! the validators. Shelf and divider counts are clamped to the machine's
//! job limit and door counts to the supported maximum, so a wild count
//! lays out a bounded carcass that validation then rejects.

use crate::material_stack::{internal_depth, MaterialStack};
use cabinetkit_core::{
    tolerance, CabinetPanel, DesignIntent, Face, JointType, PanelEdge, PanelEdges, PanelFaces,
    PanelRole, Placement, ToleranceKind,
};
use cabinetkit_settings::ManufacturingConfig;

/// Edges banded by default, in the panel's local frame
pub fn default_banded_edges(role: PanelRole) -> &'static [PanelEdge] {
    match role {
        PanelRole::LeftSide | PanelRole::RightSide | PanelRole::Divider => &[PanelEdge::Right],
        PanelRole::Top | PanelRole::Bottom | PanelRole::Shelf => &[PanelEdge::Bottom],
        PanelRole::Back => &[],
        PanelRole::Door => &[
            PanelEdge::Top,
            PanelEdge::Bottom,
            PanelEdge::Left,
            PanelEdge::Right,
        ],
    }
}

/// Carcass measures the validators need alongside the panels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarcassMeasures {
    pub body_height: f64,
    /// Clear width between the sides
    pub inner_width: f64,
    /// Clear height between bottom and top
    pub inner_height: f64,
    pub back_allowance: f64,
    /// Depth available to shelves and dividers (may be <= 0)
    pub internal_depth: f64,
    /// Clear width of one compartment between dividers
    pub compartment_width: f64,
    /// Centre-to-centre pitch of evenly spaced shelves
    pub shelf_pitch: f64,
    /// Smallest clear gap between a shelf and its neighbour (pitch minus
    /// the thickest shelf)
    pub shelf_gap: f64,
    /// Shelves actually laid out
    pub shelf_count: u32,
    /// Dividers actually laid out
    pub divider_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub panels: Vec<CabinetPanel>,
    pub measures: CarcassMeasures,
}

pub struct PanelDecomposer<'a> {
    intent: &'a DesignIntent,
    config: &'a ManufacturingConfig,
    stack: &'a MaterialStack<'a>,
}

impl<'a> PanelDecomposer<'a> {
    pub fn new(
        intent: &'a DesignIntent,
        config: &'a ManufacturingConfig,
        stack: &'a MaterialStack<'a>,
    ) -> Self {
        Self {
            intent,
            config,
            stack,
        }
    }

    pub fn decompose(&self) -> Decomposition {
        let dims = &self.intent.dimensions;
        let structure = &self.intent.structure;
        let body = dims.body_height();
        let shelf_count = self.config.machine.clamp_count(structure.shelf_count);
        let divider_count = self.config.machine.clamp_count(structure.divider_count);

        let left = self.panel(PanelRole::LeftSide, 1, dims.depth, body);
        let mut right = self.panel(PanelRole::RightSide, 1, dims.depth, body);
        let t_left = self.stack.real_thickness(&left);
        let t_right = self.stack.real_thickness(&right);
        right.placement = Placement::new(dims.width - t_right, 0.0, 0.0);

        let back_allowance = if structure.has_back_panel {
            let category = self.stack.core(&left.core_material_id).record.category;
            self.config.back_panel.allowance(category)
        } else {
            0.0
        };
        let carcass_depth = dims.depth - back_allowance;
        let inner_width = dims.width - t_left - t_right;

        let mut top = self.horizontal(
            PanelRole::Top,
            structure.top_joint,
            inner_width,
            carcass_depth,
            (t_left, t_right),
        );
        let mut bottom = self.horizontal(
            PanelRole::Bottom,
            structure.bottom_joint,
            inner_width,
            carcass_depth,
            (t_left, t_right),
        );
        let t_top = self.stack.real_thickness(&top);
        let t_bottom = self.stack.real_thickness(&bottom);
        top.placement.y = body - t_top;
        bottom.placement.y = 0.0;
        let inner_height = body - t_top - t_bottom;

        let depth_inside = internal_depth(dims.depth, back_allowance, &self.config.setbacks);

        let mut panels = vec![left, right, top, bottom];

        if structure.has_back_panel {
            let mut back = self.panel(PanelRole::Back, 1, dims.width, body);
            back.placement = Placement::new(0.0, 0.0, dims.depth - back_allowance);
            panels.push(back);
        }

        // dividers first: shelf width depends on their thickness
        let mut dividers: Vec<CabinetPanel> = (1..=divider_count)
            .map(|index| self.panel(PanelRole::Divider, index, depth_inside, body))
            .collect();
        let divider_thicknesses: Vec<f64> = dividers
            .iter()
            .map(|d| self.stack.real_thickness(d))
            .collect();
        let divider_total: f64 = divider_thicknesses.iter().sum();
        let compartment_width = (inner_width - divider_total) / (f64::from(divider_count) + 1.0);
        let mut x = t_left;
        for (divider, thickness) in dividers.iter_mut().zip(&divider_thicknesses) {
            x += compartment_width;
            divider.placement = Placement::new(x, 0.0, self.config.setbacks.front);
            x += thickness;
        }

        let shelf_pitch = inner_height / (f64::from(shelf_count) + 1.0);
        let mut thickest_shelf: f64 = 0.0;
        for index in 1..=shelf_count {
            let mut shelf = self.panel(PanelRole::Shelf, index, 0.0, depth_inside);
            let category = self.stack.core(&shelf.core_material_id).record.category;
            let clearance = tolerance(category, ToleranceKind::ShelfSideClearance).mm();
            shelf.finish_width = inner_width - divider_total - 2.0 * clearance;
            let y = self
                .intent
                .override_for(&shelf.id)
                .and_then(|o| o.position)
                .unwrap_or(t_bottom + f64::from(index) * shelf_pitch);
            shelf.placement = Placement::new(t_left + clearance, y, self.config.setbacks.front);
            thickest_shelf = thickest_shelf.max(self.stack.real_thickness(&shelf));
            panels.push(shelf);
        }

        panels.extend(dividers);
        panels.extend(self.doors(body));

        tracing::debug!(
            "Decomposed {} panels (internal depth {:.1} mm)",
            panels.len(),
            depth_inside
        );

        Decomposition {
            panels,
            measures: CarcassMeasures {
                body_height: body,
                inner_width,
                inner_height,
                back_allowance,
                internal_depth: depth_inside,
                compartment_width,
                shelf_pitch,
                shelf_gap: shelf_pitch - thickest_shelf,
                shelf_count,
                divider_count,
            },
        }
    }

    /// Top or bottom panel for a joint type
    fn horizontal(
        &self,
        role: PanelRole,
        joint: JointType,
        inner_width: f64,
        depth: f64,
        (t_left, t_right): (f64, f64),
    ) -> CabinetPanel {
        let width = inner_width + joint.width_gain_per_end() * (t_left + t_right);
        let mut panel = self.panel(role, 1, width, depth);
        panel.placement.x = match joint {
            JointType::Inset => t_left,
            JointType::Overlay => 0.0,
        };
        panel
    }

    fn doors(&self, body: f64) -> Vec<CabinetPanel> {
        let count = self
            .intent
            .structure
            .door_count
            .min(self.config.doors.max_doors);
        if count == 0 {
            return Vec::new();
        }
        let width = self.intent.dimensions.width;
        let mut doors = Vec::with_capacity(count as usize);
        for index in 1..=count {
            let mut door = self.panel(PanelRole::Door, index, 0.0, 0.0);
            let category = self.stack.core(&door.core_material_id).record.category;
            let gap = self.config.doors.gap + tolerance(category, ToleranceKind::DoorGap).mm();
            door.finish_width = (width - (f64::from(count) + 1.0) * gap) / f64::from(count);
            door.finish_height = body - 2.0 * gap;
            let thickness = self.stack.real_thickness(&door);
            door.placement = Placement::new(
                gap + f64::from(index - 1) * (door.finish_width + gap),
                gap,
                -thickness,
            );
            doors.push(door);
        }
        doors
    }

    /// A panel with default materials and the intent's override applied
    fn panel(&self, role: PanelRole, index: u32, width: f64, height: f64) -> CabinetPanel {
        let materials = &self.intent.materials;
        let mut panel = CabinetPanel::new(role, index, width, height);

        match role {
            PanelRole::Back => {
                panel.core_material_id = self.config.back_panel.core_material.clone();
            }
            PanelRole::LeftSide
            | PanelRole::RightSide
            | PanelRole::Top
            | PanelRole::Bottom
            | PanelRole::Shelf
            | PanelRole::Divider
            | PanelRole::Door => {
                panel.core_material_id = materials.default_core.clone();
                panel.faces = PanelFaces::both(&materials.default_surface);
            }
        }
        panel.edges = PanelEdges::on(default_banded_edges(role), &materials.default_edge);

        if let Some(over) = self.intent.override_for(&panel.id) {
            if let Some(core) = &over.core {
                panel.core_material_id = core.clone();
            }
            for (face, surface) in &over.faces {
                match face {
                    Face::A => panel.faces.face_a = surface.clone(),
                    Face::B => panel.faces.face_b = surface.clone(),
                }
            }
            for (edge, band) in &over.edges {
                panel.edges.set(*edge, band.clone());
            }
        }
        panel
    }
}

/// Decompose an intent with a material stack
pub fn decompose(
    intent: &DesignIntent,
    config: &ManufacturingConfig,
    stack: &MaterialStack<'_>,
) -> Decomposition {
    PanelDecomposer::new(intent, config, stack).decompose()
}
