//! Operation graph builder
//!
//! Turns decomposed, resolved panels into machine-neutral operations:
//! System-32 shelf pin rows, dowel joints between the sides and the
//! top/bottom panels, the back panel groove, hinge cups and hinge mounting
//! plate holes.
//!
//! Layouts are worked out in each panel's finish frame and stored in its
//! cut-substrate frame (shifted by the left and bottom band thickness).
//! Face B operations are stored in the same frame as face A.

use cabinetkit_core::units::EPSILON_MM;
use cabinetkit_core::{
    tolerance, CabinetPanel, CoreMaterial, DesignIntent, Face, JointType, MachineOperation,
    MaterialCategory, MaterialRegistries, OperationGraph, PanelEdge, PanelOperations, PanelRole,
    ToleranceKind,
};
use cabinetkit_settings::ManufacturingConfig;

/// Offset of the two mounting plate holes from the cup centre line
const PLATE_HOLE_HALF_SPACING: f64 = 16.0;

/// Most holes in one System-32 row (about 16 m of carcass at 32 mm pitch)
pub const MAX_ROW_HOLES: usize = 512;

/// Which carcass joint a horizontal panel forms with the sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JointEnd {
    Top,
    Bottom,
}

/// Finish to cut-substrate frame conversion for one panel
#[derive(Debug, Clone, Copy)]
struct PanelFrame {
    left: f64,
    bottom: f64,
    cut_width: f64,
    cut_height: f64,
}

impl PanelFrame {
    fn point(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.left, y - self.bottom)
    }

    /// Entry point of an edge bore at `along` (finish coordinate along the edge)
    fn edge_entry(&self, edge: PanelEdge, along: f64) -> (f64, f64) {
        match edge {
            PanelEdge::Left => (0.0, along - self.bottom),
            PanelEdge::Right => (self.cut_width, along - self.bottom),
            PanelEdge::Bottom => (along - self.left, 0.0),
            PanelEdge::Top => (along - self.left, self.cut_height),
        }
    }
}

/// Carcass values shared by every panel layout
#[derive(Debug, Clone, Copy)]
struct Carcass {
    depth: f64,
    body_height: f64,
    left_thickness: f64,
    right_thickness: f64,
    top_thickness: f64,
    bottom_thickness: f64,
    top_depth: f64,
    bottom_depth: f64,
    back_allowance: f64,
}

/// Builds the operation graph for one cabinet
pub struct OperationGraphBuilder<'a> {
    intent: &'a DesignIntent,
    panels: &'a [CabinetPanel],
    materials: &'a MaterialRegistries,
    config: &'a ManufacturingConfig,
}

impl<'a> OperationGraphBuilder<'a> {
    pub fn new(
        intent: &'a DesignIntent,
        panels: &'a [CabinetPanel],
        materials: &'a MaterialRegistries,
        config: &'a ManufacturingConfig,
    ) -> Self {
        Self {
            intent,
            panels,
            materials,
            config,
        }
    }

    /// Operations for every panel, in panel order
    pub fn build(&self) -> OperationGraph {
        let carcass = self.carcass();
        let panels: Vec<PanelOperations> = self
            .panels
            .iter()
            .map(|panel| PanelOperations {
                panel_id: panel.id.clone(),
                role: panel.role,
                width: panel.computed.cut_width,
                height: panel.computed.cut_height,
                thickness: panel.computed.real_thickness,
                operations: self.operations_for(panel, &carcass),
            })
            .collect();

        let graph = OperationGraph { panels };
        tracing::debug!(
            "Built operation graph: {} panels, {} operations",
            graph.panels.len(),
            graph.operation_count()
        );
        graph
    }

    fn operations_for(&self, panel: &CabinetPanel, carcass: &Carcass) -> Vec<MachineOperation> {
        match panel.role {
            PanelRole::LeftSide => self.side_operations(panel, carcass, Face::A),
            PanelRole::RightSide => self.side_operations(panel, carcass, Face::B),
            PanelRole::Top => self.joint_operations(panel, carcass, JointEnd::Top),
            PanelRole::Bottom => self.joint_operations(panel, carcass, JointEnd::Bottom),
            PanelRole::Divider => self.divider_operations(panel, carcass),
            PanelRole::Door => self.door_operations(panel),
            PanelRole::Back | PanelRole::Shelf => Vec::new(),
        }
    }

    fn side_operations(
        &self,
        panel: &CabinetPanel,
        carcass: &Carcass,
        interior: Face,
    ) -> Vec<MachineOperation> {
        let structure = &self.intent.structure;
        let frame = self.frame(panel);
        let category = self.core(panel).category;
        let mut ops = Vec::new();

        if structure.has_back_panel {
            let back = &self.config.back_panel;
            let (x, _) = frame.point(back.groove_offset(category) + back.thickness / 2.0, 0.0);
            // full height of the substrate
            ops.push(MachineOperation::Groove {
                x_start: x,
                y_start: 0.0,
                x_end: x,
                y_end: frame.cut_height,
                width: back.groove_width(category),
                depth: back.groove_depth,
                face: interior,
            });
        }

        for (end, joint) in [
            (JointEnd::Bottom, structure.bottom_joint),
            (JointEnd::Top, structure.top_joint),
        ] {
            ops.extend(self.side_joint(&frame, carcass, category, end, joint, interior));
        }

        if structure.shelf_count > 0 {
            let front = carcass.depth - self.config.system32.row_inset;
            let back = carcass.back_allowance + self.config.system32.row_inset;
            let depth = self.config.system32.pin_depth;
            ops.extend(self.pin_rows(&frame, carcass, category, &[front, back], depth, &[interior]));
        }

        ops.extend(self.plate_holes(&frame, carcass, panel.role, interior));
        ops
    }

    /// Dowel bores in a side for one carcass joint
    fn side_joint(
        &self,
        frame: &PanelFrame,
        carcass: &Carcass,
        category: MaterialCategory,
        end: JointEnd,
        joint: JointType,
        interior: Face,
    ) -> Vec<MachineOperation> {
        let joinery = &self.config.joinery;
        let diameter = joinery.dowel_diameter + tolerance(category, ToleranceKind::DowelFit).mm();
        let joint_depth = match end {
            JointEnd::Top => carcass.top_depth,
            JointEnd::Bottom => carcass.bottom_depth,
        };
        let positions = [
            carcass.depth - joint_depth + joinery.end_offset,
            carcass.depth - joinery.end_offset,
        ];

        match joint {
            JointType::Inset => {
                let y = match end {
                    JointEnd::Bottom => carcass.bottom_thickness / 2.0,
                    JointEnd::Top => carcass.body_height - carcass.top_thickness / 2.0,
                };
                positions
                    .iter()
                    .map(|&x| {
                        let (x, y) = frame.point(x, y);
                        MachineOperation::DrillVertical {
                            x,
                            y,
                            diameter,
                            depth: joinery.face_depth,
                            face: interior,
                        }
                    })
                    .collect()
            }
            JointType::Overlay => {
                let edge = match end {
                    JointEnd::Bottom => PanelEdge::Bottom,
                    JointEnd::Top => PanelEdge::Top,
                };
                let thickness = match interior {
                    Face::A => carcass.left_thickness,
                    Face::B => carcass.right_thickness,
                };
                positions
                    .iter()
                    .map(|&along| {
                        let (x, y) = frame.edge_entry(edge, along);
                        MachineOperation::DrillHorizontal {
                            x,
                            y,
                            z: thickness / 2.0,
                            diameter,
                            depth: joinery.edge_depth,
                            edge,
                            face: interior,
                        }
                    })
                    .collect()
            }
        }
    }

    /// Dowel bores in a top or bottom panel
    fn joint_operations(
        &self,
        panel: &CabinetPanel,
        carcass: &Carcass,
        end: JointEnd,
    ) -> Vec<MachineOperation> {
        let joinery = &self.config.joinery;
        let frame = self.frame(panel);
        let category = self.core(panel).category;
        let diameter = joinery.dowel_diameter + tolerance(category, ToleranceKind::DowelFit).mm();
        let joint = match end {
            JointEnd::Top => self.intent.structure.top_joint,
            JointEnd::Bottom => self.intent.structure.bottom_joint,
        };
        let rows = [
            joinery.end_offset,
            panel.finish_height - joinery.end_offset,
        ];

        let mut ops = Vec::new();
        match joint {
            JointType::Inset => {
                for edge in [PanelEdge::Left, PanelEdge::Right] {
                    for &along in &rows {
                        let (x, y) = frame.edge_entry(edge, along);
                        ops.push(MachineOperation::DrillHorizontal {
                            x,
                            y,
                            z: panel.computed.real_thickness / 2.0,
                            diameter,
                            depth: joinery.edge_depth,
                            edge,
                            face: Face::A,
                        });
                    }
                }
            }
            JointType::Overlay => {
                let columns = [
                    carcass.left_thickness / 2.0,
                    panel.finish_width - carcass.right_thickness / 2.0,
                ];
                for &column in &columns {
                    for &row in &rows {
                        let (x, y) = frame.point(column, row);
                        ops.push(MachineOperation::DrillVertical {
                            x,
                            y,
                            diameter,
                            depth: joinery.face_depth,
                            face: Face::A,
                        });
                    }
                }
            }
        }
        ops
    }

    fn divider_operations(&self, panel: &CabinetPanel, carcass: &Carcass) -> Vec<MachineOperation> {
        if self.intent.structure.shelf_count == 0 {
            return Vec::new();
        }
        let frame = self.frame(panel);
        let category = self.core(panel).category;
        let inset = self.config.system32.row_inset;
        let rows = [panel.finish_width - inset, inset];
        // bored from both faces, so the holes must not meet
        let depth = self
            .config
            .system32
            .pin_depth
            .min(panel.computed.real_thickness / 2.0 - 1.0);
        self.pin_rows(&frame, carcass, category, &rows, depth, &[Face::A, Face::B])
    }

    /// System-32 rows at the given finish-frame x positions
    fn pin_rows(
        &self,
        frame: &PanelFrame,
        carcass: &Carcass,
        category: MaterialCategory,
        rows: &[f64],
        depth: f64,
        faces: &[Face],
    ) -> Vec<MachineOperation> {
        let system32 = &self.config.system32;
        let diameter = system32.pin_diameter + tolerance(category, ToleranceKind::ShelfPinFit).mm();
        let first = carcass.bottom_thickness + system32.reference_offset;
        let last = carcass.body_height - carcass.top_thickness - system32.reference_offset;

        if !(first.is_finite() && last.is_finite()) || last + EPSILON_MM < first {
            return Vec::new();
        }
        // saturating float to int cast; the cap keeps a runaway height bounded
        let holes = ((last - first + EPSILON_MM) / system32.pitch).floor() as usize + 1;
        if holes > MAX_ROW_HOLES {
            tracing::warn!(
                "System-32 row of {} holes capped at {}",
                holes,
                MAX_ROW_HOLES
            );
        }
        let heights: Vec<f64> = (0..holes.min(MAX_ROW_HOLES))
            .map(|i| first + system32.pitch * i as f64)
            .collect();

        let mut ops = Vec::new();
        for &face in faces {
            for &x in rows {
                for &y in &heights {
                    let (x, y) = frame.point(x, y);
                    ops.push(MachineOperation::DrillVertical {
                        x,
                        y,
                        diameter,
                        depth,
                        face,
                    });
                }
            }
        }
        ops
    }

    /// Hinge mounting plate holes on the hinge-side carcass side
    fn plate_holes(
        &self,
        frame: &PanelFrame,
        carcass: &Carcass,
        role: PanelRole,
        interior: Face,
    ) -> Vec<MachineOperation> {
        let hinge = &self.config.hinge;
        let door_count = self.door_count();
        let x = carcass.depth - hinge.plate_setback;

        let mut ops = Vec::new();
        for door in self.panels.iter().filter(|p| p.role == PanelRole::Door) {
            if !hinge.fits(door.finish_height) {
                continue;
            }
            let side = if hinged_left(door.index, door_count) {
                PanelRole::LeftSide
            } else {
                PanelRole::RightSide
            };
            if side != role {
                continue;
            }
            for cup in hinge.hinge_positions(door.finish_height) {
                let centre = door.placement.y + cup;
                for y in [
                    centre - PLATE_HOLE_HALF_SPACING,
                    centre + PLATE_HOLE_HALF_SPACING,
                ] {
                    let (x, y) = frame.point(x, y);
                    ops.push(MachineOperation::DrillVertical {
                        x,
                        y,
                        diameter: hinge.plate_hole_diameter,
                        depth: hinge.plate_hole_depth,
                        face: interior,
                    });
                }
            }
        }
        ops
    }

    /// Hinge cups, bored from the door's interior face
    ///
    /// A door too short for the hinge layout gets no cups; validation
    /// reports it.
    fn door_operations(&self, panel: &CabinetPanel) -> Vec<MachineOperation> {
        let hinge = &self.config.hinge;
        if !hinge.fits(panel.finish_height) {
            return Vec::new();
        }
        let frame = self.frame(panel);
        let category = self.core(panel).category;
        let depth = hinge.cup_depth + tolerance(category, ToleranceKind::HingeCupClearance).mm();
        let x = if hinged_left(panel.index, self.door_count()) {
            hinge.edge_distance
        } else {
            panel.finish_width - hinge.edge_distance
        };

        hinge
            .hinge_positions(panel.finish_height)
            .into_iter()
            .map(|y| {
                let (x, y) = frame.point(x, y);
                MachineOperation::Pocket {
                    x,
                    y,
                    diameter: hinge.cup_diameter,
                    depth,
                    face: Face::B,
                }
            })
            .collect()
    }

    fn carcass(&self) -> Carcass {
        let dims = &self.intent.dimensions;
        let thickness = |role: PanelRole| {
            self.panel_with_role(role)
                .map(|p| p.computed.real_thickness)
                .unwrap_or(0.0)
        };
        let depth_of = |role: PanelRole| {
            self.panel_with_role(role)
                .map(|p| p.finish_height)
                .unwrap_or(0.0)
        };
        let back_allowance = if self.intent.structure.has_back_panel {
            let category = self
                .panel_with_role(PanelRole::LeftSide)
                .map(|p| self.core(p).category)
                .unwrap_or(self.materials.cores.fallback().category);
            self.config.back_panel.allowance(category)
        } else {
            0.0
        };

        Carcass {
            depth: dims.depth,
            body_height: dims.body_height(),
            left_thickness: thickness(PanelRole::LeftSide),
            right_thickness: thickness(PanelRole::RightSide),
            top_thickness: thickness(PanelRole::Top),
            bottom_thickness: thickness(PanelRole::Bottom),
            top_depth: depth_of(PanelRole::Top),
            bottom_depth: depth_of(PanelRole::Bottom),
            back_allowance,
        }
    }

    /// Doors actually laid out, which may be fewer than requested
    fn door_count(&self) -> u32 {
        let doors = self.panels.iter().filter(|p| p.role == PanelRole::Door).count();
        u32::try_from(doors).unwrap_or(u32::MAX)
    }

    fn panel_with_role(&self, role: PanelRole) -> Option<&CabinetPanel> {
        self.panels.iter().find(|p| p.role == role)
    }

    // Unknown ids were reported during resolution; lay out with the fallback.
    fn core(&self, panel: &CabinetPanel) -> &CoreMaterial {
        self.materials
            .cores
            .get(&panel.core_material_id)
            .unwrap_or_else(|_| self.materials.cores.fallback())
    }

    fn edge_thickness(&self, panel: &CabinetPanel, edge: PanelEdge) -> f64 {
        panel
            .edges
            .get(edge)
            .map(|id| {
                self.materials
                    .edges
                    .get(id)
                    .unwrap_or_else(|_| self.materials.edges.fallback())
                    .thickness
            })
            .unwrap_or(0.0)
    }

    fn frame(&self, panel: &CabinetPanel) -> PanelFrame {
        PanelFrame {
            left: self.edge_thickness(panel, PanelEdge::Left),
            bottom: self.edge_thickness(panel, PanelEdge::Bottom),
            cut_width: panel.computed.cut_width,
            cut_height: panel.computed.cut_height,
        }
    }
}

/// Whether a door hangs on the left side; with two doors the second hangs right
pub fn hinged_left(door_index: u32, door_count: u32) -> bool {
    !(door_count >= 2 && door_index == door_count)
}

/// Build the operation graph for a set of resolved panels
pub fn build_operation_graph(
    intent: &DesignIntent,
    panels: &[CabinetPanel],
    materials: &MaterialRegistries,
    config: &ManufacturingConfig,
) -> OperationGraph {
    OperationGraphBuilder::new(intent, panels, materials, config).build()
}
