//! DXF generator
//!
//! Writes the operation graph as ASCII DXF R12 using the machine layer
//! convention:
//!
//! | Layer | Entity | Content |
//! |---|---|---|
//! | `CUT_OUT` | closed POLYLINE | cut outline |
//! | `DRILL_V_{d}_D{depth}` | CIRCLE | face bores and non-35 pockets |
//! | `DRILL_H_{d}_Z{z}_D{depth}` | LINE | edge bores, entry point inward |
//! | `SAW_GROOVE_D{depth}` | LINE | groove centre line |
//! | `HINGE_CUP_35` | CIRCLE | 35 mm hinge cups |
//! | `ANNOTATION` | TEXT | panel id and cut size |
//!
//! Face B operations are mirrored here, and only here: `x' = width - x`.
//! Output carries no handles or timestamps, so identical graphs produce
//! identical bytes.

use cabinetkit_core::units::{approx_eq, format_compact, format_length};
use cabinetkit_core::{Face, MachineOperation, OperationGraph, PanelEdge, PanelOperations};
use cabinetkit_settings::DxfSettings;
use std::collections::BTreeSet;

pub const LAYER_CUT_OUT: &str = "CUT_OUT";
pub const LAYER_HINGE_CUP: &str = "HINGE_CUP_35";
pub const LAYER_ANNOTATION: &str = "ANNOTATION";

const HINGE_CUP_DIAMETER: f64 = 35.0;

/// Mirror a face B x coordinate across the panel width
pub fn mirror_x(x: f64, panel_width: f64) -> f64 {
    panel_width - x
}

/// Layer an operation is written to
pub fn layer_for(op: &MachineOperation) -> String {
    match op {
        MachineOperation::DrillVertical {
            diameter, depth, ..
        } => drill_v_layer(*diameter, *depth),
        MachineOperation::Pocket {
            diameter, depth, ..
        } => {
            if approx_eq(*diameter, HINGE_CUP_DIAMETER) {
                LAYER_HINGE_CUP.to_string()
            } else {
                drill_v_layer(*diameter, *depth)
            }
        }
        MachineOperation::DrillHorizontal {
            diameter, z, depth, ..
        } => format!(
            "DRILL_H_{}_Z{}_D{}",
            format_compact(*diameter),
            format_compact(*z),
            format_compact(*depth)
        ),
        MachineOperation::Groove { depth, .. } => {
            format!("SAW_GROOVE_D{}", format_compact(*depth))
        }
    }
}

fn drill_v_layer(diameter: f64, depth: f64) -> String {
    format!(
        "DRILL_V_{}_D{}",
        format_compact(diameter),
        format_compact(depth)
    )
}

/// A drawing entity in document coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DxfEntity {
    Polyline {
        layer: String,
        points: Vec<(f64, f64)>,
    },
    Circle {
        layer: String,
        center: (f64, f64),
        radius: f64,
    },
    Line {
        layer: String,
        start: (f64, f64),
        end: (f64, f64),
    },
    Text {
        layer: String,
        position: (f64, f64),
        height: f64,
        value: String,
    },
}

impl DxfEntity {
    pub fn layer(&self) -> &str {
        match self {
            Self::Polyline { layer, .. }
            | Self::Circle { layer, .. }
            | Self::Line { layer, .. }
            | Self::Text { layer, .. } => layer,
        }
    }
}

/// Generator for DXF panel and job documents
pub struct DxfGenerator {
    settings: DxfSettings,
}

impl DxfGenerator {
    /// Create a new DxfGenerator with the given layout settings
    pub fn new(settings: DxfSettings) -> Self {
        Self { settings }
    }

    /// One document for one panel, origin at the panel's lower-left corner
    pub fn panel_document(&self, panel: &PanelOperations) -> String {
        write_document(&self.panel_entities(panel, 0.0))
    }

    /// One document for the whole job, panels laid out left to right
    pub fn job_document(&self, graph: &OperationGraph) -> String {
        let mut entities = Vec::new();
        let mut offset = 0.0;
        for panel in &graph.panels {
            entities.extend(self.panel_entities(panel, offset));
            offset += panel.width + self.settings.layout_gap;
        }
        write_document(&entities)
    }

    /// Entities for one panel, shifted right by `offset_x`
    ///
    /// The face B mirror is applied in panel coordinates before the shift.
    pub fn panel_entities(&self, panel: &PanelOperations, offset_x: f64) -> Vec<DxfEntity> {
        let place = |x: f64, y: f64, face: Face| -> (f64, f64) {
            let x = match face {
                Face::A => x,
                Face::B => mirror_x(x, panel.width),
            };
            (x + offset_x, y)
        };

        let mut entities = Vec::with_capacity(panel.operations.len() + 2);
        entities.push(DxfEntity::Polyline {
            layer: LAYER_CUT_OUT.to_string(),
            points: vec![
                (offset_x, 0.0),
                (offset_x + panel.width, 0.0),
                (offset_x + panel.width, panel.height),
                (offset_x, panel.height),
            ],
        });

        for op in &panel.operations {
            let layer = layer_for(op);
            let entity = match op {
                MachineOperation::DrillVertical {
                    x,
                    y,
                    diameter,
                    face,
                    ..
                }
                | MachineOperation::Pocket {
                    x,
                    y,
                    diameter,
                    face,
                    ..
                } => DxfEntity::Circle {
                    layer,
                    center: place(*x, *y, *face),
                    radius: diameter / 2.0,
                },
                MachineOperation::DrillHorizontal {
                    x,
                    y,
                    depth,
                    edge,
                    face,
                    ..
                } => {
                    let (dx, dy) = inward(*edge);
                    DxfEntity::Line {
                        layer,
                        start: place(*x, *y, *face),
                        end: place(x + dx * depth, y + dy * depth, *face),
                    }
                }
                MachineOperation::Groove {
                    x_start,
                    y_start,
                    x_end,
                    y_end,
                    face,
                    ..
                } => DxfEntity::Line {
                    layer,
                    start: place(*x_start, *y_start, *face),
                    end: place(*x_end, *y_end, *face),
                },
            };
            entities.push(entity);
        }

        let height = self.settings.text_height;
        entities.push(DxfEntity::Text {
            layer: LAYER_ANNOTATION.to_string(),
            position: (offset_x + height, height),
            height,
            value: format!(
                "{} {} x {} x {}",
                panel.panel_id,
                format_compact(panel.width),
                format_compact(panel.height),
                format_compact(panel.thickness)
            ),
        });
        entities
    }
}

impl Default for DxfGenerator {
    fn default() -> Self {
        Self::new(DxfSettings::default())
    }
}

/// Unit vector pointing from an edge into the panel
fn inward(edge: PanelEdge) -> (f64, f64) {
    match edge {
        PanelEdge::Left => (1.0, 0.0),
        PanelEdge::Right => (-1.0, 0.0),
        PanelEdge::Bottom => (0.0, 1.0),
        PanelEdge::Top => (0.0, -1.0),
    }
}

fn layer_color(layer: &str) -> u8 {
    if layer == LAYER_CUT_OUT {
        7
    } else if layer == LAYER_HINGE_CUP {
        6
    } else if layer == LAYER_ANNOTATION {
        8
    } else if layer.starts_with("DRILL_V_") {
        1
    } else if layer.starts_with("DRILL_H_") {
        3
    } else {
        5
    }
}

fn pair(out: &mut String, code: u16, value: &str) {
    out.push_str(&format!("{}\n{}\n", code, value));
}

fn point(out: &mut String, (x, y): (f64, f64), first_code: u16) {
    pair(out, first_code, &format_length(x));
    pair(out, first_code + 10, &format_length(y));
    pair(out, first_code + 20, &format_length(0.0));
}

/// Serialize entities as a complete R12 document
fn write_document(entities: &[DxfEntity]) -> String {
    let layers: BTreeSet<&str> = entities.iter().map(|e| e.layer()).collect();
    let mut out = String::new();

    // Header
    pair(&mut out, 0, "SECTION");
    pair(&mut out, 2, "HEADER");
    pair(&mut out, 9, "$ACADVER");
    pair(&mut out, 1, "AC1009");
    pair(&mut out, 9, "$INSUNITS");
    pair(&mut out, 70, "4");
    pair(&mut out, 0, "ENDSEC");

    // Tables
    pair(&mut out, 0, "SECTION");
    pair(&mut out, 2, "TABLES");
    pair(&mut out, 0, "TABLE");
    pair(&mut out, 2, "LTYPE");
    pair(&mut out, 70, "1");
    pair(&mut out, 0, "LTYPE");
    pair(&mut out, 2, "CONTINUOUS");
    pair(&mut out, 70, "0");
    pair(&mut out, 3, "Solid line");
    pair(&mut out, 72, "65");
    pair(&mut out, 73, "0");
    pair(&mut out, 40, "0.0");
    pair(&mut out, 0, "ENDTAB");
    pair(&mut out, 0, "TABLE");
    pair(&mut out, 2, "LAYER");
    pair(&mut out, 70, &layers.len().to_string());
    for layer in &layers {
        pair(&mut out, 0, "LAYER");
        pair(&mut out, 2, layer);
        pair(&mut out, 70, "0");
        pair(&mut out, 62, &layer_color(layer).to_string());
        pair(&mut out, 6, "CONTINUOUS");
    }
    pair(&mut out, 0, "ENDTAB");
    pair(&mut out, 0, "ENDSEC");

    // Entities
    pair(&mut out, 0, "SECTION");
    pair(&mut out, 2, "ENTITIES");
    for entity in entities {
        match entity {
            DxfEntity::Polyline { layer, points } => {
                pair(&mut out, 0, "POLYLINE");
                pair(&mut out, 8, layer);
                pair(&mut out, 66, "1");
                point(&mut out, (0.0, 0.0), 10);
                pair(&mut out, 70, "1");
                for vertex in points {
                    pair(&mut out, 0, "VERTEX");
                    pair(&mut out, 8, layer);
                    point(&mut out, *vertex, 10);
                }
                pair(&mut out, 0, "SEQEND");
                pair(&mut out, 8, layer);
            }
            DxfEntity::Circle {
                layer,
                center,
                radius,
            } => {
                pair(&mut out, 0, "CIRCLE");
                pair(&mut out, 8, layer);
                point(&mut out, *center, 10);
                pair(&mut out, 40, &format_length(*radius));
            }
            DxfEntity::Line { layer, start, end } => {
                pair(&mut out, 0, "LINE");
                pair(&mut out, 8, layer);
                point(&mut out, *start, 10);
                point(&mut out, *end, 11);
            }
            DxfEntity::Text {
                layer,
                position,
                height,
                value,
            } => {
                pair(&mut out, 0, "TEXT");
                pair(&mut out, 8, layer);
                point(&mut out, *position, 10);
                pair(&mut out, 40, &format_length(*height));
                pair(&mut out, 1, value);
            }
        }
    }
    pair(&mut out, 0, "ENDSEC");
    pair(&mut out, 0, "EOF");
    out
}
