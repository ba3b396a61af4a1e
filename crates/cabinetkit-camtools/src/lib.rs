//! # CabinetKit CAM Tools
//!
//! This crate turns a computed cabinet into machine data and shop
//! documents.
//!
//! ## Tools Included
//!
//! - **Operation Graph**: System-32 pin rows, dowel joints, back panel groove,
//!   hinge cups and plate holes per panel
//! - **DXF Generator**: R12 documents per panel or per job on the machine
//!   layer convention, with the face B mirror applied at emission
//! - **Exports**: cut list CSV, bill of materials, manifest JSON and the
//!   neutral CNC program, each gated by the cabinet's release state

pub mod dxf_generator;
pub mod error;
pub mod exports;
pub mod operation_graph;

pub use dxf_generator::{layer_for, mirror_x, DxfEntity, DxfGenerator};
pub use error::{CamToolError, CamToolResult};
pub use exports::{
    cut_list_csv, export, export_panel_dxf, Artifact, Bom, BomTotals, BoardLine, CncProgram,
    EdgeLine, ExportContext, FittingLine, Manifest, ManifestPanel, SurfaceLine,
};
pub use operation_graph::{
    build_operation_graph, hinged_left, OperationGraphBuilder, MAX_ROW_HOLES,
};
