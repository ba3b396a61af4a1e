//! # CabinetKit Designer
//!
//! This crate turns a parametric design intent into a fully computed
//! cabinet and moves it through the release gate.
//!
//! ## Core Components
//!
//! - **Material Stack**: real thickness from core, surfaces and glue; cut
//!   sizes from finish sizes and edge bands
//! - **Decomposer**: sides, top, bottom, back, shelves, dividers and doors
//!   from outer dimensions and structure
//! - **Validation**: dimension bounds, structural spacing and the machine
//!   envelope, reported as results rather than errors
//! - **Fittings**: requested hardware checked for fit, missing hardware
//!   assigned from the catalogue ranking
//! - **Structural Check**: panel load against the rated capacity of its
//!   hardware
//! - **Reducer**: intents applied to immutable snapshots
//!
//! ## Architecture
//!
//! ```text
//! Intent ──> reducer ──> Workshop::compute
//!                          ├── decomposer
//!                          ├── material stack
//!                          ├── validation
//!                          ├── fittings + structural check
//!                          └── operation graph (camtools)
//! ```

pub mod decomposer;
pub mod error;
pub mod fittings;
pub mod material_stack;
pub mod pipeline;
pub mod reducer;
pub mod structural;
pub mod validation;

pub use decomposer::{
    decompose, default_banded_edges, CarcassMeasures, Decomposition, PanelDecomposer,
};
pub use error::{CabinetError, CabinetResult};
pub use fittings::{FittingResolution, FittingResolver};
pub use material_stack::{cut_dimension, internal_depth, total_thickness, MaterialStack};
pub use pipeline::{load_materials, Computation, Workshop};
pub use reducer::{apply, apply_all, Intent};
pub use structural::{check_structure, load_case, LoadCase};
pub use validation::{validate_dimensions, validate_machine, validate_structure};
