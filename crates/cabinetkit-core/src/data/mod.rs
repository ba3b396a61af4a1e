//! Cabinet data model
//!
//! Pure value types: dimensions, structure, material records and their
//! registries, panels, machine operations, fitting assignments, validation
//! results and the design intent. None of these carry behaviour beyond
//! their own invariants.

pub mod dimensions;
pub mod fittings;
pub mod intent;
pub mod materials;
pub mod operations;
pub mod panel;
pub mod validation;

pub use dimensions::{CabinetDimensions, CabinetStructure, JointType};
pub use fittings::{FittingAssignment, FittingRequest, FittingRole, SafetyStatus};
pub use intent::{DesignIntent, MaterialAssignment};
pub use materials::{
    init_standard_library, CoreMaterial, EdgeMaterial, ExpansionClass, MachiningClass,
    MaterialCategory, MaterialKind, MaterialLibraryFile, MaterialRecord, MaterialRegistries,
    Registry, RegistryPolicy, Resolution, SurfaceMaterial, SurfaceType,
};
pub use operations::{Face, MachineOperation, OperationGraph, PanelOperations};
pub use panel::{
    CabinetPanel, ComputedFields, PanelEdge, PanelEdges, PanelFaces, PanelOverride, PanelRole,
    Placement,
};
pub use validation::{
    error_count, sort_results, Severity, ValidationCategory, ValidationResult, ValidationSummary,
};
