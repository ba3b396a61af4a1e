//! # CabinetKit Core
//!
//! Core types for CabinetKit.
//! Provides the cabinet data model, typed material registries, machine
//! operations, validation results, the tolerance table and the release
//! gate state machine.

pub mod cabinet;
pub mod data;
pub mod error;
pub mod gate;
pub mod tolerance;
pub mod units;

pub use cabinet::Cabinet;

pub use data::{
    error_count, init_standard_library, sort_results, CabinetDimensions, CabinetPanel,
    CabinetStructure, ComputedFields, CoreMaterial, DesignIntent, EdgeMaterial, Face,
    FittingAssignment, FittingRequest, FittingRole, JointType, MachineOperation,
    MaterialAssignment, MaterialCategory, MaterialKind, MaterialLibraryFile, MaterialRegistries,
    OperationGraph, PanelEdge, PanelEdges, PanelFaces, PanelOperations, PanelOverride, PanelRole,
    Placement, Registry, RegistryPolicy, Resolution, SafetyStatus, Severity, SurfaceMaterial,
    SurfaceType, ValidationCategory, ValidationResult, ValidationSummary,
};

pub use error::{Error, GateError, MaterialError, Result};

pub use gate::{can_export, ExportFormat, ExportPermission, GateState, GateStatus};

pub use tolerance::{tolerance, ToleranceKind, ToleranceValue};
