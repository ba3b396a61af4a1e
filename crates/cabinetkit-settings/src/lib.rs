//! CabinetKit Settings Crate
//!
//! Holds every manufacturing constant the geometry, tolerance and
//! machining formulas consume, with JSON/TOML file handling.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, BackPanelSettings, DimensionBounds, DoorSettings, DxfSettings,
    FittingSettings, HingeSettings, JoinerySettings, MachineEnvelope, ManufacturingConfig,
    Range, SetbackSettings, StackSettings, StructuralSettings, System32Settings,
};
pub use error::{SettingsError, SettingsResult};
