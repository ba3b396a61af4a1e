//! Manufacturing configuration for CabinetKit
//!
//! Every constant the geometry, tolerance and machining formulas consume.
//! Supports JSON and TOML file formats; the default file lives in the
//! platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Back panel and setbacks (carcass depth arithmetic)
//! - Material stack (glue line, registry policy)
//! - System-32, joinery and hinge drilling layouts
//! - Doors, machine envelope and dimension bounds
//! - Structural thresholds and fitting auto-assignment
//! - DXF job layout

use crate::error::{SettingsError, SettingsResult};
use cabinetkit_core::{tolerance, MaterialCategory, RegistryPolicy, ToleranceKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inclusive min/max pair in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Back panel construction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackPanelSettings {
    /// Back panel board thickness in mm
    pub thickness: f64,
    /// Distance of the groove from the back edge of the sides in mm
    pub groove_inset: f64,
    /// Groove depth into the sides in mm
    pub groove_depth: f64,
    /// Core used for the back panel
    pub core_material: String,
}

impl Default for BackPanelSettings {
    fn default() -> Self {
        Self {
            thickness: 8.0,
            groove_inset: 10.0,
            groove_depth: 8.0,
            core_material: "hdf_8".to_string(),
        }
    }
}

impl BackPanelSettings {
    /// Groove width for the back panel in sides of `category`
    pub fn groove_width(&self, category: MaterialCategory) -> f64 {
        self.thickness + tolerance(category, ToleranceKind::BackPanelGroove).mm()
    }

    /// Distance from the back edge of the sides to the groove
    pub fn groove_offset(&self, category: MaterialCategory) -> f64 {
        self.groove_inset + tolerance(category, ToleranceKind::BackPanelGroove).mm()
    }

    /// Depth taken from the carcass by the back panel and its groove offset
    pub fn allowance(&self, category: MaterialCategory) -> f64 {
        self.thickness + self.groove_offset(category)
    }
}

/// Setbacks of internal panels from the carcass planes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetbackSettings {
    /// Front setback in mm
    pub front: f64,
    /// Back setback in mm (clearance in front of the back panel)
    pub back: f64,
}

impl Default for SetbackSettings {
    fn default() -> Self {
        Self {
            front: 20.0,
            back: 2.0,
        }
    }
}

/// Material stack arithmetic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSettings {
    /// Glue line per bonded face in mm
    pub glue_thickness: f64,
    /// How unknown material ids are handled
    pub registry_policy: RegistryPolicy,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            glue_thickness: 0.1,
            registry_policy: RegistryPolicy::Strict,
        }
    }
}

/// System-32 shelf pin rows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct System32Settings {
    /// Hole pitch in mm
    pub pitch: f64,
    /// Distance of the rows from the front edge and the back allowance in mm
    pub row_inset: f64,
    /// First hole above the bottom panel in mm
    pub reference_offset: f64,
    /// Nominal pin hole diameter in mm (fit tolerance added on top)
    pub pin_diameter: f64,
    /// Pin hole depth in mm
    pub pin_depth: f64,
}

impl Default for System32Settings {
    fn default() -> Self {
        Self {
            pitch: 32.0,
            row_inset: 37.0,
            reference_offset: 64.0,
            pin_diameter: 5.0,
            pin_depth: 12.0,
        }
    }
}

/// Dowel joints between sides and top/bottom
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinerySettings {
    /// Nominal dowel diameter in mm
    pub dowel_diameter: f64,
    /// Depth of edge (horizontal) dowel holes in mm
    pub edge_depth: f64,
    /// Depth of face (vertical) dowel holes in mm
    pub face_depth: f64,
    /// Distance of each dowel from the ends of the joint line in mm
    pub end_offset: f64,
}

impl Default for JoinerySettings {
    fn default() -> Self {
        Self {
            dowel_diameter: 8.0,
            edge_depth: 30.0,
            face_depth: 12.0,
            end_offset: 37.0,
        }
    }
}

/// Concealed hinge layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HingeSettings {
    /// Cup diameter in mm
    pub cup_diameter: f64,
    /// Nominal cup depth in mm (clearance tolerance added on top)
    pub cup_depth: f64,
    /// Cup centre distance from the hinge edge in mm
    pub edge_distance: f64,
    /// Outer cups distance from the door top and bottom in mm
    pub end_distance: f64,
    /// Mounting plate hole diameter in mm
    pub plate_hole_diameter: f64,
    /// Mounting plate hole depth in mm
    pub plate_hole_depth: f64,
    /// Mounting plate holes distance from the side's front edge in mm
    pub plate_setback: f64,
}

impl Default for HingeSettings {
    fn default() -> Self {
        Self {
            cup_diameter: 35.0,
            cup_depth: 13.0,
            edge_distance: 22.5,
            end_distance: 100.0,
            plate_hole_diameter: 5.0,
            plate_hole_depth: 12.0,
            plate_setback: 37.0,
        }
    }
}

impl HingeSettings {
    /// Number of hinges for a door of `door_height` mm
    pub fn hinge_count(&self, door_height: f64) -> usize {
        if door_height <= 900.0 {
            2
        } else if door_height <= 1600.0 {
            3
        } else {
            4
        }
    }

    /// Shortest door whose outer cups keep `end_distance` from the ends
    /// without overlapping each other
    pub fn min_door_height(&self) -> f64 {
        2.0 * self.end_distance + self.cup_diameter
    }

    /// Whether the hinge layout fits a door of `door_height` mm
    pub fn fits(&self, door_height: f64) -> bool {
        door_height.is_finite() && door_height >= self.min_door_height()
    }

    /// Cup centre heights on a door of `door_height` mm, bottom up
    ///
    /// Outer cups sit `end_distance` from the door ends; intermediate cups
    /// are spaced evenly between them.
    pub fn hinge_positions(&self, door_height: f64) -> Vec<f64> {
        let count = self.hinge_count(door_height);
        let first = self.end_distance;
        let last = door_height - self.end_distance;
        let step = (last - first) / (count - 1) as f64;
        (0..count).map(|i| first + step * i as f64).collect()
    }
}

/// Overlay doors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorSettings {
    /// Nominal reveal gap in mm (tolerance added on top)
    pub gap: f64,
    /// Maximum supported door count
    pub max_doors: u32,
}

impl Default for DoorSettings {
    fn default() -> Self {
        Self {
            gap: 2.0,
            max_doors: 2,
        }
    }
}

/// Limits of the panel saw / CNC
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineEnvelope {
    /// Longest cut panel side in mm
    pub max_panel_length: f64,
    /// Shortest-side limit in mm
    pub max_panel_width: f64,
    /// Thickest panel in mm
    pub max_thickness: f64,
    /// Smallest panel side the machine can hold in mm
    pub min_panel_side: f64,
    /// Maximum panels per job; also caps how many shelves or dividers are laid out
    pub max_panel_count: usize,
}

impl MachineEnvelope {
    /// Requested shelf or divider count clamped to what a job can hold
    pub fn clamp_count(&self, requested: u32) -> u32 {
        let limit = u32::try_from(self.max_panel_count).unwrap_or(u32::MAX);
        requested.min(limit)
    }
}

impl Default for MachineEnvelope {
    fn default() -> Self {
        Self {
            max_panel_length: 2800.0,
            max_panel_width: 1250.0,
            max_thickness: 50.0,
            min_panel_side: 50.0,
            max_panel_count: 40,
        }
    }
}

/// Accepted outer dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionBounds {
    /// Smallest clear gap between neighbouring shelves (or a shelf and the
    /// top/bottom panel) in mm
    pub min_shelf_spacing: f64,
    /// Smallest clear compartment width between dividers in mm
    pub min_compartment_width: f64,
    pub width: Range,
    pub height: Range,
    pub depth: Range,
    pub toe_kick: Range,
}

impl Default for DimensionBounds {
    fn default() -> Self {
        Self {
            min_shelf_spacing: 80.0,
            min_compartment_width: 100.0,
            width: Range::new(150.0, 1200.0),
            height: Range::new(300.0, 2400.0),
            depth: Range::new(250.0, 800.0),
            toe_kick: Range::new(0.0, 200.0),
        }
    }
}

/// Structural check thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralSettings {
    /// Load ratio above which a warning is reported
    pub warning_ratio: f64,
    /// Load ratio above which an error is reported
    pub error_ratio: f64,
    /// Content load added to each load-bearing panel in kg
    pub content_load_kg: f64,
}

impl Default for StructuralSettings {
    fn default() -> Self {
        Self {
            warning_ratio: 0.8,
            error_ratio: 1.0,
            content_load_kg: 0.0,
        }
    }
}

/// Fitting selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FittingSettings {
    /// Assign the top-ranked fitting to shelves and doors without one
    pub auto_assign: bool,
    /// Shelf supports per shelf
    pub supports_per_shelf: u32,
}

impl Default for FittingSettings {
    fn default() -> Self {
        Self {
            auto_assign: true,
            supports_per_shelf: 4,
        }
    }
}

/// DXF output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DxfSettings {
    /// Gap between panels in a job document in mm
    pub layout_gap: f64,
    /// Annotation text height in mm
    pub text_height: f64,
}

impl Default for DxfSettings {
    fn default() -> Self {
        Self {
            layout_gap: 50.0,
            text_height: 10.0,
        }
    }
}

/// Complete manufacturing configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ManufacturingConfig {
    pub back_panel: BackPanelSettings,
    pub setbacks: SetbackSettings,
    pub stack: StackSettings,
    pub system32: System32Settings,
    pub joinery: JoinerySettings,
    pub hinge: HingeSettings,
    pub doors: DoorSettings,
    pub machine: MachineEnvelope,
    pub bounds: DimensionBounds,
    pub structural: StructuralSettings,
    pub fittings: FittingSettings,
    pub dxf: DxfSettings,
}

/// Default config file location (`<config_dir>/cabinetkit/config.toml`)
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("cabinetkit").join("config.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })
}

impl ManufacturingConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded manufacturing config from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, else the default location if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Carcass constants
        positive("back_panel.thickness", self.back_panel.thickness)?;
        non_negative("back_panel.groove_inset", self.back_panel.groove_inset)?;
        positive("back_panel.groove_depth", self.back_panel.groove_depth)?;
        if self.back_panel.core_material.is_empty() {
            return Err(SettingsError::invalid(
                "back_panel.core_material",
                "must name a core material",
            ));
        }
        non_negative("setbacks.front", self.setbacks.front)?;
        non_negative("setbacks.back", self.setbacks.back)?;
        non_negative("stack.glue_thickness", self.stack.glue_thickness)?;

        // Drilling layouts
        positive("system32.pitch", self.system32.pitch)?;
        positive("system32.row_inset", self.system32.row_inset)?;
        non_negative("system32.reference_offset", self.system32.reference_offset)?;
        positive("system32.pin_diameter", self.system32.pin_diameter)?;
        positive("system32.pin_depth", self.system32.pin_depth)?;
        positive("joinery.dowel_diameter", self.joinery.dowel_diameter)?;
        positive("joinery.edge_depth", self.joinery.edge_depth)?;
        positive("joinery.face_depth", self.joinery.face_depth)?;
        positive("joinery.end_offset", self.joinery.end_offset)?;
        positive("hinge.cup_diameter", self.hinge.cup_diameter)?;
        positive("hinge.cup_depth", self.hinge.cup_depth)?;
        positive("hinge.edge_distance", self.hinge.edge_distance)?;
        positive("hinge.end_distance", self.hinge.end_distance)?;
        positive("hinge.plate_hole_diameter", self.hinge.plate_hole_diameter)?;
        positive("hinge.plate_hole_depth", self.hinge.plate_hole_depth)?;
        positive("hinge.plate_setback", self.hinge.plate_setback)?;

        non_negative("doors.gap", self.doors.gap)?;

        // Machine envelope
        positive("machine.max_panel_length", self.machine.max_panel_length)?;
        positive("machine.max_panel_width", self.machine.max_panel_width)?;
        positive("machine.max_thickness", self.machine.max_thickness)?;
        non_negative("machine.min_panel_side", self.machine.min_panel_side)?;
        if self.machine.max_panel_count == 0 {
            return Err(SettingsError::invalid(
                "machine.max_panel_count",
                "must be > 0",
            ));
        }

        // Bounds
        range("bounds.width", &self.bounds.width)?;
        range("bounds.height", &self.bounds.height)?;
        range("bounds.depth", &self.bounds.depth)?;
        range("bounds.toe_kick", &self.bounds.toe_kick)?;
        non_negative("bounds.min_shelf_spacing", self.bounds.min_shelf_spacing)?;
        non_negative(
            "bounds.min_compartment_width",
            self.bounds.min_compartment_width,
        )?;

        // Structural thresholds
        positive("structural.warning_ratio", self.structural.warning_ratio)?;
        if self.structural.error_ratio < self.structural.warning_ratio {
            return Err(SettingsError::invalid(
                "structural.error_ratio",
                "must not be below structural.warning_ratio",
            ));
        }
        non_negative("structural.content_load_kg", self.structural.content_load_kg)?;

        non_negative("dxf.layout_gap", self.dxf.layout_gap)?;
        positive("dxf.text_height", self.dxf.text_height)?;

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

fn extension(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)))
    }
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be >= 0, got {}", value)))
    }
}

fn range(key: &str, range: &Range) -> SettingsResult<()> {
    non_negative(key, range.min)?;
    if range.max.is_finite() && range.max > range.min {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            key,
            format!("max {} must exceed min {}", range.max, range.min),
        ))
    }
}
