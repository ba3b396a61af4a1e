//! Materials Database module
//!
//! This module provides:
//! - Core (substrate), surface (face covering) and edge (banding) records
//! - Behavioural categories used by the tolerance engine
//! - Typed registries that resolve ids at the boundary
//! - The standard material library

use crate::data::validation::{Severity, ValidationCategory, ValidationResult};
use crate::error::MaterialError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which of the three material layers a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Board substrate
    Core,
    /// Face covering bonded onto the core
    Surface,
    /// Edge banding
    Edge,
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Surface => write!(f, "surface"),
            Self::Edge => write!(f, "edge"),
        }
    }
}

/// Behavioural category of a core material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    /// Chipboard / particleboard
    Particleboard,
    /// Medium density fibreboard
    Mdf,
    /// Plywood
    Plywood,
    /// Solid timber
    SolidWood,
    /// High density fibreboard (thin back panels)
    Hdf,
    /// Solid phenolic compact laminate
    CompactLaminate,
}

impl MaterialCategory {
    /// Get all categories
    pub fn all() -> &'static [MaterialCategory] {
        &[
            MaterialCategory::Particleboard,
            MaterialCategory::Mdf,
            MaterialCategory::Plywood,
            MaterialCategory::SolidWood,
            MaterialCategory::Hdf,
            MaterialCategory::CompactLaminate,
        ]
    }

    /// Moisture movement class
    pub fn expansion_class(&self) -> ExpansionClass {
        match self {
            Self::CompactLaminate | Self::Hdf => ExpansionClass::Stable,
            Self::Particleboard | Self::Mdf | Self::Plywood => ExpansionClass::Moderate,
            Self::SolidWood => ExpansionClass::High,
        }
    }

    /// How the material behaves under a cutter
    pub fn machining_class(&self) -> MachiningClass {
        match self {
            Self::Mdf | Self::Hdf | Self::CompactLaminate => MachiningClass::Clean,
            Self::Particleboard => MachiningClass::Chipping,
            Self::Plywood | Self::SolidWood => MachiningClass::Fibrous,
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Particleboard => write!(f, "Particleboard"),
            Self::Mdf => write!(f, "MDF"),
            Self::Plywood => write!(f, "Plywood"),
            Self::SolidWood => write!(f, "Solid Wood"),
            Self::Hdf => write!(f, "HDF"),
            Self::CompactLaminate => write!(f, "Compact Laminate"),
        }
    }
}

/// Moisture movement class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpansionClass {
    /// Negligible seasonal movement
    Stable,
    /// Some movement across the board
    Moderate,
    /// Significant movement across the grain
    High,
}

/// Machining behaviour class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachiningClass {
    /// Crisp holes and grooves
    Clean,
    /// Prone to breakout at hole rims
    Chipping,
    /// Fibres lift and swell at cut faces
    Fibrous,
}

/// Type of face covering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceType {
    /// Melamine impregnated paper
    Melamine,
    /// High pressure laminate
    Hpl,
    /// Wood veneer
    Veneer,
    /// Lacquer coat
    Lacquer,
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Melamine => write!(f, "MELAMINE"),
            Self::Hpl => write!(f, "HPL"),
            Self::Veneer => write!(f, "VENEER"),
            Self::Lacquer => write!(f, "LACQUER"),
        }
    }
}

/// Board substrate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMaterial {
    /// Unique id
    pub id: String,
    /// Display name
    pub name: String,
    /// Behavioural category
    pub category: MaterialCategory,
    /// Nominal thickness in mm
    pub thickness: f64,
    /// Density in kg/m³
    pub density_kg_m3: f64,
    /// Board cost per m²
    pub cost_per_m2: f64,
    /// Embodied CO2 in kg per m²
    pub co2_per_m2: f64,
}

impl CoreMaterial {
    /// Create a new core record with typical particleboard properties
    pub fn new(id: impl Into<String>, name: impl Into<String>, thickness: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: MaterialCategory::Particleboard,
            thickness,
            density_kg_m3: 650.0,
            cost_per_m2: 0.0,
            co2_per_m2: 0.0,
        }
    }

    /// Mass per square metre of board face (kg/m²)
    pub fn areal_density_kg_m2(&self) -> f64 {
        self.density_kg_m3 * self.thickness / 1000.0
    }
}

/// Face covering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMaterial {
    /// Unique id
    pub id: String,
    /// Display name
    pub name: String,
    /// Covering type
    pub surface_type: SurfaceType,
    /// Thickness in mm
    pub thickness: f64,
    /// Colour name or code
    pub color: String,
    /// Texture reference for renderers, never interpreted here
    #[serde(default)]
    pub texture: Option<String>,
    /// Cost per m² of covered face
    #[serde(default)]
    pub cost_per_m2: f64,
    /// Embodied CO2 in kg per m²
    #[serde(default)]
    pub co2_per_m2: f64,
}

/// Edge banding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeMaterial {
    /// Unique id
    pub id: String,
    /// Display name
    pub name: String,
    /// Band thickness in mm (deducted from the finish size)
    pub thickness: f64,
    /// Band height in mm (must cover the panel thickness)
    pub height: f64,
    /// Cost per linear metre
    pub cost_per_m: f64,
    /// Colour name or code
    #[serde(default)]
    pub color: String,
}

/// Common access for records held in a [`Registry`]
pub trait MaterialRecord {
    /// Registry kind, used in error messages
    const KIND: MaterialKind;

    /// Record id
    fn id(&self) -> &str;

    /// Nominal thickness in mm
    fn thickness(&self) -> f64;
}

impl MaterialRecord for CoreMaterial {
    const KIND: MaterialKind = MaterialKind::Core;

    fn id(&self) -> &str {
        &self.id
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }
}

impl MaterialRecord for SurfaceMaterial {
    const KIND: MaterialKind = MaterialKind::Surface;

    fn id(&self) -> &str {
        &self.id
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }
}

impl MaterialRecord for EdgeMaterial {
    const KIND: MaterialKind = MaterialKind::Edge;

    fn id(&self) -> &str {
        &self.id
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }
}

/// What happens when an id does not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryPolicy {
    /// Unknown ids are errors; the fallback record only keeps geometry inspectable
    #[default]
    Strict,
    /// Unknown ids silently become the fallback record (reported as a warning)
    FallbackToDefault,
}

/// Outcome of resolving an id under a [`RegistryPolicy`]
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a, T> {
    /// The record to compute with
    pub record: &'a T,
    /// Set when the requested id was not found
    pub unresolved: Option<MaterialError>,
    /// Policy the resolution was made under
    pub policy: RegistryPolicy,
}

impl<T> Resolution<'_, T> {
    /// Whether the requested id resolved directly
    pub fn is_exact(&self) -> bool {
        self.unresolved.is_none()
    }

    /// Validation result describing a substitution, if one happened
    pub fn issue(&self, panel_id: Option<&str>) -> Option<ValidationResult> {
        let err = self.unresolved.as_ref()?;
        let severity = match self.policy {
            RegistryPolicy::Strict => Severity::Error,
            RegistryPolicy::FallbackToDefault => Severity::Warning,
        };
        let mut result = ValidationResult::new(
            ValidationCategory::Material,
            severity,
            "unknown_material",
            err.to_string(),
        );
        if let Some(id) = panel_id {
            result = result.with_panel(id);
        }
        Some(result)
    }
}

fn check_thickness<T: MaterialRecord>(record: &T) -> Result<(), MaterialError> {
    if record.thickness().is_finite() && record.thickness() > 0.0 {
        return Ok(());
    }
    Err(MaterialError::InvalidRecord {
        kind: T::KIND,
        id: record.id().to_string(),
        reason: format!("thickness must be positive, got {}", record.thickness()),
    })
}

/// Typed registry of material records keyed by id
#[derive(Debug, Clone, PartialEq)]
pub struct Registry<T> {
    records: BTreeMap<String, T>,
    fallback: String,
}

impl<T: MaterialRecord> Registry<T> {
    /// Build a registry; the fallback id must name one of the records
    pub fn new(records: Vec<T>, fallback: impl Into<String>) -> Result<Self, MaterialError> {
        let fallback = fallback.into();
        let mut map = BTreeMap::new();
        for record in records {
            check_thickness(&record)?;
            let id = record.id().to_string();
            if map.insert(id.clone(), record).is_some() {
                return Err(MaterialError::Duplicate { kind: T::KIND, id });
            }
        }
        if !map.contains_key(&fallback) {
            return Err(MaterialError::MissingFallback {
                kind: T::KIND,
                id: fallback,
            });
        }
        Ok(Self {
            records: map,
            fallback,
        })
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Result<&T, MaterialError> {
        self.records
            .get(id)
            .ok_or_else(|| MaterialError::UnknownMaterial {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    /// The fallback record
    pub fn fallback(&self) -> &T {
        match self.records.get(&self.fallback) {
            Some(record) => record,
            None => unreachable!("registry fallback {} checked at construction", self.fallback),
        }
    }

    /// The fallback id
    pub fn fallback_id(&self) -> &str {
        &self.fallback
    }

    /// Resolve an id, substituting the fallback record when it is unknown
    pub fn resolve(&self, id: &str, policy: RegistryPolicy) -> Resolution<'_, T> {
        match self.get(id) {
            Ok(record) => Resolution {
                record,
                unresolved: None,
                policy,
            },
            Err(err) => {
                if policy == RegistryPolicy::FallbackToDefault {
                    tracing::warn!("{}; using fallback {}", err, self.fallback);
                }
                Resolution {
                    record: self.fallback(),
                    unresolved: Some(err),
                    policy,
                }
            }
        }
    }

    /// Whether an id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Add or replace a record, rejecting it the way [`Registry::new`] would
    pub fn upsert(&mut self, record: T) -> Result<(), MaterialError> {
        check_thickness(&record)?;
        self.records.insert(record.id().to_string(), record);
        Ok(())
    }

    /// Records in id order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the registry is empty (never true for a constructed registry)
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The three material registries used by a cabinet
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRegistries {
    /// Substrates
    pub cores: Registry<CoreMaterial>,
    /// Face coverings
    pub surfaces: Registry<SurfaceMaterial>,
    /// Edge bands
    pub edges: Registry<EdgeMaterial>,
}

impl MaterialRegistries {
    /// Convert to the serializable file form
    pub fn to_file(&self) -> MaterialLibraryFile {
        MaterialLibraryFile {
            core_fallback: self.cores.fallback_id().to_string(),
            surface_fallback: self.surfaces.fallback_id().to_string(),
            edge_fallback: self.edges.fallback_id().to_string(),
            cores: self.cores.iter().cloned().collect(),
            surfaces: self.surfaces.iter().cloned().collect(),
            edges: self.edges.iter().cloned().collect(),
        }
    }
}

/// On-disk form of [`MaterialRegistries`]; validated on conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLibraryFile {
    /// Fallback core id
    pub core_fallback: String,
    /// Fallback surface id
    pub surface_fallback: String,
    /// Fallback edge id
    pub edge_fallback: String,
    /// Core records
    pub cores: Vec<CoreMaterial>,
    /// Surface records
    pub surfaces: Vec<SurfaceMaterial>,
    /// Edge records
    pub edges: Vec<EdgeMaterial>,
}

impl MaterialLibraryFile {
    /// Validate and build the registries
    pub fn into_registries(self) -> Result<MaterialRegistries, MaterialError> {
        Ok(MaterialRegistries {
            cores: Registry::new(self.cores, self.core_fallback)?,
            surfaces: Registry::new(self.surfaces, self.surface_fallback)?,
            edges: Registry::new(self.edges, self.edge_fallback)?,
        })
    }
}

fn core(
    id: &str,
    name: &str,
    category: MaterialCategory,
    thickness: f64,
    density_kg_m3: f64,
    cost_per_m2: f64,
    co2_per_m2: f64,
) -> CoreMaterial {
    let mut material = CoreMaterial::new(id, name, thickness);
    material.category = category;
    material.density_kg_m3 = density_kg_m3;
    material.cost_per_m2 = cost_per_m2;
    material.co2_per_m2 = co2_per_m2;
    material
}

fn surface(
    id: &str,
    name: &str,
    surface_type: SurfaceType,
    thickness: f64,
    color: &str,
    cost_per_m2: f64,
) -> SurfaceMaterial {
    SurfaceMaterial {
        id: id.to_string(),
        name: name.to_string(),
        surface_type,
        thickness,
        color: color.to_string(),
        texture: None,
        cost_per_m2,
        co2_per_m2: 0.0,
    }
}

fn edge(id: &str, name: &str, thickness: f64, height: f64, cost_per_m: f64) -> EdgeMaterial {
    EdgeMaterial {
        id: id.to_string(),
        name: name.to_string(),
        thickness,
        height,
        cost_per_m,
        color: "white".to_string(),
    }
}

/// Initialize the standard material library
pub fn init_standard_library() -> MaterialRegistries {
    let cores = vec![
        core("pb_16", "Particleboard 16", MaterialCategory::Particleboard, 16.0, 650.0, 6.8, 5.9),
        core("pb_18", "Particleboard 18", MaterialCategory::Particleboard, 18.0, 640.0, 7.4, 6.6),
        core("mdf_18", "MDF 18", MaterialCategory::Mdf, 18.0, 750.0, 9.9, 8.1),
        core("ply_18", "Birch Plywood 18", MaterialCategory::Plywood, 18.0, 680.0, 24.0, 4.2),
        core("oak_19", "Solid Oak 19", MaterialCategory::SolidWood, 19.0, 705.0, 62.0, 3.1),
        core("hdf_8", "HDF 8", MaterialCategory::Hdf, 8.0, 880.0, 5.1, 5.0),
        core("compact_12", "Compact Laminate 12", MaterialCategory::CompactLaminate, 12.0, 1400.0, 88.0, 14.0),
    ];

    let mut oak_veneer = surface("veneer_oak", "Oak Veneer", SurfaceType::Veneer, 0.6, "natural oak", 14.0);
    oak_veneer.texture = Some("textures/oak_veneer.jpg".to_string());

    let surfaces = vec![
        surface("mel_white", "White Melamine", SurfaceType::Melamine, 0.2, "white", 1.2),
        surface("mel_anthracite", "Anthracite Melamine", SurfaceType::Melamine, 0.2, "anthracite", 1.4),
        surface("hpl_08", "HPL 0.8", SurfaceType::Hpl, 0.8, "white", 9.5),
        oak_veneer,
        surface("lacquer_white", "White Lacquer", SurfaceType::Lacquer, 0.15, "white", 18.0),
    ];

    let edges = vec![
        edge("abs_04", "ABS 0.4", 0.4, 23.0, 0.35),
        edge("abs_1", "ABS 1.0", 1.0, 23.0, 0.55),
        edge("abs_2", "ABS 2.0", 2.0, 23.0, 0.9),
        edge("abs_2_wide", "ABS 2.0 x 43", 2.0, 43.0, 1.4),
    ];

    let registries = MaterialLibraryFile {
        core_fallback: "pb_18".to_string(),
        surface_fallback: "mel_white".to_string(),
        edge_fallback: "abs_1".to_string(),
        cores,
        surfaces,
        edges,
    }
    .into_registries();

    match registries {
        Ok(registries) => registries,
        Err(err) => unreachable!("standard material library is inconsistent: {err}"),
    }
}
