//! Design pipeline
//!
//! Derives everything a [`Cabinet`] holds from its design intent:
//!
//! 1. decompose the carcass into panels
//! 2. resolve each panel's material stack into computed fields
//! 3. validate dimensions, structure and the machine envelope
//! 4. resolve fittings and check loads
//! 5. build the operation graph, unless the outer dimensions are out of range
//!
//! Every stage is a pure function of the intent and the workshop, so
//! recomputing an unchanged intent gives an identical snapshot.

use std::path::Path;

use crate::decomposer::{decompose, CarcassMeasures};
use crate::error::CabinetResult;
use crate::fittings::FittingResolver;
use crate::material_stack::MaterialStack;
use crate::structural::check_structure;
use crate::validation::{validate_dimensions, validate_machine, validate_structure};
use cabinetkit_camtools::build_operation_graph;
use cabinetkit_core::{
    init_standard_library, sort_results, Cabinet, CabinetPanel, DesignIntent, FittingAssignment,
    GateStatus, MaterialLibraryFile, MaterialRegistries, OperationGraph, ValidationResult,
};
use cabinetkit_hardware::HardwareCatalogue;
use cabinetkit_settings::ManufacturingConfig;
use uuid::Uuid;

/// Everything derived from one intent
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    pub panels: Vec<CabinetPanel>,
    pub measures: CarcassMeasures,
    pub fittings: Vec<FittingAssignment>,
    pub operations: OperationGraph,
    pub validation: Vec<ValidationResult>,
}

/// Configuration, materials and hardware a design is computed against
#[derive(Debug, Clone)]
pub struct Workshop {
    pub config: ManufacturingConfig,
    pub materials: MaterialRegistries,
    pub catalogue: HardwareCatalogue,
}

impl Default for Workshop {
    fn default() -> Self {
        Self::standard()
    }
}

impl Workshop {
    pub fn new(
        config: ManufacturingConfig,
        materials: MaterialRegistries,
        catalogue: HardwareCatalogue,
    ) -> CabinetResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            materials,
            catalogue,
        })
    }

    /// Default config, built-in material library and fitting catalogue
    pub fn standard() -> Self {
        Self {
            config: ManufacturingConfig::default(),
            materials: init_standard_library(),
            catalogue: HardwareCatalogue::standard(),
        }
    }

    /// Load whichever parts are given from files, defaulting the rest
    pub fn load(
        config: Option<&Path>,
        materials: Option<&Path>,
        catalogue: Option<&Path>,
    ) -> CabinetResult<Self> {
        let config = ManufacturingConfig::load_or_default(config)?;
        let materials = match materials {
            Some(path) => load_materials(path)?,
            None => init_standard_library(),
        };
        let catalogue = match catalogue {
            Some(path) => HardwareCatalogue::load_from_file(path)?,
            None => HardwareCatalogue::standard(),
        };
        Self::new(config, materials, catalogue)
    }

    /// Run the full pipeline for an intent
    pub fn compute(&self, intent: &DesignIntent) -> Computation {
        let config = &self.config;
        let stack = MaterialStack::new(&self.materials, config);

        let decomposition = decompose(intent, config, &stack);
        let mut panels = decomposition.panels;
        let measures = decomposition.measures;
        tracing::debug!("Decomposed intent into {} panels", panels.len());

        let mut validation = Vec::new();
        for panel in panels.iter_mut() {
            validation.extend(stack.resolve(panel));
        }
        let dimension_results = validate_dimensions(&intent.dimensions, &config.bounds);
        let dimensions_ok = !dimension_results.iter().any(|r| r.is_error());
        validation.extend(dimension_results);
        validation.extend(validate_structure(intent, &panels, &measures, config));
        validation.extend(validate_machine(&panels, &config.machine));

        let resolution = FittingResolver::new(&self.catalogue, config).resolve(intent, &panels);
        validation.extend(resolution.results);
        let fittings = resolution.assignments;
        validation.extend(check_structure(
            &panels,
            &fittings,
            &self.catalogue,
            &config.structural,
        ));

        let operations = if dimensions_ok {
            build_operation_graph(intent, &panels, &self.materials, config)
        } else {
            tracing::warn!("Skipping operation graph: outer dimensions out of range");
            OperationGraph::default()
        };
        tracing::debug!(
            "Built {} operations across {} panels",
            operations.operation_count(),
            operations.panels.len()
        );

        sort_results(&mut validation);
        Computation {
            panels,
            measures,
            fittings,
            operations,
            validation,
        }
    }

    /// New DRAFT cabinet at revision 0
    pub fn create(&self, intent: DesignIntent) -> Cabinet {
        let cabinet = self.snapshot(Uuid::new_v4(), 0, GateStatus::new(), intent);
        tracing::info!(
            "Created cabinet {} ({} panels, {} errors, {} warnings)",
            cabinet.id,
            cabinet.panels.len(),
            cabinet.error_count(),
            cabinet.warning_count()
        );
        cabinet
    }

    /// Cabinet snapshot with the given identity and gate
    pub(crate) fn snapshot(
        &self,
        id: Uuid,
        revision: u64,
        gate: GateStatus,
        intent: DesignIntent,
    ) -> Cabinet {
        let computation = self.compute(&intent);
        Cabinet {
            id,
            revision,
            intent,
            panels: computation.panels,
            fittings: computation.fittings,
            operations: computation.operations,
            validation: computation.validation,
            gate,
        }
    }
}

/// Material library from a JSON file
pub fn load_materials(path: &Path) -> CabinetResult<MaterialRegistries> {
    let content = std::fs::read_to_string(path).map_err(cabinetkit_core::Error::from)?;
    let file: MaterialLibraryFile =
        serde_json::from_str(&content).map_err(cabinetkit_core::Error::from)?;
    let registries = file.into_registries()?;
    tracing::debug!("Loaded material library from {}", path.display());
    Ok(registries)
}
