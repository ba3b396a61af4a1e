//! # CabinetKit
//!
//! Parametric kitchen cabinet configurator: a design intent goes in, cut
//! lists, bills of materials, machine operations and layered DXF come out.
//!
//! ## Architecture
//!
//! CabinetKit is organized as a workspace with multiple crates:
//!
//! 1. **cabinetkit-core** - Data model, material registries, tolerances, release gate
//! 2. **cabinetkit-settings** - Manufacturing configuration and file handling
//! 3. **cabinetkit-hardware** - Fitting catalogue and ranking
//! 4. **cabinetkit-camtools** - Operation graph, DXF generator, exports
//! 5. **cabinetkit-designer** - Decomposer, material stack, validation, reducer
//! 6. **cabinetkit** - Command-line front end that integrates all crates
//!
//! ## Features
//!
//! - **Material Stack**: real thickness from core, faces and glue lines
//! - **Panel Decomposition**: sides, top, bottom, back, shelves, dividers, doors
//! - **Machine Operations**: System-32 rows, dowel joints, back groove, hinge cups
//! - **DXF Output**: machine layers with face B mirrored at emission
//! - **Release Gate**: DRAFT, FROZEN and RELEASED with gated exports

use std::path::{Path, PathBuf};

pub use cabinetkit_camtools as camtools;
pub use cabinetkit_designer as designer;
pub use cabinetkit_hardware as hardware;
pub use cabinetkit_settings as settings;

pub use cabinetkit_core::{
    Cabinet, CabinetDimensions, CabinetPanel, CabinetStructure, DesignIntent, Error,
    ExportFormat, GateState, GateStatus, PanelRole, Result, Severity, ValidationResult,
};

pub use cabinetkit_camtools::{export, export_panel_dxf, Artifact, DxfGenerator, ExportContext};

pub use cabinetkit_designer::{apply, apply_all, CabinetError, Intent, Workshop};

pub use cabinetkit_settings::ManufacturingConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, so artifacts written to stdout stay clean
/// - RUST_LOG environment variable support
/// - `verbose` lowers the default level from INFO to DEBUG
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Read a design intent from a JSON file
pub fn read_intent(path: &Path) -> anyhow::Result<DesignIntent> {
    let content = std::fs::read_to_string(path)?;
    Ok(DesignIntent::from_json(&content)?)
}

/// Read a JSON list of intents to replay
pub fn read_intents(path: &Path) -> anyhow::Result<Vec<Intent>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write artifacts into `dir`, creating it when missing
pub fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.content)?;
        tracing::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
