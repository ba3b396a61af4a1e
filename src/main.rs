//! Command-line front end
//!
//! Reads a design intent, replays optional intents and gate actions, prints
//! a validation report and writes the requested artifacts.
//!
//! # Usage
//!
//! ```bash
//! # Validate an intent and write the cut list and BOM
//! cabinetkit base_600.json --format cut-list --format bom --output ./job
//!
//! # Freeze and write DXF for the machine
//! cabinetkit base_600.json --freeze --format dxf --output ./job
//!
//! # Replay edits, release and write everything the gate allows
//! cabinetkit base_600.json --intents edits.json --release --format all
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use cabinetkit::{
    apply, apply_all, export, init_logging, read_intent, read_intents, write_artifacts, Artifact,
    Cabinet, DesignIntent, ExportContext, ExportFormat, Intent, Workshop, BUILD_DATE, VERSION,
};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use serde::Serialize;

/// Export selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    CutList,
    Bom,
    Manifest,
    Dxf,
    CncProgram,
    /// Every format the gate currently permits
    All,
}

impl FormatArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            Self::CutList => vec![ExportFormat::CutList],
            Self::Bom => vec![ExportFormat::Bom],
            Self::Manifest => vec![ExportFormat::Manifest],
            Self::Dxf => vec![ExportFormat::Dxf],
            Self::CncProgram => vec![ExportFormat::CncProgram],
            Self::All => ExportFormat::all().to_vec(),
        }
    }
}

/// Parametric cabinet configurator
#[derive(Parser, Debug)]
#[command(name = "cabinetkit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Design intent JSON (defaults to the 600 mm reference base cabinet)
    intent: Option<PathBuf>,

    /// Manufacturing config (JSON or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Material library JSON
    #[arg(long)]
    materials: Option<PathBuf>,

    /// Fitting catalogue JSON
    #[arg(long)]
    catalogue: Option<PathBuf>,

    /// JSON list of intents applied after loading
    #[arg(long)]
    intents: Option<PathBuf>,

    /// Freeze the design after applying intents
    #[arg(long)]
    freeze: bool,

    /// Freeze and release the design
    #[arg(long)]
    release: bool,

    /// Artifacts to write
    #[arg(short, long, value_enum)]
    format: Vec<FormatArg>,

    /// Output directory for artifacts
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    document_id: String,
    revision: u64,
    state: String,
    panels: usize,
    operations: usize,
    errors: usize,
    warnings: usize,
    results: Vec<String>,
    written: Vec<&'a str>,
    refused: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logging(args.verbose) {
        eprintln!("logging unavailable: {err}");
    }
    tracing::debug!("cabinetkit {} ({})", VERSION, BUILD_DATE);

    match run(&args) {
        Ok(clean) if clean => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the cabinet is error free and every request was honoured
fn run(args: &Args) -> anyhow::Result<bool> {
    let workshop = Workshop::load(
        args.config.as_deref(),
        args.materials.as_deref(),
        args.catalogue.as_deref(),
    )
    .context("loading workshop data")?;

    let intent = match &args.intent {
        Some(path) => read_intent(path)
            .with_context(|| format!("reading intent {}", path.display()))?,
        None => DesignIntent::default(),
    };
    let mut cabinet = workshop.create(intent);

    if let Some(path) = &args.intents {
        let intents = read_intents(path)
            .with_context(|| format!("reading intents {}", path.display()))?;
        cabinet = apply_all(&cabinet, intents, &workshop)?;
    }
    let mut refused = Vec::new();
    let mut transitions = Vec::new();
    if args.freeze || args.release {
        transitions.push(Intent::Freeze);
    }
    if args.release {
        transitions.push(Intent::Release);
    }
    for transition in transitions {
        match apply(&cabinet, transition, &workshop) {
            Ok(next) => cabinet = next,
            Err(err) => {
                refused.push(err.to_string());
                break;
            }
        }
    }

    let context = ExportContext::new(&workshop.materials, &workshop.catalogue)
        .with_dxf(workshop.config.dxf.clone())
        .with_timestamp(Utc::now());

    let mut formats: Vec<ExportFormat> = Vec::new();
    for format in args.format.iter().flat_map(|f| f.formats()) {
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    let explicit = !args.format.contains(&FormatArg::All);

    let mut artifacts: Vec<Artifact> = Vec::new();
    for format in formats {
        let permission = cabinet.can_export(format);
        if !permission.allowed {
            if explicit {
                let reason = if permission.blocking.is_empty() {
                    format!("requires {}", permission.required)
                } else {
                    permission.blocking.join("; ")
                };
                refused.push(format!("{} refused in {}: {}", format, permission.current, reason));
            }
            continue;
        }
        artifacts.extend(export(&cabinet, format, &context)?);
    }
    write_artifacts(&args.output, &artifacts)
        .with_context(|| format!("writing to {}", args.output.display()))?;

    let report = report(&cabinet, &artifacts, refused);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.errors == 0 && report.refused.is_empty())
}

fn report<'a>(cabinet: &Cabinet, artifacts: &'a [Artifact], refused: Vec<String>) -> Report<'a> {
    Report {
        document_id: cabinet.id.to_string(),
        revision: cabinet.revision,
        state: cabinet.gate.state().to_string(),
        panels: cabinet.panels.len(),
        operations: cabinet.operations.operation_count(),
        errors: cabinet.error_count(),
        warnings: cabinet.warning_count(),
        results: cabinet.validation.iter().map(|r| r.to_string()).collect(),
        written: artifacts.iter().map(|a| a.file_name.as_str()).collect(),
        refused,
    }
}
