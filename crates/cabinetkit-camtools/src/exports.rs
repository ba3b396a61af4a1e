//! Gated exports
//!
//! Every artifact is a read-only projection of a computed [`Cabinet`]. The
//! gate decides whether a format may be produced; a refusal is returned as
//! [`CamToolError::ExportNotPermitted`] carrying the blocking messages.

use crate::dxf_generator::DxfGenerator;
use crate::error::{CamToolError, CamToolResult};
use cabinetkit_core::units::{area_m2, format_length, mm_to_m};
use cabinetkit_core::{
    Cabinet, CabinetDimensions, ExportFormat, GateState, MaterialRegistries, OperationGraph,
};
use cabinetkit_hardware::HardwareCatalogue;
use cabinetkit_settings::DxfSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Round money, area and length figures for tabular output
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Everything an export needs besides the cabinet itself
#[derive(Debug, Clone)]
pub struct ExportContext<'a> {
    pub materials: &'a MaterialRegistries,
    pub catalogue: &'a HardwareCatalogue,
    pub dxf: DxfSettings,
    /// Stamped into the manifest when given
    pub timestamp: Option<DateTime<Utc>>,
}

impl<'a> ExportContext<'a> {
    pub fn new(materials: &'a MaterialRegistries, catalogue: &'a HardwareCatalogue) -> Self {
        Self {
            materials,
            catalogue,
            dxf: DxfSettings::default(),
            timestamp: None,
        }
    }

    pub fn with_dxf(mut self, dxf: DxfSettings) -> Self {
        self.dxf = dxf;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A generated file, held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Cut list
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CutListRow<'a> {
    panel_id: &'a str,
    role: String,
    core: &'a str,
    finish_width: String,
    finish_height: String,
    cut_width: String,
    cut_height: String,
    thickness: String,
    face_a: &'a str,
    face_b: &'a str,
    edge_top: &'a str,
    edge_bottom: &'a str,
    edge_left: &'a str,
    edge_right: &'a str,
}

/// One row per panel, in decomposition order
pub fn cut_list_csv(cabinet: &Cabinet) -> CamToolResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for panel in &cabinet.panels {
        writer.serialize(CutListRow {
            panel_id: &panel.id,
            role: panel.role.to_string(),
            core: &panel.core_material_id,
            finish_width: format_length(panel.finish_width),
            finish_height: format_length(panel.finish_height),
            cut_width: format_length(panel.computed.cut_width),
            cut_height: format_length(panel.computed.cut_height),
            thickness: format_length(panel.computed.real_thickness),
            face_a: panel.faces.face_a.as_deref().unwrap_or(""),
            face_b: panel.faces.face_b.as_deref().unwrap_or(""),
            edge_top: panel.edges.top.as_deref().unwrap_or(""),
            edge_bottom: panel.edges.bottom.as_deref().unwrap_or(""),
            edge_left: panel.edges.left.as_deref().unwrap_or(""),
            edge_right: panel.edges.right.as_deref().unwrap_or(""),
        })?;
    }
    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> CamToolResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| CamToolError::IoError(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ---------------------------------------------------------------------------
// Bill of materials
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLine {
    pub material_id: String,
    pub panels: u32,
    pub area_m2: f64,
    pub cost: f64,
    pub co2_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLine {
    pub material_id: String,
    pub faces: u32,
    pub area_m2: f64,
    pub cost: f64,
    pub co2_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLine {
    pub material_id: String,
    pub length_m: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingLine {
    pub fitting_id: String,
    pub quantity: u32,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BomTotals {
    pub board_area_m2: f64,
    pub edge_length_m: f64,
    pub cost: f64,
    pub co2_kg: f64,
    pub weight_kg: f64,
}

/// Bill of materials, lines sorted by id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bom {
    pub boards: Vec<BoardLine>,
    pub surfaces: Vec<SurfaceLine>,
    pub edges: Vec<EdgeLine>,
    pub fittings: Vec<FittingLine>,
    pub totals: BomTotals,
}

impl Bom {
    /// Aggregate a cabinet's materials and hardware
    ///
    /// Unknown ids are priced with the registry fallback record, the same
    /// record the pipeline used for geometry. Fittings cost their piece
    /// price times the assigned quantity; fittings missing from the
    /// catalogue are listed at zero cost.
    pub fn build(
        cabinet: &Cabinet,
        materials: &MaterialRegistries,
        catalogue: &HardwareCatalogue,
    ) -> Self {
        let mut boards: BTreeMap<&str, BoardLine> = BTreeMap::new();
        let mut surfaces: BTreeMap<&str, SurfaceLine> = BTreeMap::new();
        let mut edges: BTreeMap<&str, EdgeLine> = BTreeMap::new();
        let mut fittings: BTreeMap<&str, FittingLine> = BTreeMap::new();
        let mut totals = BomTotals::default();

        for panel in &cabinet.panels {
            let area = area_m2(panel.finish_width, panel.finish_height);
            let core = materials
                .cores
                .get(&panel.core_material_id)
                .unwrap_or_else(|_| materials.cores.fallback());
            let line = boards
                .entry(panel.core_material_id.as_str())
                .or_insert_with(|| BoardLine {
                    material_id: panel.core_material_id.clone(),
                    panels: 0,
                    area_m2: 0.0,
                    cost: 0.0,
                    co2_kg: 0.0,
                });
            line.panels += 1;
            line.area_m2 += area;
            line.cost += area * core.cost_per_m2;
            line.co2_kg += area * core.co2_per_m2;
            totals.board_area_m2 += area;
            totals.cost += area * core.cost_per_m2;
            totals.co2_kg += area * core.co2_per_m2;
            totals.weight_kg += panel.computed.weight_kg;

            for surface_id in [&panel.faces.face_a, &panel.faces.face_b]
                .into_iter()
                .flatten()
            {
                let surface = materials
                    .surfaces
                    .get(surface_id)
                    .unwrap_or_else(|_| materials.surfaces.fallback());
                let line = surfaces
                    .entry(surface_id.as_str())
                    .or_insert_with(|| SurfaceLine {
                        material_id: surface_id.clone(),
                        faces: 0,
                        area_m2: 0.0,
                        cost: 0.0,
                        co2_kg: 0.0,
                    });
                line.faces += 1;
                line.area_m2 += area;
                line.cost += area * surface.cost_per_m2;
                line.co2_kg += area * surface.co2_per_m2;
                totals.cost += area * surface.cost_per_m2;
                totals.co2_kg += area * surface.co2_per_m2;
            }

            for (edge, edge_id) in panel.edges.banded() {
                let length = if edge.runs_along_width() {
                    mm_to_m(panel.finish_width)
                } else {
                    mm_to_m(panel.finish_height)
                };
                let band = materials
                    .edges
                    .get(edge_id)
                    .unwrap_or_else(|_| materials.edges.fallback());
                let line = edges.entry(edge_id).or_insert_with(|| EdgeLine {
                    material_id: edge_id.to_string(),
                    length_m: 0.0,
                    cost: 0.0,
                });
                line.length_m += length;
                line.cost += length * band.cost_per_m;
                totals.edge_length_m += length;
                totals.cost += length * band.cost_per_m;
            }
        }

        for assignment in &cabinet.fittings {
            let price = catalogue
                .get(&assignment.fitting_id)
                .map(|f| f.price)
                .unwrap_or(0.0);
            let line = fittings
                .entry(assignment.fitting_id.as_str())
                .or_insert_with(|| FittingLine {
                    fitting_id: assignment.fitting_id.clone(),
                    quantity: 0,
                    cost: 0.0,
                });
            line.quantity += assignment.quantity;
            line.cost += price * f64::from(assignment.quantity);
            totals.cost += price * f64::from(assignment.quantity);
        }

        Self {
            boards: boards.into_values().collect(),
            surfaces: surfaces.into_values().collect(),
            edges: edges.into_values().collect(),
            fittings: fittings.into_values().collect(),
            totals,
        }
    }

    /// Flat CSV: `section,id,quantity,unit,amount,cost,co2_kg`
    pub fn to_csv(&self) -> CamToolResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["section", "id", "quantity", "unit", "amount", "cost", "co2_kg"])?;

        for line in &self.boards {
            writer.write_record([
                "board".to_string(),
                line.material_id.clone(),
                line.panels.to_string(),
                "m2".to_string(),
                format!("{:.3}", line.area_m2),
                format!("{:.2}", line.cost),
                format!("{:.3}", line.co2_kg),
            ])?;
        }
        for line in &self.surfaces {
            writer.write_record([
                "surface".to_string(),
                line.material_id.clone(),
                line.faces.to_string(),
                "m2".to_string(),
                format!("{:.3}", line.area_m2),
                format!("{:.2}", line.cost),
                format!("{:.3}", line.co2_kg),
            ])?;
        }
        for line in &self.edges {
            writer.write_record([
                "edge".to_string(),
                line.material_id.clone(),
                String::new(),
                "m".to_string(),
                format!("{:.3}", line.length_m),
                format!("{:.2}", line.cost),
                String::new(),
            ])?;
        }
        for line in &self.fittings {
            writer.write_record([
                "fitting".to_string(),
                line.fitting_id.clone(),
                line.quantity.to_string(),
                "pcs".to_string(),
                line.quantity.to_string(),
                format!("{:.2}", line.cost),
                String::new(),
            ])?;
        }
        writer.write_record([
            "total".to_string(),
            String::new(),
            String::new(),
            "kg".to_string(),
            format!("{:.3}", self.totals.weight_kg),
            format!("{:.2}", self.totals.cost),
            format!("{:.3}", self.totals.co2_kg),
        ])?;
        into_string(writer)
    }
}

// ---------------------------------------------------------------------------
// Manifest and CNC program
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestPanel {
    pub id: String,
    pub role: String,
    pub cut_width: f64,
    pub cut_height: f64,
    pub thickness: f64,
    pub operations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub document_id: String,
    pub revision: u64,
    pub state: GateState,
    pub dimensions: CabinetDimensions,
    pub panels: Vec<ManifestPanel>,
    pub errors: usize,
    pub warnings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl Manifest {
    pub fn build(cabinet: &Cabinet, timestamp: Option<DateTime<Utc>>) -> Self {
        let panels = cabinet
            .panels
            .iter()
            .map(|panel| ManifestPanel {
                id: panel.id.clone(),
                role: panel.role.to_string(),
                cut_width: round3(panel.computed.cut_width),
                cut_height: round3(panel.computed.cut_height),
                thickness: round3(panel.computed.real_thickness),
                operations: cabinet
                    .operations
                    .panel(&panel.id)
                    .map(|ops| ops.operations.len())
                    .unwrap_or(0),
            })
            .collect();

        Self {
            document_id: cabinet.id.to_string(),
            revision: cabinet.revision,
            state: cabinet.gate.state(),
            dimensions: cabinet.intent.dimensions,
            panels,
            errors: cabinet.error_count(),
            warnings: cabinet.warning_count(),
            generated_at: timestamp,
        }
    }
}

/// Machine-neutral program: the operation graph in the cut frame, face B
/// unmirrored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CncProgram {
    pub document_id: String,
    pub revision: u64,
    pub units: String,
    #[serde(flatten)]
    pub graph: OperationGraph,
}

impl CncProgram {
    pub fn build(cabinet: &Cabinet) -> Self {
        Self {
            document_id: cabinet.id.to_string(),
            revision: cabinet.revision,
            units: "mm".to_string(),
            graph: cabinet.operations.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Gated entry point
// ---------------------------------------------------------------------------

/// Produce the artifacts of one format
///
/// DXF yields the job document followed by one document per panel; every
/// other format yields a single artifact.
pub fn export(
    cabinet: &Cabinet,
    format: ExportFormat,
    context: &ExportContext<'_>,
) -> CamToolResult<Vec<Artifact>> {
    let permission = cabinet.can_export(format);
    if !permission.allowed {
        tracing::warn!(
            "Refused {} export of {} in {}: {}",
            format,
            cabinet.id,
            permission.current,
            permission.blocking.join("; ")
        );
        return Err(CamToolError::ExportNotPermitted {
            format,
            required: permission.required,
            current: permission.current,
            blocking: permission.blocking,
        });
    }

    let single = |name: &str, content: String| {
        vec![Artifact {
            format,
            file_name: format!("{}.{}", name, format.extension()),
            content,
        }]
    };

    let artifacts = match format {
        ExportFormat::CutList => single("cut_list", cut_list_csv(cabinet)?),
        ExportFormat::Bom => single(
            "bom",
            Bom::build(cabinet, context.materials, context.catalogue).to_csv()?,
        ),
        ExportFormat::Manifest => single(
            "manifest",
            serde_json::to_string_pretty(&Manifest::build(cabinet, context.timestamp))?,
        ),
        ExportFormat::CncProgram => single(
            "cnc_program",
            serde_json::to_string_pretty(&CncProgram::build(cabinet))?,
        ),
        ExportFormat::Dxf => {
            let generator = DxfGenerator::new(context.dxf.clone());
            let mut artifacts = vec![Artifact {
                format,
                file_name: "cabinet.dxf".to_string(),
                content: generator.job_document(&cabinet.operations),
            }];
            for panel in &cabinet.operations.panels {
                artifacts.push(Artifact {
                    format,
                    file_name: format!("{}.dxf", panel.panel_id),
                    content: generator.panel_document(panel),
                });
            }
            artifacts
        }
    };

    tracing::info!(
        "Exported {} of {} rev {} ({} file(s))",
        format,
        cabinet.id,
        cabinet.revision,
        artifacts.len()
    );
    Ok(artifacts)
}

/// DXF document of a single panel, gated like a full DXF export
pub fn export_panel_dxf(
    cabinet: &Cabinet,
    panel_id: &str,
    dxf: &DxfSettings,
) -> CamToolResult<Artifact> {
    let permission = cabinet.can_export(ExportFormat::Dxf);
    if !permission.allowed {
        return Err(CamToolError::ExportNotPermitted {
            format: ExportFormat::Dxf,
            required: permission.required,
            current: permission.current,
            blocking: permission.blocking,
        });
    }
    let panel = cabinet
        .operations
        .panel(panel_id)
        .ok_or_else(|| CamToolError::PanelNotFound(panel_id.to_string()))?;
    Ok(Artifact {
        format: ExportFormat::Dxf,
        file_name: format!("{}.dxf", panel_id),
        content: DxfGenerator::new(dxf.clone()).panel_document(panel),
    })
}
