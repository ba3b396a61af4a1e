//! Fitting catalogue
//!
//! Read-only mapping from fitting id to record. Records are validated when
//! the catalogue is built so ranking never sees a zero-capacity fitting.

use crate::error::{HardwareError, HardwareResult};
use crate::model::{BrandTier, Fitting, FittingCategory, FittingSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HardwareCatalogue {
    fittings: BTreeMap<String, Fitting>,
}

#[derive(Serialize, Deserialize)]
struct CatalogueFile {
    fittings: Vec<Fitting>,
}

impl HardwareCatalogue {
    /// Build a catalogue from records, rejecting duplicates and invalid entries
    pub fn new(fittings: Vec<Fitting>) -> HardwareResult<Self> {
        let mut map = BTreeMap::new();
        for fitting in fittings {
            fitting
                .validate()
                .map_err(|reason| HardwareError::InvalidFitting {
                    id: fitting.id.clone(),
                    reason,
                })?;
            if map.contains_key(&fitting.id) {
                return Err(HardwareError::DuplicateFitting(fitting.id));
            }
            map.insert(fitting.id.clone(), fitting);
        }
        Ok(Self { fittings: map })
    }

    /// Parse a catalogue from JSON (`{"fittings": [...]}`)
    pub fn from_json(json: &str) -> HardwareResult<Self> {
        let file: CatalogueFile = serde_json::from_str(json)?;
        Self::new(file.fittings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> HardwareResult<String> {
        let file = CatalogueFile {
            fittings: self.fittings.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn load_from_file(path: &Path) -> HardwareResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalogue = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded {} fittings from {}",
            catalogue.len(),
            path.display()
        );
        Ok(catalogue)
    }

    pub fn save_to_file(&self, path: &Path) -> HardwareResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> HardwareResult<&Fitting> {
        self.fittings
            .get(id)
            .ok_or_else(|| HardwareError::FittingNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fittings.contains_key(id)
    }

    /// Fittings in id order
    pub fn iter(&self) -> impl Iterator<Item = &Fitting> {
        self.fittings.values()
    }

    pub fn by_category(&self, category: FittingCategory) -> impl Iterator<Item = &Fitting> {
        self.fittings
            .values()
            .filter(move |f| f.category == category)
    }

    pub fn len(&self) -> usize {
        self.fittings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fittings.is_empty()
    }

    /// The built-in catalogue
    pub fn standard() -> Self {
        let fittings = vec![
            fitting(
                "pin_5_steel",
                "Shelf Pin 5mm Steel",
                "Hafele",
                BrandTier::Preferred,
                (true, true),
                FittingCategory::ShelfSupport,
                40.0,
                0.48,
                spec(12.0, 40.0, None, Some("system32")),
            ),
            fitting(
                "pin_5_nickel",
                "Shelf Pin 5mm Nickel",
                "Generic",
                BrandTier::Standard,
                (false, true),
                FittingCategory::ShelfSupport,
                25.0,
                0.32,
                spec(12.0, 40.0, None, Some("system32")),
            ),
            fitting(
                "pin_5_plastic",
                "Shelf Pin 5mm Plastic",
                "Generic",
                BrandTier::Budget,
                (false, false),
                FittingCategory::ShelfSupport,
                10.0,
                0.12,
                spec(12.0, 30.0, None, Some("system32")),
            ),
            fitting(
                "bracket_heavy",
                "Heavy Duty Shelf Bracket",
                "Hettich",
                BrandTier::Standard,
                (false, true),
                FittingCategory::ShelfSupport,
                80.0,
                7.6,
                spec(16.0, 40.0, None, Some("system32")),
            ),
            fitting(
                "hinge_clip_110",
                "Clip Top 110",
                "Blum",
                BrandTier::Preferred,
                (true, true),
                FittingCategory::Hinge,
                12.0,
                8.4,
                spec(15.0, 24.0, Some(110.0), Some("cup35_48x6")),
            ),
            fitting(
                "hinge_clip_155",
                "Clip Top 155",
                "Blum",
                BrandTier::Preferred,
                (false, true),
                FittingCategory::Hinge,
                10.0,
                15.6,
                spec(15.0, 24.0, Some(155.0), Some("cup35_48x6")),
            ),
            fitting(
                "hinge_sensys_110",
                "Sensys 110",
                "Hettich",
                BrandTier::Standard,
                (false, true),
                FittingCategory::Hinge,
                14.0,
                7.2,
                spec(15.0, 26.0, Some(110.0), Some("cup35_52x5.5")),
            ),
            fitting(
                "hinge_budget_95",
                "Overlay Hinge 95",
                "Generic",
                BrandTier::Budget,
                (false, false),
                FittingCategory::Hinge,
                6.0,
                1.8,
                spec(16.0, 22.0, Some(95.0), Some("cup35_48x6")),
            ),
            fitting(
                "rail_tandem_500",
                "Tandem 500",
                "Blum",
                BrandTier::Preferred,
                (true, true),
                FittingCategory::Rail,
                30.0,
                36.0,
                spec(16.0, 19.0, None, None),
            ),
            fitting(
                "dowel_8x30",
                "Beech Dowel 8x30",
                "Generic",
                BrandTier::Standard,
                (false, true),
                FittingCategory::Connector,
                50.0,
                0.02,
                spec(12.0, 40.0, None, None),
            ),
        ];

        match Self::new(fittings) {
            Ok(catalogue) => catalogue,
            Err(err) => unreachable!("standard fitting catalogue is inconsistent: {err}"),
        }
    }
}

fn spec(min: f64, max: f64, opening_angle: Option<f64>, pattern: Option<&str>) -> FittingSpec {
    FittingSpec {
        min_panel_thickness: min,
        max_panel_thickness: max,
        opening_angle,
        drilling_pattern: pattern.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn fitting(
    id: &str,
    name: &str,
    brand: &str,
    brand_tier: BrandTier,
    (factory_preferred, certified): (bool, bool),
    category: FittingCategory,
    load_capacity_kg: f64,
    price: f64,
    spec: FittingSpec,
) -> Fitting {
    Fitting {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        brand_tier,
        factory_preferred,
        certified,
        category,
        load_capacity_kg,
        price,
        spec,
    }
}
