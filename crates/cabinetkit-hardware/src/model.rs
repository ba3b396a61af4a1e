use cabinetkit_core::FittingRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BrandTier {
    Preferred,
    Standard,
    Budget,
}

impl Default for BrandTier {
    fn default() -> Self {
        Self::Standard
    }
}

impl std::fmt::Display for BrandTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preferred => write!(f, "Preferred"),
            Self::Standard => write!(f, "Standard"),
            Self::Budget => write!(f, "Budget"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FittingCategory {
    Hinge,
    ShelfSupport,
    Rail,
    Connector,
}

impl FittingCategory {
    /// Assignment role the category fills, if it is assignable to a panel
    pub fn role(&self) -> Option<FittingRole> {
        match self {
            Self::Hinge => Some(FittingRole::Hinge),
            Self::ShelfSupport => Some(FittingRole::Bracket),
            Self::Rail => Some(FittingRole::Rail),
            Self::Connector => None,
        }
    }
}

impl std::fmt::Display for FittingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hinge => write!(f, "Hinge"),
            Self::ShelfSupport => write!(f, "Shelf Support"),
            Self::Rail => write!(f, "Rail"),
            Self::Connector => write!(f, "Connector"),
        }
    }
}

/// Physical fit constraints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FittingSpec {
    /// Thinnest panel the fitting mounts on (mm)
    pub min_panel_thickness: f64,
    /// Thickest panel the fitting mounts on (mm)
    pub max_panel_thickness: f64,
    /// Maximum opening angle in degrees (hinges)
    #[serde(default)]
    pub opening_angle: Option<f64>,
    /// Named drilling pattern (`system32`, `cup35_48x6`, ...)
    #[serde(default)]
    pub drilling_pattern: Option<String>,
}

impl Default for FittingSpec {
    fn default() -> Self {
        Self {
            min_panel_thickness: 12.0,
            max_panel_thickness: 40.0,
            opening_angle: None,
            drilling_pattern: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Fitting {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub brand_tier: BrandTier,
    /// The workshop stocks and prefers this part
    pub factory_preferred: bool,
    /// Load and fit values are catalogue-certified rather than estimated
    pub certified: bool,
    pub category: FittingCategory,

    /// Rated load of a full set on one panel (kg), whatever its piece count
    pub load_capacity_kg: f64,
    /// Price per piece; costs scale with the assigned quantity
    pub price: f64,

    pub spec: FittingSpec,
}

impl Default for Fitting {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: "New Fitting".to_string(),
            brand: String::new(),
            brand_tier: BrandTier::default(),
            factory_preferred: false,
            certified: false,
            category: FittingCategory::ShelfSupport,
            load_capacity_kg: 0.0,
            price: 0.0,
            spec: FittingSpec::default(),
        }
    }
}

impl Fitting {
    /// Check the record for non-physical values
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("id must not be empty".to_string());
        }
        if !(self.load_capacity_kg.is_finite() && self.load_capacity_kg > 0.0) {
            return Err(format!(
                "load capacity must be > 0, got {}",
                self.load_capacity_kg
            ));
        }
        if !(self.price.is_finite() && self.price >= 0.0) {
            return Err(format!("price must be >= 0, got {}", self.price));
        }
        if self.spec.min_panel_thickness > self.spec.max_panel_thickness {
            return Err(format!(
                "panel thickness range {}..{} is inverted",
                self.spec.min_panel_thickness, self.spec.max_panel_thickness
            ));
        }
        Ok(())
    }
}
