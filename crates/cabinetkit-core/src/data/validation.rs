//! Validation results
//!
//! Every problem found in a design is a [`ValidationResult`]; nothing in
//! the pipeline aborts on bad input.

use serde::{Deserialize, Serialize};

/// What part of the design a result concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationCategory {
    /// Out-of-range outer dimensions
    Dimension,
    /// Spacing or depth collisions
    Structure,
    /// Unknown material references
    Material,
    /// Machine envelope exceeded
    Machine,
    /// Overload or incompatible hardware
    Safety,
}

impl std::fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dimension => write!(f, "dimension"),
            Self::Structure => write!(f, "structure"),
            Self::Material => write!(f, "material"),
            Self::Machine => write!(f, "machine"),
            Self::Safety => write!(f, "safety"),
        }
    }
}

/// Result severity; only `Error` blocks the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub category: ValidationCategory,
    pub severity: Severity,
    /// Stable machine-readable code (`shelf_overload`, `width_out_of_range`, ...)
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<String>,
}

impl ValidationResult {
    pub fn new(
        category: ValidationCategory,
        severity: Severity,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            code: code.into(),
            message: message.into(),
            panel_id: None,
        }
    }

    pub fn error(
        category: ValidationCategory,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(category, Severity::Error, code, message)
    }

    pub fn warning(
        category: ValidationCategory,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(category, Severity::Warning, code, message)
    }

    pub fn info(
        category: ValidationCategory,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(category, Severity::Info, code, message)
    }

    /// Attach the panel the finding concerns
    pub fn with_panel(mut self, panel_id: impl Into<String>) -> Self {
        self.panel_id = Some(panel_id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.panel_id {
            Some(panel) => write!(
                f,
                "[{} {}] {}: {}",
                self.severity, self.category, panel, self.message
            ),
            None => write!(f, "[{} {}] {}", self.severity, self.category, self.message),
        }
    }
}

/// Counts per severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl ValidationSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary
    }
}

/// Number of error-severity results
pub fn error_count(results: &[ValidationResult]) -> usize {
    results.iter().filter(|r| r.is_error()).count()
}

/// Order results by severity (errors first), category, panel and code
pub fn sort_results(results: &mut [ValidationResult]) {
    results.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.panel_id.cmp(&b.panel_id))
            .then_with(|| a.code.cmp(&b.code))
            .then_with(|| a.message.cmp(&b.message))
    });
}
