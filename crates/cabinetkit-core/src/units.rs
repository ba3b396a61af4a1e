//! Unit helpers
//!
//! All geometry is carried in millimetres as `f64`. Areas and lengths used
//! for costing are converted to square metres and metres here, and the
//! two text formats used by exporters live here so every artifact prints
//! numbers the same way.

/// Comparison tolerance for millimetre values
pub const EPSILON_MM: f64 = 1e-6;

/// Compare two millimetre values within [`EPSILON_MM`]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON_MM
}

/// Millimetres to metres
pub fn mm_to_m(value_mm: f64) -> f64 {
    value_mm / 1000.0
}

/// Area of a `width_mm` x `height_mm` rectangle in square metres
pub fn area_m2(width_mm: f64, height_mm: f64) -> f64 {
    (width_mm * height_mm) / 1_000_000.0
}

/// Format a length for coordinates and tables (fixed three decimals)
pub fn format_length(value_mm: f64) -> String {
    format!("{:.3}", normalize_zero(value_mm))
}

/// Format a value for use inside a layer name: at most three decimals,
/// trailing zeros removed (`5.0` -> `5`, `8.90` -> `8.9`).
pub fn format_compact(value: f64) -> String {
    let fixed = format!("{:.3}", normalize_zero(value));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

// -0.0 prints as "-0.000"
fn normalize_zero(value: f64) -> f64 {
    if value.abs() < 0.0005 {
        0.0
    } else {
        value
    }
}
