//! Unit conversion utilities
//!
//! Plan coordinates are expressed in grid units. One grid unit maps to a
//! fixed number of meters; areas scale with the square of that factor.

/// Meters per grid unit used when no configuration is supplied
pub const DEFAULT_GRID_TO_METERS: f64 = 0.5;

/// Decimal places kept when reporting measurements
pub const DEFAULT_MEASUREMENT_PRECISION: u32 = 2;

/// Convert a length in grid units to meters
pub fn grid_to_meters(value: f64, grid_to_meters: f64) -> f64 {
    value * grid_to_meters
}

/// Convert a length in meters to grid units
pub fn meters_to_grid(value_m: f64, grid_to_meters: f64) -> f64 {
    if grid_to_meters == 0.0 {
        return 0.0;
    }
    value_m / grid_to_meters
}

/// Convert an area in square grid units to square meters
pub fn area_to_square_meters(area: f64, grid_to_meters: f64) -> f64 {
    area * grid_to_meters * grid_to_meters
}

/// Round a value to `precision` decimal places
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Format a length in meters for display
///
/// * `value_m` - Length in meters
/// * `precision` - Decimal places
pub fn format_meters(value_m: f64, precision: u32) -> String {
    format!("{:.*} m", precision as usize, value_m)
}

/// Format an area in square meters for display
pub fn format_area(value_m2: f64, precision: u32) -> String {
    format!("{:.*} m²", precision as usize, value_m2)
}
