//! minijinja template filters and functions for displaying coordinates.
//!
//! These are deliberately lenient: templates may hand them anything, and a
//! value that isn't a finite number (or a string holding one) is returned
//! unchanged instead of failing the whole page.
use libmapping::coordinate;
use minijinja::Value;

fn coordinate_value(value: &Value) -> Option<f64> {
    match value.as_str() {
        Some(s) => s.trim().parse::<f64>().ok(),
        None if value.is_number() => f64::try_from(value.clone()).ok(),
        None => None,
    }
    .filter(|v| v.is_finite())
}

fn format_with(value: Value, f: fn(f64) -> String) -> Value {
    match coordinate_value(&value) {
        Some(v) => Value::from(f(v)),
        None => value,
    }
}

/// A minijinja template filter for formatting a latitude, e.g. `40°42'46"N`
pub(crate) fn latitude(value: Value) -> Value {
    format_with(value, coordinate::format_latitude)
}

/// A minijinja template filter for formatting a longitude, e.g. `74°0'21"W`
pub(crate) fn longitude(value: Value) -> Value {
    format_with(value, coordinate::format_longitude)
}

/// A minijinja template filter for formatting a latitude with two decimal
/// places, e.g. `40.71° N`
pub(crate) fn latitude_decimal(value: Value) -> Value {
    format_with(value, coordinate::format_latitude_decimal)
}

/// A minijinja template filter for formatting a longitude with two decimal
/// places, e.g. `74.01° W`
pub(crate) fn longitude_decimal(value: Value) -> Value {
    format_with(value, coordinate::format_longitude_decimal)
}

/// A minijinja template function for formatting a pair of coordinates, e.g.
/// `40°42'46"N, 74°0'21"W`
pub(crate) fn format_coordinates(latitude: Value, longitude: Value) -> String {
    format!(
        "{}, {}",
        self::latitude(latitude),
        self::longitude(longitude)
    )
}

pub(crate) fn format_coordinates_decimal(latitude: Value, longitude: Value) -> String {
    format!(
        "{}, {}",
        latitude_decimal(latitude),
        longitude_decimal(longitude)
    )
}
