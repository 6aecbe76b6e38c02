//! Validation and display of decimal-degree coordinates.
//!
//! Coordinates are stored as signed decimal degrees. For display they are
//! rendered as degrees, minutes and seconds with a hemisphere letter, e.g.
//! `40°42'46"N`. Each stage of the sexagesimal conversion truncates rather than
//! rounds, so `40.7128` becomes `40°42'46"N` even though the exact seconds value
//! is slightly above 46.
use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The axis a coordinate value is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// The smallest legal value on this axis, in degrees
    pub fn min(&self) -> f64 {
        -self.max()
    }

    /// The largest legal value on this axis, in degrees
    pub fn max(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// The hemisphere letter used for non-negative values
    pub fn positive_letter(&self) -> char {
        match self {
            Axis::Latitude => 'N',
            Axis::Longitude => 'E',
        }
    }

    /// The hemisphere letter used for negative values
    pub fn negative_letter(&self) -> char {
        match self {
            Axis::Latitude => 'S',
            Axis::Longitude => 'W',
        }
    }

    fn hemisphere(&self, value: f64) -> char {
        if value >= 0.0 {
            self.positive_letter()
        } else {
            self.negative_letter()
        }
    }

    /// Check that `value` lies within the inclusive range of this axis. NaN and
    /// infinite values are never within range.
    pub fn validate(&self, value: f64) -> Result<f64, ValidationError> {
        if (self.min()..=self.max()).contains(&value) {
            Ok(value)
        } else {
            warn!("Invalid {self} value: {value}");
            Err(ValidationError::Range { axis: *self, value })
        }
    }

    /// Render `value` as degrees, minutes and seconds followed by the hemisphere
    /// letter. Non-finite values are returned as their plain textual form.
    pub fn format_dms(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let magnitude = value.abs();
        let degrees = magnitude.floor();
        let minutes_fraction = (magnitude - degrees) * 60.0;
        let minutes = minutes_fraction.floor();
        let seconds = ((minutes_fraction - minutes) * 60.0).floor();
        format!(
            "{}°{}'{}\"{}",
            degrees as u64,
            minutes as u64,
            seconds as u64,
            self.hemisphere(value)
        )
    }

    /// Render `value` with two decimal places followed by a space and the
    /// hemisphere letter, e.g. `40.71° N`.
    pub fn format_decimal(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        format!("{:.2}° {}", value.abs(), self.hemisphere(value))
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "Latitude"),
            Axis::Longitude => write!(f, "Longitude"),
        }
    }
}

/// Returns `value` unchanged if it is a legal latitude (-90 to 90 degrees)
pub fn validate_latitude(value: f64) -> Result<f64, ValidationError> {
    Axis::Latitude.validate(value)
}

/// Returns `value` unchanged if it is a legal longitude (-180 to 180 degrees)
pub fn validate_longitude(value: f64) -> Result<f64, ValidationError> {
    Axis::Longitude.validate(value)
}

pub fn format_latitude(value: f64) -> String {
    Axis::Latitude.format_dms(value)
}

pub fn format_longitude(value: f64) -> String {
    Axis::Longitude.format_dms(value)
}

/// Formats a latitude/longitude pair, e.g. `40°42'46"N, 74°0'21"W`
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!(
        "{}, {}",
        format_latitude(latitude),
        format_longitude(longitude)
    )
}

pub fn format_latitude_decimal(value: f64) -> String {
    Axis::Latitude.format_decimal(value)
}

pub fn format_longitude_decimal(value: f64) -> String {
    Axis::Longitude.format_decimal(value)
}

/// Formats a latitude/longitude pair with two decimal places, e.g.
/// `40.71° N, 74.01° W`
pub fn format_coordinates_decimal(latitude: f64, longitude: f64) -> String {
    format!(
        "{}, {}",
        format_latitude_decimal(latitude),
        format_longitude_decimal(longitude)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_format_coordinates() {
        // Dallas
        assert_eq!(
            format_coordinates(32.7767, -96.7970),
            "32°46'36\"N, 96°47'49\"W"
        );
        assert_eq!(format_coordinates(0.0, 0.0), "0°0'0\"N, 0°0'0\"E");
        // Sydney
        assert_eq!(
            format_coordinates(-33.8688, 151.2093),
            "33°52'7\"S, 151°12'33\"E"
        );
        // New York: the seconds are truncated, not rounded
        assert_eq!(
            format_coordinates(40.7128, -74.0060),
            "40°42'46\"N, 74°0'21\"W"
        );
    }

    #[test]
    fn test_format_single_axis() {
        assert_eq!(format_latitude(0.0), "0°0'0\"N");
        assert_eq!(format_longitude(0.0), "0°0'0\"E");
        assert_eq!(format_latitude(-90.0), "90°0'0\"S");
        assert_eq!(format_longitude(180.0), "180°0'0\"E");
        assert_eq!(format_longitude(-0.5), "0°30'0\"W");
        // negative zero still counts as the positive hemisphere
        assert_eq!(format_latitude(-0.0), "0°0'0\"N");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_latitude(f64::NAN), "NaN");
        assert_eq!(format_longitude(f64::INFINITY), "inf");
        assert_eq!(format_latitude_decimal(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_latitude_decimal(40.7128), "40.71° N");
        assert_eq!(format_longitude_decimal(-74.0060), "74.01° W");
        assert_eq!(
            format_coordinates_decimal(40.7128, -74.0060),
            "40.71° N, 74.01° W"
        );
        assert_eq!(format_coordinates_decimal(0.0, 0.0), "0.00° N, 0.00° E");
    }

    #[test]
    fn test_validate_latitude() {
        for v in [-90.0, -89.999, -45.5, 0.0, 32.7767, 89.999, 90.0] {
            assert_eq!(validate_latitude(v), Ok(v));
        }
        for v in [-90.0001, 90.0001, 91.0, -180.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_latitude(v),
                Err(ValidationError::Range {
                    axis: Axis::Latitude,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_validate_longitude() {
        for v in [-180.0, -96.7970, 0.0, 91.0, 151.2093, 180.0] {
            assert_eq!(validate_longitude(v), Ok(v));
        }
        for v in [-180.0001, 180.0001, 181.0, f64::NEG_INFINITY] {
            assert!(matches!(
                validate_longitude(v),
                Err(ValidationError::Range {
                    axis: Axis::Longitude,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_range_error_message() {
        assert_eq!(
            validate_latitude(91.0).unwrap_err().to_string(),
            "Latitude must be between -90 and 90 degrees"
        );
        assert_eq!(
            validate_longitude(181.0).unwrap_err().to_string(),
            "Longitude must be between -180 and 180 degrees"
        );
    }
}
