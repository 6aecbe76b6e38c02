//! Cleaning of untrusted location input, e.g. from a submitted web form.
//!
//! Every field of a [LocationForm] is optional. When creating a new location a
//! missing required field is an error. When modifying an existing location a
//! missing field keeps its stored value, so only the submitted fields change.
use super::{Location, MAX_NAME_LENGTH};
use crate::{
    coordinate::{validate_latitude, validate_longitude},
    core::error::ValidationError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-field error messages produced while cleaning a [LocationForm], keyed by
/// field name
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The error message for `field`, if that field was rejected
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Records the error in `result` (if any) against `field` and returns the
    /// cleaned value otherwise
    fn check<T>(&mut self, field: &'static str, result: Result<T, ValidationError>) -> Option<T> {
        result
            .inspect_err(|e| {
                self.0.insert(field, e.to_string());
            })
            .ok()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msgs = self
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>();
        write!(f, "{}", msgs.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Raw location values as submitted by a user. Coordinates are kept as text so
/// that invalid input can be shown back to the user unchanged.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
pub struct LocationForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

/// A cleaned value for a single field. `Keep` means the field was not
/// submitted and the existing value should stay as it is.
enum Cleaned<T> {
    Keep,
    Set(T),
}

impl<T> Cleaned<T> {
    fn apply(self, target: &mut T) {
        if let Cleaned::Set(v) = self {
            *target = v;
        }
    }
}

fn required(value: &Option<String>, partial: bool) -> Result<Cleaned<&str>, ValidationError> {
    match value.as_deref().map(str::trim) {
        None if partial => Ok(Cleaned::Keep),
        None | Some("") => Err(ValidationError::Required),
        Some(s) => Ok(Cleaned::Set(s)),
    }
}

fn clean_name(value: &Option<String>, partial: bool) -> Result<Cleaned<String>, ValidationError> {
    match required(value, partial)? {
        Cleaned::Keep => Ok(Cleaned::Keep),
        Cleaned::Set(s) => {
            let actual = s.chars().count();
            if actual > MAX_NAME_LENGTH {
                Err(ValidationError::TooLong {
                    max: MAX_NAME_LENGTH,
                    actual,
                })
            } else {
                Ok(Cleaned::Set(s.to_string()))
            }
        }
    }
}

fn clean_description(value: &Option<String>, partial: bool) -> Result<Cleaned<String>, ValidationError> {
    match value {
        None if partial => Ok(Cleaned::Keep),
        None => Ok(Cleaned::Set(String::new())),
        Some(s) => Ok(Cleaned::Set(s.clone())),
    }
}

fn clean_coordinate(
    value: &Option<String>,
    partial: bool,
    validate: fn(f64) -> Result<f64, ValidationError>,
) -> Result<Cleaned<f64>, ValidationError> {
    match required(value, partial)? {
        Cleaned::Keep => Ok(Cleaned::Keep),
        Cleaned::Set(s) => {
            let v: f64 = s
                .parse()
                .map_err(|_| ValidationError::NotANumber(s.to_string()))?;
            if !v.is_finite() {
                return Err(ValidationError::NotANumber(s.to_string()));
            }
            validate(v).map(Cleaned::Set)
        }
    }
}

/// The cleaned values of every field in a form
struct CleanedFields {
    name: Cleaned<String>,
    description: Cleaned<String>,
    latitude: Cleaned<f64>,
    longitude: Cleaned<f64>,
}

impl LocationForm {
    /// A form pre-filled with the current values of `loc`
    pub fn from_location(loc: &Location) -> Self {
        Self {
            name: Some(loc.name.clone()),
            description: Some(loc.description.clone()),
            latitude: Some(loc.latitude.to_string()),
            longitude: Some(loc.longitude.to_string()),
        }
    }

    /// A copy of this form where every field that was not submitted is filled
    /// in with the current value from `loc`
    pub fn or_location(&self, loc: &Location) -> Self {
        let current = Self::from_location(loc);
        Self {
            name: self.name.clone().or(current.name),
            description: self.description.clone().or(current.description),
            latitude: self.latitude.clone().or(current.latitude),
            longitude: self.longitude.clone().or(current.longitude),
        }
    }

    /// Runs each field validator in order. All fields are checked so that
    /// every problem can be reported at once.
    fn clean(&self, partial: bool) -> Result<CleanedFields, FieldErrors> {
        debug!(?self, partial, "Cleaning form data");
        let mut errors = FieldErrors::default();
        let name = errors.check("name", clean_name(&self.name, partial));
        let description = errors.check("description", clean_description(&self.description, partial));
        let latitude = errors.check(
            "latitude",
            clean_coordinate(&self.latitude, partial, validate_latitude),
        );
        let longitude = errors.check(
            "longitude",
            clean_coordinate(&self.longitude, partial, validate_longitude),
        );
        match (name, description, latitude, longitude) {
            (Some(name), Some(description), Some(latitude), Some(longitude)) => Ok(CleanedFields {
                name,
                description,
                latitude,
                longitude,
            }),
            _ => Err(errors),
        }
    }

    /// Build a new, not yet stored, location from this form
    pub fn to_new_location(&self) -> Result<Location, FieldErrors> {
        let fields = self.clean(false)?;
        let mut loc = Location::new(String::new(), String::new(), 0.0, 0.0);
        fields.name.apply(&mut loc.name);
        fields.description.apply(&mut loc.description);
        fields.latitude.apply(&mut loc.latitude);
        fields.longitude.apply(&mut loc.longitude);
        Ok(loc)
    }

    /// Change the fields of `loc` that were submitted in this form. Nothing is
    /// changed if any submitted field is invalid.
    pub fn apply_to(&self, loc: &mut Location) -> Result<(), FieldErrors> {
        let fields = self.clean(true)?;
        fields.name.apply(&mut loc.name);
        fields.description.apply(&mut loc.description);
        fields.latitude.apply(&mut loc.latitude);
        fields.longitude.apply(&mut loc.longitude);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn valid_form() -> LocationForm {
        LocationForm {
            name: Some("Test Location".into()),
            description: Some("A test location".into()),
            latitude: Some("32.7767".into()),
            longitude: Some("-96.7970".into()),
        }
    }

    #[test]
    fn test_valid_form() {
        let loc = valid_form().to_new_location().expect("form should be valid");
        assert_eq!(loc.id, -1);
        assert_eq!(loc.name, "Test Location");
        assert_eq!(loc.description, "A test location");
        assert_eq!(loc.latitude, 32.7767);
        assert_eq!(loc.longitude, -96.7970);
    }

    #[test]
    fn test_invalid_latitude() {
        let form = LocationForm {
            latitude: Some("91.0".into()),
            ..valid_form()
        };
        let errors = form.to_new_location().expect_err("form should be invalid");
        assert_eq!(
            errors.get("latitude"),
            Some("Latitude must be between -90 and 90 degrees")
        );
        assert!(!errors.contains("longitude"));
    }

    #[test]
    fn test_invalid_longitude() {
        let form = LocationForm {
            longitude: Some("181.0".into()),
            ..valid_form()
        };
        let errors = form.to_new_location().expect_err("form should be invalid");
        assert_eq!(
            errors.get("longitude"),
            Some("Longitude must be between -180 and 180 degrees")
        );
        assert!(!errors.contains("latitude"));
    }

    #[test]
    fn test_empty_name() {
        let form = LocationForm {
            name: Some("".into()),
            ..valid_form()
        };
        let errors = form.to_new_location().expect_err("form should be invalid");
        assert_eq!(errors.get("name"), Some("This field is required."));

        let form = LocationForm {
            name: Some("x".repeat(101)),
            ..valid_form()
        };
        let errors = form.to_new_location().expect_err("form should be invalid");
        assert_eq!(
            errors.get("name"),
            Some("Ensure this value has at most 100 characters (it has 101).")
        );
    }

    #[test]
    fn test_missing_fields() {
        let errors = LocationForm::default()
            .to_new_location()
            .expect_err("empty form should be invalid");
        assert!(errors.contains("name"));
        assert!(errors.contains("latitude"));
        assert!(errors.contains("longitude"));
        // the description is free text and may be left out
        assert!(!errors.contains("description"));

        let form = LocationForm {
            description: None,
            ..valid_form()
        };
        let loc = form.to_new_location().expect("form should be valid");
        assert_eq!(loc.description, "");
    }

    #[test]
    fn test_not_a_number() {
        let form = LocationForm {
            latitude: Some("north".into()),
            longitude: Some("NaN".into()),
            ..valid_form()
        };
        let errors = form.to_new_location().expect_err("form should be invalid");
        assert_eq!(errors.get("latitude"), Some("Enter a number."));
        assert_eq!(errors.get("longitude"), Some("Enter a number."));
        assert_eq!(
            errors.to_string(),
            "latitude: Enter a number.; longitude: Enter a number."
        );
    }

    #[test]
    fn test_apply_partial() {
        let mut loc = valid_form().to_new_location().expect("form should be valid");
        loc.id = 7;
        let form = LocationForm {
            name: Some("Updated Location".into()),
            ..Default::default()
        };
        form.apply_to(&mut loc).expect("form should be valid");
        assert_eq!(loc.id, 7);
        assert_eq!(loc.name, "Updated Location");
        assert_eq!(loc.description, "A test location");
        assert_eq!(loc.latitude, 32.7767);
        assert_eq!(loc.longitude, -96.7970);
    }

    #[test]
    fn test_apply_invalid_changes_nothing() {
        let mut loc = valid_form().to_new_location().expect("form should be valid");
        let before = loc.clone();
        let form = LocationForm {
            name: Some("Updated Location".into()),
            latitude: Some("-91".into()),
            ..Default::default()
        };
        let errors = form.apply_to(&mut loc).expect_err("form should be invalid");
        assert!(errors.contains("latitude"));
        assert_eq!(loc, before);

        // a submitted but empty required field is an error, not a "keep"
        let form = LocationForm {
            longitude: Some("".into()),
            ..Default::default()
        };
        let errors = form.apply_to(&mut loc).expect_err("form should be invalid");
        assert_eq!(errors.get("longitude"), Some("This field is required."));
    }

    #[test]
    fn test_from_location() {
        let loc = valid_form().to_new_location().expect("form should be valid");
        let form = LocationForm::from_location(&loc);
        assert_eq!(form, valid_form_normalized());
        assert_eq!(form.to_new_location().expect("form should be valid"), loc);
    }

    #[test]
    fn test_or_location() {
        let loc = valid_form().to_new_location().expect("form should be valid");
        let form = LocationForm {
            latitude: Some("north".into()),
            ..Default::default()
        };
        assert_eq!(
            form.or_location(&loc),
            LocationForm {
                latitude: Some("north".into()),
                ..valid_form_normalized()
            }
        );
    }

    fn valid_form_normalized() -> LocationForm {
        LocationForm {
            longitude: Some("-96.797".into()),
            ..valid_form()
        }
    }
}
