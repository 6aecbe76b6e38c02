//! Utilities for printing locations from the database
use clap::ValueEnum;
use serde::Serialize;
use table::MapctlTable;
use tabled::{Table, Tabled};

pub(crate) mod rows;
pub(crate) mod table;

/// Data format for printing locations
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub(crate) enum OutputFormat {
    /// Human readable table of data
    Table,
    /// JSON-formatted objects
    Json,
    /// YAML-formatted objects
    Yaml,
}

/// Serialize a single object into the given data format
pub(crate) fn format_one<T>(item: T, fmt: OutputFormat) -> anyhow::Result<String>
where
    T: Tabled + Serialize + 'static,
{
    match fmt {
        OutputFormat::Table => {
            let tbuilder = Table::builder(vec![item]).index().column(0).transpose();
            Ok(format!("{}", tbuilder.build().styled()))
        }
        OutputFormat::Json => serde_json::to_string(&item).map_err(|e| e.into()),
        OutputFormat::Yaml => serde_yaml::to_string(&item).map_err(|e| e.into()),
    }
}

/// Serialize a sequence of objects into the given data format
pub(crate) fn format_seq<I>(items: I, fmt: OutputFormat) -> anyhow::Result<String>
where
    I: IntoIterator,
    <I as IntoIterator>::Item: Tabled + Serialize + 'static,
{
    let iter = items.into_iter();
    match fmt {
        OutputFormat::Table => {
            let mut table = Table::new(iter);
            let n = table.count_rows() - 1;
            Ok(format!("{}\n{} records found", table.styled(), n))
        }
        OutputFormat::Json => {
            serde_json::to_string(&iter.collect::<Vec<_>>()).map_err(|e| e.into())
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&iter.collect::<Vec<_>>()).map_err(|e| e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{rows::LocationRow, *};
    use libmapping::location::Location;

    fn locations() -> Vec<Location> {
        let mut dallas = Location::new(
            "Test Location".to_string(),
            "A test location".to_string(),
            32.7767,
            -96.7970,
        );
        dallas.id = 1;
        let mut nyc = Location::new("Battery Park".to_string(), String::new(), 40.7128, -74.0060);
        nyc.id = 3;
        vec![nyc, dallas]
    }

    #[test]
    fn test_table() {
        let locs = locations();
        let out = format_seq(locs.iter().map(LocationRow::new), OutputFormat::Table)
            .expect("failed to format");
        assert!(out.contains("Battery Park"));
        assert!(out.contains("32°46'36\"N, 96°47'49\"W"));
        assert!(out.ends_with("2 records found"));

        let out = format_one(LocationRow::new(&locs[1]), OutputFormat::Table)
            .expect("failed to format");
        assert!(out.contains("Test Location"));
        assert!(out.contains("Coordinates"));
    }

    #[test]
    fn test_json() {
        let locs = locations();
        let out = format_one(LocationRow::new(&locs[1]), OutputFormat::Json)
            .expect("failed to format");
        let value: serde_json::Value = serde_json::from_str(&out).expect("invalid json");
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Test Location");
        assert_eq!(value["latitude"], 32.7767);
        assert_eq!(value["coordinates"], "32°46'36\"N, 96°47'49\"W");

        let out = format_seq(locs.iter().map(LocationRow::new), OutputFormat::Json)
            .expect("failed to format");
        let value: serde_json::Value = serde_json::from_str(&out).expect("invalid json");
        assert_eq!(value.as_array().map(|a| a.len()), Some(2));
        assert_eq!(value[0]["name"], "Battery Park");
    }

    #[test]
    fn test_yaml() {
        let locs = locations();
        let out = format_one(LocationRow::new(&locs[0]), OutputFormat::Yaml)
            .expect("failed to format");
        assert!(out.contains("name: Battery Park"));
        assert!(out.contains("longitude: -74.006"));
    }
}
