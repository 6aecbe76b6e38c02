use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct Cli {
    #[arg(short, long, default_value = "db.sqlite", global = true)]
    pub(crate) database: PathBuf,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Args, Debug)]
pub(crate) struct OutputOptions {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) output: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub(crate) enum SortKey {
    Name,
    Id,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    #[command(about = "List all locations")]
    List {
        #[arg(short, long, value_enum)]
        sort: Option<SortKey>,
        #[arg(short, long)]
        reverse: bool,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Show details about a single location")]
    Show {
        id: i64,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Add a new location to the database")]
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "lat", allow_hyphen_values = true)]
        latitude: String,
        #[arg(long = "long", allow_hyphen_values = true)]
        longitude: String,
    },
    #[command(
        about="Modify properties of a location",
        group(
            clap::ArgGroup::new("modify")
                .required(true)
                .multiple(true)
                .args(&["name", "description", "latitude", "longitude"]),
        ))]
    Modify {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "lat", allow_hyphen_values = true)]
        latitude: Option<String>,
        #[arg(long = "long", allow_hyphen_values = true)]
        longitude: Option<String>,
    },
    #[command(about = "Remove a location from the database")]
    Remove { id: i64 },
}
