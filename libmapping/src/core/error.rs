//! Objects related to reporting errors from this library
use crate::coordinate::Axis;

/// Reasons why a single field of a location was rejected
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{} must be between {} and {} degrees", .axis, .axis.min(), .axis.max())]
    Range { axis: Axis, value: f64 },

    #[error("This field is required.")]
    Required,

    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },

    #[error("Enter a number.")]
    NotANumber(String),
}

/// A list of error types that can occur within this library
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("can't update the object, no id was specified")]
    InvalidUpdateObjectNotFound,

    #[error("can't insert the object, it already exists in the database with id = {}", .0)]
    InvalidInsertObjectAlreadyExists(i64),

    #[error("invalid value for '{field}': {source}")]
    Validation {
        field: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),

    #[error(transparent)]
    DatabaseMigrationError(#[from] sqlx::migrate::MigrateError),
}

impl Error {
    /// Whether this error means that the requested object does not exist in
    /// the database
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::DatabaseError(sqlx::Error::RowNotFound))
    }
}

/// A convenience type alias for a [Result] with [Error] as its error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
