//! Objects relating to locations. A Location is a named geographic point with
//! an optional free-text description.
use crate::{
    Database,
    coordinate::{self, validate_latitude, validate_longitude},
    core::{
        error::{Error, Result, ValidationError},
        loadable::Loadable,
        query::{DynFilterPart, FilterPart, SortOrder, SortSpec, SortSpecs, ToSql},
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Row, Sqlite};
use std::sync::Arc;
use tracing::{debug, error, info};

pub use form::{FieldErrors, LocationForm};

pub mod form;

/// The maximum number of characters allowed in a location name
pub const MAX_NAME_LENGTH: usize = 100;

/// A type for specifying fields that can be used for filtering a database query
/// for locations
#[derive(Clone)]
pub enum Filter {
    /// Match the ID of the location to the given value
    Id(i64),
}

impl From<Filter> for DynFilterPart {
    fn from(value: Filter) -> Self {
        Arc::new(value)
    }
}

impl FilterPart for Filter {
    fn add_to_query(&self, builder: &mut sqlx::QueryBuilder<sqlx::Sqlite>) {
        match self {
            Self::Id(id) => _ = builder.push(" L.locid = ").push_bind(*id),
        }
    }
}

/// Fields that a list of locations can be sorted by
#[derive(Clone, Debug)]
pub enum SortField {
    Id,
    Name,
}

impl ToSql for SortField {
    fn to_sql(&self) -> String {
        match self {
            SortField::Id => "L.locid",
            SortField::Name => "L.locname",
        }
        .into()
    }
}

/// The order in which locations are presented unless a caller asks otherwise:
/// by name, with the id breaking ties between equal names
fn default_sort() -> SortSpecs<SortField> {
    SortSpecs(vec![
        SortSpec::new(SortField::Name, SortOrder::Ascending),
        SortSpec::new(SortField::Id, SortOrder::Ascending),
    ])
}

/// A named geographic point
#[derive(Debug, sqlx::FromRow, Deserialize, Serialize, PartialEq, Clone)]
pub struct Location {
    /// A unique ID that identifies this location in the database
    #[sqlx(rename = "locid")]
    pub id: i64,

    /// The name of the location
    #[sqlx(rename = "locname")]
    pub name: String,

    /// A longer description of the location. May be empty.
    #[sqlx(rename = "locdesc")]
    pub description: String,

    /// Latitude in decimal degrees, from -90 to 90
    pub latitude: f64,

    /// Longitude in decimal degrees, from -180 to 180
    pub longitude: f64,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[async_trait]
impl Loadable for Location {
    type Id = i64;

    type Sort = SortField;

    fn invalid_id() -> Self::Id {
        -1
    }

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_invalid(&mut self) {
        self.id = Self::invalid_id()
    }

    async fn insert(&mut self, db: &Database) -> Result<&Self::Id> {
        if self.is_stored() {
            return Err(Error::InvalidInsertObjectAlreadyExists(self.id));
        }
        self.check()?;
        debug!("Saving location: {}", self.name);
        let newval: Location = sqlx::query_as(
            r#"INSERT INTO mp_locations
          (locname, locdesc, latitude, longitude)
          VALUES (?, ?, ?, ?) RETURNING *"#,
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.latitude)
        .bind(self.longitude)
        .fetch_one(db.pool())
        .await
        .inspect_err(|e| error!("Error saving location {}: {e}", self.name))?;
        *self = newval;
        info!("Successfully saved location: {} ({})", self.name, self.id);
        Ok(&self.id)
    }

    async fn load(id: Self::Id, db: &Database) -> Result<Self> {
        Self::build_query(Some(Filter::Id(id).into()), None)
            .build_query_as()
            .fetch_one(db.pool())
            .await
            .map_err(Into::into)
    }

    async fn load_all(
        filter: Option<DynFilterPart>,
        sort: Option<SortSpecs<Self::Sort>>,
        db: &Database,
    ) -> Result<Vec<Self>> {
        Self::build_query(filter, sort)
            .build_query_as()
            .fetch_all(db.pool())
            .await
            .map_err(Into::into)
    }

    async fn count(filter: Option<DynFilterPart>, db: &Database) -> Result<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) as nlocations FROM mp_locations L");
        if let Some(f) = filter {
            qb.push(" WHERE ");
            f.add_to_query(&mut qb);
        }
        let n: i64 = qb.build().fetch_one(db.pool()).await?.try_get("nlocations")?;
        Ok(n as u64)
    }

    async fn update(&self, db: &Database) -> Result<()> {
        if !self.is_stored() {
            return Err(Error::InvalidUpdateObjectNotFound);
        }
        self.check()?;
        debug!("Saving location: {} ({})", self.name, self.id);
        let res = sqlx::query(
            "UPDATE mp_locations SET locname=?, locdesc=?, latitude=?, longitude=? WHERE locid=?",
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(self.id)
        .execute(db.pool())
        .await
        .inspect_err(|e| error!("Error saving location {}: {e}", self.name))?;
        if res.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound.into());
        }
        info!("Successfully saved location: {} ({})", self.name, self.id);
        Ok(())
    }

    async fn delete_id(id: &Self::Id, db: &Database) -> Result<()> {
        info!("Deleting location {id}");
        let res = sqlx::query("DELETE FROM mp_locations WHERE locid=?")
            .bind(id)
            .execute(db.pool())
            .await
            .inspect_err(|e| error!("Error deleting location {id}: {e}"))?;
        if res.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound.into());
        }
        info!("Successfully deleted location {id}");
        Ok(())
    }
}

impl Location {
    fn build_query(
        filter: Option<DynFilterPart>,
        sort: Option<SortSpecs<SortField>>,
    ) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(
            "SELECT L.locid, L.locname, L.locdesc, L.latitude, L.longitude FROM mp_locations L",
        );
        if let Some(f) = filter {
            qb.push(" WHERE ");
            f.add_to_query(&mut qb);
        }
        qb.push(sort.unwrap_or_else(default_sort).to_sql());
        qb
    }

    /// Creates a new location object with the given data. It will initially
    /// have an invalid ID until it is inserted into the database
    pub fn new(name: String, description: String, latitude: f64, longitude: f64) -> Self {
        Self {
            id: Self::invalid_id(),
            name,
            description,
            latitude,
            longitude,
        }
    }

    /// The coordinates of this location in degrees, minutes and seconds, e.g.
    /// `32°46'36"N, 96°47'49"W`
    pub fn coordinates(&self) -> String {
        coordinate::format_coordinates(self.latitude, self.longitude)
    }

    // The last line of defense before a row is written: values that made it
    // past form cleaning must still satisfy the table invariants.
    fn check(&self) -> Result<()> {
        let field_err = |field, source| Error::Validation { field, source };
        if self.name.is_empty() {
            return Err(field_err("name", ValidationError::Required));
        }
        let len = self.name.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(field_err(
                "name",
                ValidationError::TooLong {
                    max: MAX_NAME_LENGTH,
                    actual: len,
                },
            ));
        }
        validate_latitude(self.latitude).map_err(|e| field_err("latitude", e))?;
        validate_longitude(self.longitude).map_err(|e| field_err("longitude", e))?;
        Ok(())
    }
}
