//! A common interface for objects that are stored in the database
use crate::{
    Database,
    core::{
        error::Result,
        query::{DynFilterPart, SortSpecs, ToSql},
    },
};
use async_trait::async_trait;

/// An object that can be inserted, loaded, updated and deleted from the
/// database. Each object is identified by a unique id that is assigned by the
/// database when the object is first inserted.
#[async_trait]
pub trait Loadable {
    /// The type of the unique identifier of this object
    type Id: Copy + PartialEq + std::fmt::Debug + Send + Sync;

    /// A type describing the fields that results can be sorted by
    type Sort: ToSql + Send;

    /// The id that signifies that this object has not been stored in the
    /// database yet
    fn invalid_id() -> Self::Id;

    /// The id of this object
    fn id(&self) -> Self::Id;

    /// Mark this object as no longer being stored in the database
    fn set_invalid(&mut self);

    /// Whether this object has been stored in the database
    fn is_stored(&self) -> bool {
        self.id() != Self::invalid_id()
    }

    /// Add this object to the database. If this call completes successfully,
    /// the id of this object will be updated to the ID of the inserted row in the
    /// database
    async fn insert(&mut self, db: &Database) -> Result<&Self::Id>;

    /// Load the object with the given id from the database
    async fn load(id: Self::Id, db: &Database) -> Result<Self>
    where
        Self: Sized;

    /// Load all objects matching `filter` from the database
    async fn load_all(
        filter: Option<DynFilterPart>,
        sort: Option<SortSpecs<Self::Sort>>,
        db: &Database,
    ) -> Result<Vec<Self>>
    where
        Self: Sized;

    /// Count the objects matching `filter`
    async fn count(filter: Option<DynFilterPart>, db: &Database) -> Result<u64>;

    /// Update the object in the database such that it matches this object
    async fn update(&self, db: &Database) -> Result<()>;

    /// Remove the object with the given id from the database
    async fn delete_id(id: &Self::Id, db: &Database) -> Result<()>;

    /// Remove this object from the database and mark it as no longer stored
    async fn delete(&mut self, db: &Database) -> Result<()> {
        let id = self.id();
        Self::delete_id(&id, db).await?;
        self.set_invalid();
        Ok(())
    }
}
