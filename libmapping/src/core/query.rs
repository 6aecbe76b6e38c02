//! utilities related to database queries
//!
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A Trait implemented by anything that can restrict the rows returned by a
/// query.
pub trait FilterPart: Send + Sync {
    /// convert the given filter part to SQL syntax and add it to the given [sqlx::QueryBuilder] object
    fn add_to_query(&self, builder: &mut sqlx::QueryBuilder<sqlx::Sqlite>);
}

/// A type-erased filter that can be passed to any of the `load_all()` style
/// functions
pub type DynFilterPart = Arc<dyn FilterPart>;

/// a trait that generates an sql respresentation of the implementing type
pub trait ToSql {
    fn to_sql(&self) -> String;
}

/// A type for specifying the sort order of an SQL query
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    #[default]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl ToSql for SortOrder {
    fn to_sql(&self) -> String {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
        .into()
    }
}

/// A type for specifying how the results from an SQL query should be sorted
#[derive(Clone, Debug)]
pub struct SortSpec<T: ToSql> {
    /// The field that the sql query should be sorted on. The type must be
    /// convertible to an SQL representation via [ToSql]
    pub field: T,
    /// The direction to sort results
    pub order: SortOrder,
}

impl<T: ToSql> ToSql for SortSpec<T> {
    fn to_sql(&self) -> String {
        format!("{} {}", self.field.to_sql(), self.order.to_sql())
    }
}

impl<T: ToSql> SortSpec<T> {
    pub fn new(field: T, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// A type representing an ordered list of multiple sort specifications. The
/// purpose of this type is merely to facilitate various convienience conversion
/// functions by implementing [From]
pub struct SortSpecs<T: ToSql>(pub Vec<SortSpec<T>>);

impl<T: ToSql> From<SortSpec<T>> for SortSpecs<T> {
    fn from(value: SortSpec<T>) -> Self {
        SortSpecs(vec![value])
    }
}

impl<T: ToSql> ToSql for SortSpecs<T> {
    fn to_sql(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let fields = self
            .0
            .iter()
            .map(|spec| spec.to_sql())
            .collect::<Vec<_>>()
            .join(", ");
        format!(" ORDER BY {fields}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Field(&'static str);

    impl ToSql for Field {
        fn to_sql(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_sort_specs_to_sql() {
        let specs: SortSpecs<Field> = SortSpec::new(Field("locname"), SortOrder::Ascending).into();
        assert_eq!(specs.to_sql(), " ORDER BY locname ASC");

        let specs = SortSpecs(vec![
            SortSpec::new(Field("locname"), SortOrder::Descending),
            SortSpec::new(Field("locid"), SortOrder::Ascending),
        ]);
        assert_eq!(specs.to_sql(), " ORDER BY locname DESC, locid ASC");

        let specs: SortSpecs<Field> = SortSpecs(vec![]);
        assert_eq!(specs.to_sql(), "");
    }
}
