//! Field allow-lists built from entity column introspection.
//!
//! Every caller-supplied field name (filter target, search field, sort key) is
//! checked against a [`FieldRegistry`] before it is allowed anywhere near a
//! query. The registry is derived once from the entity's `Column` enum, so the
//! allow-list can never drift from the schema the way a hand-maintained list
//! would, and no runtime reflection is involved.

use sea_orm::{ColumnTrait, ColumnType, EntityTrait, IdenStatic, Iterable};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldDef {
    sortable: bool,
}

/// Immutable allow-list of an entity's column names.
///
/// A field is *valid* if it names a declared column, and *sortable* if that
/// column holds a plain scalar. Complex columns (JSON, arrays, blobs, custom
/// types) stay filterable through the nullness operators but are never used
/// as sort keys.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    entity: String,
    fields: BTreeMap<String, FieldDef>,
}

/// Scalar column types that make sense as a single-key ORDER BY target.
fn is_sortable_column_type(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::Char(_)
            | ColumnType::String(_)
            | ColumnType::Text
            | ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger
            | ColumnType::TinyUnsigned
            | ColumnType::SmallUnsigned
            | ColumnType::Unsigned
            | ColumnType::BigUnsigned
            | ColumnType::Float
            | ColumnType::Double
            | ColumnType::Decimal(_)
            | ColumnType::Money(_)
            | ColumnType::DateTime
            | ColumnType::Timestamp
            | ColumnType::TimestampWithTimeZone
            | ColumnType::Time
            | ColumnType::Date
            | ColumnType::Year
            | ColumnType::Boolean
            | ColumnType::Uuid
    )
}

impl FieldRegistry {
    /// Builds the registry for an entity by walking its `Column` enum.
    #[must_use]
    pub fn of<E: EntityTrait>() -> Self {
        let fields = E::Column::iter()
            .map(|column| {
                let sortable = is_sortable_column_type(column.def().get_column_type());
                (column.as_str().to_owned(), FieldDef { sortable })
            })
            .collect();
        Self {
            entity: E::default().table_name().to_owned(),
            fields,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_fields(entity: &str, fields: &[(&str, bool)]) -> Self {
        Self {
            entity: entity.to_owned(),
            fields: fields
                .iter()
                .map(|&(name, sortable)| (name.to_owned(), FieldDef { sortable }))
                .collect(),
        }
    }

    /// The entity's table name.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Column names in deterministic (lexicographic) order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_valid(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    #[must_use]
    pub fn is_sortable(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|def| def.sortable)
    }
}

/// Registries for every entity type an application exposes, keyed by table
/// name. Built once at startup and passed explicitly to whoever needs it;
/// there is no process-wide registry state.
#[derive(Debug, Clone, Default)]
pub struct RegistrySet {
    registries: HashMap<String, FieldRegistry>,
}

impl RegistrySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<E: EntityTrait>(&mut self) {
        let registry = FieldRegistry::of::<E>();
        self.registries.insert(registry.entity.clone(), registry);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with<E: EntityTrait>(mut self) -> Self {
        self.register::<E>();
        self
    }

    /// Looks up the registry for an entity.
    ///
    /// # Panics
    ///
    /// Panics if the entity was never registered. An unknown entity type is a
    /// missing registration at startup, not bad request input.
    #[must_use]
    pub fn get(&self, entity: &str) -> &FieldRegistry {
        self.registries.get(entity).unwrap_or_else(|| {
            panic!("entity `{entity}` is not registered; call RegistrySet::register for it at startup")
        })
    }
}
