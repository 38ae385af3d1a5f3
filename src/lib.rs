//! # filtercrate
//!
//! Declarative search, filtering, sorting, pagination and soft-delete helpers
//! for building list endpoints with Sea-ORM.
//!
//! Callers describe a query as data (a [`SearchFilterConfig`]) instead of
//! writing per-endpoint query code. Every referenced field is validated against
//! a [`FieldRegistry`] allow-list built from the entity's own columns, so no
//! caller-controlled string ever reaches the database as a raw column name or
//! SQL fragment.
//!
//! ## Components
//!
//! - **[`FieldRegistry`]**: per-entity allow-list of filterable/sortable columns
//! - **[`filtering::search`]**: free-text search compilation (LIKE or fulltext)
//! - **[`filtering::conditions`]**: field filter compilation (`equals`, `gt`, `in`, ...)
//! - **[`filtering::sort`]**: sort field/direction validation
//! - **[`query`]**: composes the above into one reusable `Select`
//! - **[`filtering::pagination`]**: page/size to offset/limit plus result metadata
//! - **[`soft_delete`]**: Active/Deleted/Purged lifecycle and scoped query variants
//!
//! ## Fail-open policy
//!
//! Malformed filter input never produces an error or an empty result set by
//! accident: unknown fields, missing operator values and empty search queries
//! all degrade to "no constraint applied". The one exception is the soft-delete
//! state machine, where an invalid transition (restoring an Active row, purging
//! a non-Deleted row) surfaces as a [`SoftDeleteError`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use filtercrate::{FieldRegistry, SearchFilterConfig, PaginationParams};
//! use filtercrate::query::{apply_pagination, compile};
//!
//! let registry = FieldRegistry::of::<users::Entity>();
//! let config: SearchFilterConfig = serde_json::from_str(body)?;
//! let params = PaginationParams::new(2, 10);
//!
//! let select = compile::<users::Entity>(&config, &registry, db.get_database_backend());
//! let total = select.clone().count(&db).await?;
//! let items = apply_pagination(select, &params).all(&db).await?;
//! let meta = filtercrate::paginate(&params, total);
//! ```

pub mod errors;
pub mod filtering;
pub mod models;
pub mod query;
pub mod registry;
pub mod soft_delete;

pub use errors::SoftDeleteError;
pub use filtering::pagination::{PaginationMetadata, paginate};
pub use filtering::sort::SortSpec;
pub use models::{
    FieldFilter, FilterOperator, PaginationParams, SearchFilterConfig, SortOrder,
    TextSearchFilter, TextSearchOperator,
};
pub use registry::{FieldRegistry, RegistrySet};
pub use soft_delete::{DeletedVisibility, SoftDeleteOutcome, SoftDeleteResource};
