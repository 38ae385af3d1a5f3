//! Query composition.
//!
//! Builds one `Select` from a [`SearchFilterConfig`]: the compiled filter
//! condition plus the validated ordering. Offset and limit are deliberately
//! not applied here; the caller layers them with [`apply_pagination`] on the
//! items query and runs the count on the unpaginated `Select`, so both see
//! identical predicates. That consistency is the core invariant of the
//! pagination model.

use sea_orm::{
    DatabaseBackend, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    sea_query::{Alias, Expr},
};

use crate::filtering::conditions::build_condition;
use crate::filtering::sort::compile_sort;
use crate::models::{PaginationParams, SearchFilterConfig};
use crate::registry::FieldRegistry;
use crate::soft_delete::{DeletedVisibility, SoftDeleteResource};

/// Compiles a config into one executable `Select` with filters and ordering
/// but no offset/limit.
#[must_use]
pub fn compile<E: EntityTrait>(
    config: &SearchFilterConfig,
    registry: &FieldRegistry,
    backend: DatabaseBackend,
) -> Select<E> {
    let mut select = E::find().filter(build_condition(config, registry, backend));
    if let Some(sort) = compile_sort(config.sort_by.as_deref(), config.sort_order, registry) {
        select = select.order_by(Expr::col(Alias::new(sort.field.as_str())), sort.direction);
    }
    select
}

/// [`compile`] with a soft-delete visibility scope ANDed onto the filters.
#[must_use]
pub fn compile_scoped<R: SoftDeleteResource>(
    config: &SearchFilterConfig,
    registry: &FieldRegistry,
    backend: DatabaseBackend,
    visibility: DeletedVisibility,
) -> Select<R::EntityType> {
    let mut select = compile::<R::EntityType>(config, registry, backend);
    if let Some(scope) = visibility.condition(R::IS_DELETED_COLUMN) {
        select = select.filter(scope);
    }
    select
}

/// Layers offset/limit onto a compiled query. Kept separate so the same
/// `Select` can serve the count query unmodified.
#[must_use]
pub fn apply_pagination<E: EntityTrait>(
    select: Select<E>,
    params: &PaginationParams,
) -> Select<E> {
    select.offset(params.offset()).limit(params.limit())
}
