//! Soft-delete lifecycle: Active -> Deleted -> (Active | Purged).
//!
//! A soft-deleted row stays in the table with `is_deleted = true` and the
//! deletion audit fields (`deleted_at`, `deleted_by`, `deletion_reason`) set.
//! Restore clears all four fields; purge physically removes the row and is
//! only reachable from the Deleted state, so nothing is ever hard-deleted
//! without passing through a restorable state first.
//!
//! Every transition executes as a single conditional UPDATE or DELETE, so no
//! partially-transitioned row is ever observable, and concurrent transitions
//! race safely on the `is_deleted` guard in the statement's WHERE clause.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select,
    sea_query::{Expr, SimpleExpr},
};
use uuid::Uuid;

use crate::errors::SoftDeleteError;

/// Which lifecycle states a query should see. Composes with compiled filter
/// conditions via AND; it is an extra predicate, not an alternative query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletedVisibility {
    #[default]
    ActiveOnly,
    DeletedOnly,
    All,
}

impl DeletedVisibility {
    /// The scope predicate over the `is_deleted` column, or `None` for
    /// [`DeletedVisibility::All`].
    #[must_use]
    pub fn condition<C: ColumnTrait>(self, is_deleted: C) -> Option<SimpleExpr> {
        match self {
            Self::ActiveOnly => Some(is_deleted.eq(false)),
            Self::DeletedOnly => Some(is_deleted.eq(true)),
            Self::All => None,
        }
    }
}

/// What [`SoftDeleteResource::mark_deleted`] actually did. Re-deleting a
/// Deleted row is a no-op at the state level; CRUD callers that want to
/// reject a double delete can branch on [`SoftDeleteOutcome::AlreadyDeleted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDeleteOutcome {
    Deleted,
    AlreadyDeleted,
}

/// Soft-delete operations for one entity type.
///
/// Implementors name the entity's id column and the four lifecycle columns;
/// the transition methods come as default implementations.
#[async_trait]
pub trait SoftDeleteResource: Send + Sync
where
    <Self::EntityType as EntityTrait>::Model: Sync,
{
    type EntityType: EntityTrait<Column = Self::ColumnType>;
    type ColumnType: ColumnTrait + Send;

    const ID_COLUMN: Self::ColumnType;
    const IS_DELETED_COLUMN: Self::ColumnType;
    const DELETED_AT_COLUMN: Self::ColumnType;
    const DELETED_BY_COLUMN: Self::ColumnType;
    const DELETION_REASON_COLUMN: Self::ColumnType;
    const RESOURCE_NAME: &'static str;

    /// Reads the lifecycle flag off a fetched row.
    fn is_deleted(model: &<Self::EntityType as EntityTrait>::Model) -> bool;

    /// Query over Active rows only (`is_deleted = false`).
    #[must_use]
    fn find_active() -> Select<Self::EntityType> {
        Self::EntityType::find().filter(Self::IS_DELETED_COLUMN.eq(false))
    }

    /// Query over Deleted rows only (`is_deleted = true`).
    #[must_use]
    fn find_deleted() -> Select<Self::EntityType> {
        Self::EntityType::find().filter(Self::IS_DELETED_COLUMN.eq(true))
    }

    /// Query over all rows regardless of lifecycle state.
    #[must_use]
    fn find_all() -> Select<Self::EntityType> {
        Self::EntityType::find()
    }

    /// Active -> Deleted. Sets all four lifecycle fields in one UPDATE.
    ///
    /// Deleting an already-Deleted row leaves it untouched and reports
    /// [`SoftDeleteOutcome::AlreadyDeleted`]; the original deletion audit
    /// fields are preserved.
    ///
    /// # Errors
    ///
    /// [`SoftDeleteError::NotFound`] if no row has the given id, or
    /// [`SoftDeleteError::Database`] on store failure.
    async fn mark_deleted(
        db: &DatabaseConnection,
        id: Uuid,
        actor: Uuid,
        reason: Option<String>,
    ) -> Result<SoftDeleteOutcome, SoftDeleteError> {
        let model = Self::EntityType::find()
            .filter(Self::ID_COLUMN.eq(id))
            .one(db)
            .await?
            .ok_or_else(|| SoftDeleteError::not_found(Self::RESOURCE_NAME, id))?;
        if Self::is_deleted(&model) {
            return Ok(SoftDeleteOutcome::AlreadyDeleted);
        }

        let result = Self::EntityType::update_many()
            .col_expr(Self::IS_DELETED_COLUMN, Expr::value(true))
            .col_expr(Self::DELETED_AT_COLUMN, Expr::value(Utc::now()))
            .col_expr(Self::DELETED_BY_COLUMN, Expr::value(Some(actor)))
            .col_expr(Self::DELETION_REASON_COLUMN, Expr::value(reason))
            .filter(Self::ID_COLUMN.eq(id))
            .filter(Self::IS_DELETED_COLUMN.eq(false))
            .exec(db)
            .await?;

        // Zero rows means another writer deleted it between the read and the
        // guarded UPDATE.
        if result.rows_affected == 0 {
            return Ok(SoftDeleteOutcome::AlreadyDeleted);
        }
        tracing::debug!(resource = Self::RESOURCE_NAME, %id, %actor, "soft-deleted");
        Ok(SoftDeleteOutcome::Deleted)
    }

    /// Deleted -> Active. Clears all four lifecycle fields in one UPDATE.
    ///
    /// # Errors
    ///
    /// [`SoftDeleteError::AlreadyActive`] if the row is not Deleted,
    /// [`SoftDeleteError::NotFound`] if it does not exist, or
    /// [`SoftDeleteError::Database`] on store failure.
    async fn restore(db: &DatabaseConnection, id: Uuid) -> Result<(), SoftDeleteError> {
        let model = Self::EntityType::find()
            .filter(Self::ID_COLUMN.eq(id))
            .one(db)
            .await?
            .ok_or_else(|| SoftDeleteError::not_found(Self::RESOURCE_NAME, id))?;
        if !Self::is_deleted(&model) {
            return Err(SoftDeleteError::already_active(Self::RESOURCE_NAME, id));
        }

        let result = Self::EntityType::update_many()
            .col_expr(Self::IS_DELETED_COLUMN, Expr::value(false))
            .col_expr(Self::DELETED_AT_COLUMN, Expr::value(Option::<DateTime<Utc>>::None))
            .col_expr(Self::DELETED_BY_COLUMN, Expr::value(Option::<Uuid>::None))
            .col_expr(Self::DELETION_REASON_COLUMN, Expr::value(Option::<String>::None))
            .filter(Self::ID_COLUMN.eq(id))
            .filter(Self::IS_DELETED_COLUMN.eq(true))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(SoftDeleteError::already_active(Self::RESOURCE_NAME, id));
        }
        tracing::debug!(resource = Self::RESOURCE_NAME, %id, "restored");
        Ok(())
    }

    /// Deleted -> Purged. Physically removes the row; irreversible.
    ///
    /// Only reachable from the Deleted state. An Active row must be
    /// soft-deleted first.
    ///
    /// # Errors
    ///
    /// [`SoftDeleteError::NotDeleted`] if the row is Active,
    /// [`SoftDeleteError::NotFound`] if it does not exist, or
    /// [`SoftDeleteError::Database`] on store failure.
    async fn purge(db: &DatabaseConnection, id: Uuid) -> Result<(), SoftDeleteError> {
        let model = Self::EntityType::find()
            .filter(Self::ID_COLUMN.eq(id))
            .one(db)
            .await?
            .ok_or_else(|| SoftDeleteError::not_found(Self::RESOURCE_NAME, id))?;
        if !Self::is_deleted(&model) {
            return Err(SoftDeleteError::not_deleted(Self::RESOURCE_NAME, id));
        }

        let result = Self::EntityType::delete_many()
            .filter(Self::ID_COLUMN.eq(id))
            .filter(Self::IS_DELETED_COLUMN.eq(true))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(SoftDeleteError::not_deleted(Self::RESOURCE_NAME, id));
        }
        tracing::debug!(resource = Self::RESOURCE_NAME, %id, "purged");
        Ok(())
    }
}
