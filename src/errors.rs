//! Errors surfaced by the soft-delete state machine.
//!
//! Everything else in this crate is fail-open: unknown fields, unknown
//! operators, empty queries and missing values all compile to "no constraint"
//! instead of raising, so a stale or malformed query parameter cannot take a
//! listing endpoint down. The state machine is the exception. Silently
//! accepting an invalid transition (restoring an Active row, purging a row
//! that was never soft-deleted) would mask data-integrity problems, so those
//! are real errors the caller must handle.

use sea_orm::DbErr;
use std::fmt;
use uuid::Uuid;

/// Rejected soft-delete transition or underlying database failure.
#[derive(Debug)]
pub enum SoftDeleteError {
    /// No row with the given id exists.
    NotFound { resource: &'static str, id: Uuid },

    /// Restore was requested for a row that is not Deleted.
    AlreadyActive { resource: &'static str, id: Uuid },

    /// Purge was requested for a row that is not Deleted. Rows must be
    /// soft-deleted before they can be physically removed.
    NotDeleted { resource: &'static str, id: Uuid },

    /// The underlying store failed. Details are logged, the wrapped error is
    /// kept for `source()`.
    Database { internal: DbErr },
}

impl SoftDeleteError {
    #[must_use]
    pub const fn not_found(resource: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource, id }
    }

    #[must_use]
    pub const fn already_active(resource: &'static str, id: Uuid) -> Self {
        Self::AlreadyActive { resource, id }
    }

    #[must_use]
    pub const fn not_deleted(resource: &'static str, id: Uuid) -> Self {
        Self::NotDeleted { resource, id }
    }

    /// True for the transition-rejection variants, false for `NotFound` and
    /// `Database`.
    #[must_use]
    pub const fn is_rejected_transition(&self) -> bool {
        matches!(self, Self::AlreadyActive { .. } | Self::NotDeleted { .. })
    }
}

impl fmt::Display for SoftDeleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "{resource} {id} not found")
            }
            Self::AlreadyActive { resource, id } => {
                write!(f, "{resource} {id} is not deleted and cannot be restored")
            }
            Self::NotDeleted { resource, id } => {
                write!(f, "{resource} {id} must be soft-deleted before it can be purged")
            }
            Self::Database { .. } => {
                write!(f, "database operation failed")
            }
        }
    }
}

impl std::error::Error for SoftDeleteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database { internal } => Some(internal),
            _ => None,
        }
    }
}

impl From<DbErr> for SoftDeleteError {
    fn from(err: DbErr) -> Self {
        tracing::error!(error = %err, "database error during soft-delete transition");
        Self::Database { internal: err }
    }
}
