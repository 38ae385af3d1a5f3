//! Sort key validation and normalization.
//!
//! A requested sort is applied only when the field is both valid and sortable
//! in the registry; anything else is silently ignored and the query carries no
//! ORDER BY at all. Only one sort key is supported.

use sea_orm::sea_query::Order;

use crate::models::SortOrder;
use crate::registry::FieldRegistry;

/// A validated sort key and direction, ready for the query composer.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub direction: Order,
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Self::Asc,
            SortOrder::Desc => Self::Desc,
        }
    }
}

/// Validates `sort_by` against the registry. Returns `None` (no ordering)
/// when the field is absent, unknown, or not sortable.
#[must_use]
pub fn compile_sort(
    sort_by: Option<&str>,
    order: SortOrder,
    registry: &FieldRegistry,
) -> Option<SortSpec> {
    let field = sort_by?.trim();
    if field.is_empty() {
        return None;
    }
    if !registry.is_sortable(field) {
        tracing::debug!(field, entity = registry.entity(), "ignoring unsortable sort key");
        return None;
    }
    Some(SortSpec {
        field: field.to_owned(),
        direction: order.into(),
    })
}
