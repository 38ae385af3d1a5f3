//! Field filter compilation.
//!
//! Each [`FieldFilter`] compiles to at most one `sea_query` expression; a
//! whole [`SearchFilterConfig`] compiles to one AND-combined [`Condition`]
//! together with its optional text search. A filter that cannot be compiled
//! (unknown field, missing value, empty `in` list) is dropped, so a malformed
//! query parameter constrains nothing instead of emptying the result set.

use sea_orm::{
    Condition, DatabaseBackend, Value,
    sea_query::{Alias, Expr, SimpleExpr},
};
use uuid::Uuid;

use super::search::compile_text_search;
use crate::models::{FieldFilter, FilterOperator, SearchFilterConfig};
use crate::registry::FieldRegistry;

const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// Convert a JSON scalar into a database value. Strings are tried as UUIDs
/// first so id filters compare against the native column type. Non-scalar
/// JSON (objects, nested arrays) does not convert.
fn json_to_value(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() > MAX_FIELD_VALUE_LENGTH {
                return None;
            }
            if let Ok(uuid) = Uuid::parse_str(trimmed) {
                Some(uuid.into())
            } else {
                Some(trimmed.to_owned().into())
            }
        }
        serde_json::Value::Number(number) => number
            .as_i64()
            .map(Value::from)
            .or_else(|| number.as_f64().map(Value::from)),
        serde_json::Value::Bool(flag) => Some((*flag).into()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}

/// The scalar operand for value-requiring operators.
fn scalar_operand(filter: &FieldFilter) -> Option<Value> {
    filter.value.as_ref().and_then(json_to_value)
}

/// The non-empty list operand for `in` / `not_in`.
fn list_operand(filter: &FieldFilter) -> Option<Vec<Value>> {
    let values: Vec<Value> = filter
        .values
        .as_ref()?
        .iter()
        .filter_map(json_to_value)
        .collect();
    if values.is_empty() { None } else { Some(values) }
}

/// Compiles one filter into an expression, or `None` when the filter cannot
/// constrain anything: unknown field, missing `value`, or an absent/empty
/// `values` list for the membership operators.
#[must_use]
pub fn compile_field_filter(
    filter: &FieldFilter,
    registry: &FieldRegistry,
) -> Option<SimpleExpr> {
    if !registry.is_valid(&filter.field) {
        tracing::debug!(
            field = %filter.field,
            entity = registry.entity(),
            "dropping filter on unknown field"
        );
        return None;
    }
    let column = Expr::col(Alias::new(filter.field.as_str()));

    match filter.operator {
        FilterOperator::Equals => Some(column.eq(scalar_operand(filter)?)),
        FilterOperator::NotEquals => Some(column.ne(scalar_operand(filter)?)),
        FilterOperator::Gt => Some(column.gt(scalar_operand(filter)?)),
        FilterOperator::Gte => Some(column.gte(scalar_operand(filter)?)),
        FilterOperator::Lt => Some(column.lt(scalar_operand(filter)?)),
        FilterOperator::Lte => Some(column.lte(scalar_operand(filter)?)),
        FilterOperator::In => Some(column.is_in(list_operand(filter)?)),
        FilterOperator::NotIn => Some(column.is_not_in(list_operand(filter)?)),
        FilterOperator::IsNull => Some(column.is_null()),
        FilterOperator::IsNotNull => Some(column.is_not_null()),
    }
}

/// Compiles a whole config into one condition: the text-search OR group (if
/// any) AND every field filter that compiled. An empty config yields an empty
/// `Condition::all()`, which constrains nothing.
#[must_use]
pub fn build_condition(
    config: &SearchFilterConfig,
    registry: &FieldRegistry,
    backend: DatabaseBackend,
) -> Condition {
    let mut condition = Condition::all();

    if let Some(text_search) = &config.text_search {
        if let Some(search_condition) = compile_text_search(text_search, registry, backend) {
            condition = condition.add(search_condition);
        }
    }

    for filter in &config.filters {
        if let Some(expr) = compile_field_filter(filter, registry) {
            condition = condition.add(expr);
        }
    }

    condition
}
