//! Free-text search compilation.
//!
//! Turns a [`TextSearchFilter`] into a single OR-combined condition across the
//! requested fields, or no condition at all when there is nothing to match:
//! a blank query and an all-invalid field list both mean "no filter", never
//! "match nothing".
//!
//! When `use_full_text_search` is set the compiler probes the backend for a
//! native fulltext capability (PostgreSQL `tsvector`). Backends without one
//! fall back silently to the LIKE path; the fallback is never visible to the
//! caller.

use sea_orm::{
    Condition, DatabaseBackend,
    sea_query::{Alias, Expr, ExprTrait, Func, LikeExpr, SimpleExpr},
};

use crate::models::{TextSearchFilter, TextSearchOperator};
use crate::registry::FieldRegistry;

const MAX_SEARCH_QUERY_LENGTH: usize = 10_000;

/// Escape LIKE wildcards so caller input can never act as a pattern.
/// Escapes `\` first, then `%` and `_`.
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Truncate to at most `max` bytes without splitting a UTF-8 sequence.
fn truncate_on_char_boundary(input: &str, max: usize) -> &str {
    if input.len() <= max {
        return input;
    }
    let mut end = max;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    &input[..end]
}

/// Compiles a text search into one OR-combined condition, or `None` when the
/// query is blank or no requested field validates against the registry.
#[must_use]
pub fn compile_text_search(
    filter: &TextSearchFilter,
    registry: &FieldRegistry,
    backend: DatabaseBackend,
) -> Option<Condition> {
    let query = truncate_on_char_boundary(filter.query.trim(), MAX_SEARCH_QUERY_LENGTH);
    if query.is_empty() {
        return None;
    }

    let valid_fields: Vec<&str> = filter
        .fields
        .iter()
        .map(String::as_str)
        .filter(|field| {
            let valid = registry.is_valid(field);
            if !valid {
                tracing::debug!(field, entity = registry.entity(), "dropping unknown search field");
            }
            valid
        })
        .collect();
    if valid_fields.is_empty() {
        return None;
    }

    // Normalized once here; the per-field conditions fold the column side.
    let needle = if filter.case_sensitive {
        query.to_owned()
    } else {
        query.to_lowercase()
    };

    if filter.use_full_text_search {
        if let Some(expr) = build_fulltext_condition(&needle, &valid_fields, backend) {
            return Some(Condition::all().add(expr));
        }
        // Backend cannot service fulltext; fall through to the LIKE path.
    }

    let mut any = Condition::any();
    for field in &valid_fields {
        any = any.add(field_condition(field, &needle, filter.operator, filter.case_sensitive));
    }
    Some(any)
}

/// Native fulltext predicate, or `None` when the backend has no such
/// capability. Only PostgreSQL qualifies; the caller falls back to LIKE.
///
/// Field names come from the registry (compile-time column identifiers), not
/// from caller input, so interpolating them here is safe. The query text is
/// quote-escaped and reaches the parser as a plain string literal.
fn build_fulltext_condition(
    query: &str,
    fields: &[&str],
    backend: DatabaseBackend,
) -> Option<SimpleExpr> {
    if backend != DatabaseBackend::Postgres {
        return None;
    }

    let document = fields
        .iter()
        .map(|field| format!("COALESCE({field}::text, '')"))
        .collect::<Vec<_>>()
        .join(" || ' ' || ");
    let escaped_query = query.replace('\'', "''");

    Some(SimpleExpr::Custom(format!(
        "to_tsvector('english', {document}) @@ plainto_tsquery('english', '{escaped_query}')"
    )))
}

/// One per-field condition for the OR group. The needle is already
/// case-normalized by the caller; `LOWER()` folds the column side to match.
fn field_condition(
    field: &str,
    needle: &str,
    operator: TextSearchOperator,
    case_sensitive: bool,
) -> SimpleExpr {
    let column = Expr::col(Alias::new(field));
    match operator {
        TextSearchOperator::Contains => {
            like_condition(column, format!("%{}%", escape_like_wildcards(needle)), case_sensitive)
        }
        TextSearchOperator::StartsWith => {
            like_condition(column, format!("{}%", escape_like_wildcards(needle)), case_sensitive)
        }
        TextSearchOperator::EndsWith => {
            like_condition(column, format!("%{}", escape_like_wildcards(needle)), case_sensitive)
        }
        TextSearchOperator::Equals => {
            if case_sensitive {
                column.eq(needle.to_owned())
            } else {
                Func::lower(column).eq(needle.to_owned())
            }
        }
        TextSearchOperator::NotEquals => {
            if case_sensitive {
                column.ne(needle.to_owned())
            } else {
                Func::lower(column).ne(needle.to_owned())
            }
        }
    }
}

fn like_condition(column: Expr, pattern: String, case_sensitive: bool) -> SimpleExpr {
    // ESCAPE '\' makes the wildcard escaping effective on every backend.
    let pattern = LikeExpr::new(pattern).escape('\\');
    if case_sensitive {
        column.like(pattern)
    } else {
        Func::lower(column).like(pattern)
    }
}
