//! Query compilation: text search, field filters, sorting and pagination.
//!
//! Each submodule is a small pure compiler from caller-supplied configuration
//! to `sea_query` expressions. None of them touch the database; the composed
//! output is executed by the caller, once with offset/limit for the page of
//! items and once without for the total count.
//!
//! All compilers share the same fail-open contract: input that cannot be
//! compiled (unknown field, missing value, blank query) produces no predicate
//! rather than an error.

pub mod conditions;
pub mod pagination;
pub mod search;
pub mod sort;

pub use conditions::{build_condition, compile_field_filter};
pub use pagination::{PaginationMetadata, paginate};
pub use search::compile_text_search;
pub use sort::{SortSpec, compile_sort};
