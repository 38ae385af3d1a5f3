use serde::{Deserialize, Deserializer, Serialize};

/// How a free-text search query is matched against a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSearchOperator {
    #[default]
    Contains,
    StartsWith,
    EndsWith,
    Equals,
    NotEquals,
}

/// Comparison operator for a single [`FieldFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    #[default]
    Equals,
    NotEquals,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

/// Sort direction. Anything that is not `desc` (case-insensitive) is treated
/// as ascending, including unrecognized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Free-text search over one or more fields, combined with OR.
///
/// `fields` is advisory: names that are not in the entity's [`FieldRegistry`]
/// are silently dropped rather than rejected, so a client referencing a field
/// removed in a later schema version degrades gracefully.
///
/// [`FieldRegistry`]: crate::FieldRegistry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextSearchFilter {
    /// The search text. Trimmed before use; blank means "no filter".
    #[serde(default)]
    pub query: String,
    /// Candidate fields to search across.
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub operator: TextSearchOperator,
    #[serde(default)]
    pub case_sensitive: bool,
    /// Opportunistically use the store's fulltext capability. Falls back to
    /// LIKE matching when the backend cannot service it.
    #[serde(default)]
    pub use_full_text_search: bool,
}

/// One field/operator/value constraint. All filters in a
/// [`SearchFilterConfig`] combine with AND.
///
/// `in`/`not_in` read `values`; the scalar operators read `value`;
/// `is_null`/`is_not_null` need neither. A filter whose required value is
/// absent compiles to no predicate at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    #[serde(default)]
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub values: Option<Vec<serde_json::Value>>,
}

/// Complete declarative description of one list query. Built per request,
/// consumed once by [`query::compile`], never persisted.
///
/// [`query::compile`]: crate::query::compile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilterConfig {
    #[serde(default)]
    pub text_search: Option<TextSearchFilter>,
    #[serde(default)]
    pub filters: Vec<FieldFilter>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

const DEFAULT_PAGE_SIZE: u64 = 25;
const MAX_PAGE_SIZE: u64 = 100;

/// 1-based page number and page size, with the size clamped to `[1, 100]`.
/// Out-of-range input is clamped rather than rejected, including when
/// deserialized from query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPaginationParams")]
pub struct PaginationParams {
    page: u64,
    size: u64,
}

#[derive(Deserialize)]
struct RawPaginationParams {
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_size")]
    size: u64,
}

const fn default_page() -> u64 {
    1
}

const fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl From<RawPaginationParams> for PaginationParams {
    fn from(raw: RawPaginationParams) -> Self {
        Self::new(raw.page, raw.size)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(default_page(), default_size())
    }
}

impl PaginationParams {
    #[must_use]
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Number of rows to skip: `(page - 1) * size`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1) * self.size
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_params_clamp_size() {
        assert_eq!(PaginationParams::new(1, 0).size(), 1);
        assert_eq!(PaginationParams::new(1, 500).size(), 100);
        assert_eq!(PaginationParams::new(1, 50).size(), 50);
    }

    #[test]
    fn pagination_params_clamp_page() {
        assert_eq!(PaginationParams::new(0, 10).page(), 1);
        assert_eq!(PaginationParams::new(0, 10).offset(), 0);
    }

    #[test]
    fn pagination_params_offset_limit() {
        let params = PaginationParams::new(2, 10);
        assert_eq!(params.offset(), 10);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn pagination_params_deserialize_clamps() {
        let params: PaginationParams = serde_json::from_str(r#"{"page": 0, "size": 999}"#).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.size(), 100);
    }

    #[test]
    fn pagination_params_deserialize_defaults() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn sort_order_parse_is_lenient() {
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse(" Desc "), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("descending"), SortOrder::Asc);
        assert_eq!(SortOrder::parse(""), SortOrder::Asc);
    }

    #[test]
    fn operators_deserialize_snake_case() {
        let op: FilterOperator = serde_json::from_str(r#""is_not_null""#).unwrap();
        assert_eq!(op, FilterOperator::IsNotNull);
        let op: TextSearchOperator = serde_json::from_str(r#""starts_with""#).unwrap();
        assert_eq!(op, TextSearchOperator::StartsWith);
    }

    #[test]
    fn config_deserializes_from_request_shape() {
        let config: SearchFilterConfig = serde_json::from_str(
            r#"{
                "text_search": {"query": "trish", "fields": ["username", "email"]},
                "filters": [{"field": "is_verified", "operator": "equals", "value": true}],
                "sort_by": "created_at",
                "sort_order": "DESC"
            }"#,
        )
        .unwrap();
        let text = config.text_search.unwrap();
        assert_eq!(text.operator, TextSearchOperator::Contains);
        assert!(!text.case_sensitive);
        assert_eq!(config.filters.len(), 1);
        assert_eq!(config.sort_order, SortOrder::Desc);
    }
}
