/// Error types for the view engine.
///
/// The sort, filter and page stages never fail. Errors only surface at the
/// edges: rejected page requests, bad configuration and record loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    /// A page request outside `[1, total_pages]`. The current page is kept.
    #[error("page {requested} out of range [1, {total_pages}]")]
    PageOutOfRange { requested: usize, total_pages: usize },

    /// Items per page must be at least one.
    #[error("items per page must be positive, got {0}")]
    InvalidPageSize(usize),

    /// Unknown collation name.
    #[error("unknown collation '{0}'. Use 'case_insensitive' or 'case_sensitive'")]
    UnknownCollation(String),

    /// A configuration value could not be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidConfig { name: &'static str, value: String },

    /// A record in the source data was not a JSON object.
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },

    /// The source data was not a JSON array of records.
    #[error("expected a JSON array of records")]
    NotAnArray,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for view engine operations.
pub type ViewResult<T> = Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_message() {
        let err = ViewError::PageOutOfRange {
            requested: 4,
            total_pages: 3,
        };
        assert_eq!(err.to_string(), "page 4 out of range [1, 3]");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: ViewError = parse.unwrap_err().into();
        assert!(matches!(err, ViewError::Json(_)));
        assert!(err.to_string().starts_with("json error:"));
    }
}
