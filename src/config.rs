/// Engine configuration
///
/// Settings fixed when a [`ViewEngine`](crate::ViewEngine) is created: the
/// page size, how strings collate while sorting, and an optional initial
/// sort. Defaults match the route planner's data table: five rows per page,
/// case-insensitive sort, source order until a column is picked.
///
/// # Examples
///
/// ```
/// use datatable::{Collation, EngineConfig, SortConfig};
///
/// let config = EngineConfig::default()
///     .with_items_per_page(10)
///     .unwrap()
///     .with_collation(Collation::CaseSensitive)
///     .with_initial_sort(SortConfig::ascending("name"));
///
/// assert_eq!(config.items_per_page.get(), 10);
/// ```

use crate::error::{ViewError, ViewResult};
use crate::page::DEFAULT_ITEMS_PER_PAGE;
use crate::sort::{Collation, SortConfig};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Environment variable holding the page size
pub const ITEMS_PER_PAGE_ENV: &str = "DATATABLE_ITEMS_PER_PAGE";
/// Environment variable holding the collation name
pub const COLLATION_ENV: &str = "DATATABLE_COLLATION";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub items_per_page: NonZeroUsize,
    #[serde(default)]
    pub collation: Collation,
    #[serde(default)]
    pub initial_sort: Option<SortConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            items_per_page: NonZeroUsize::new(DEFAULT_ITEMS_PER_PAGE).unwrap_or(NonZeroUsize::MIN),
            collation: Collation::default(),
            initial_sort: None,
        }
    }
}

impl EngineConfig {
    /// Set the page size. Zero is rejected.
    pub fn with_items_per_page(mut self, items_per_page: usize) -> ViewResult<Self> {
        self.items_per_page =
            NonZeroUsize::new(items_per_page).ok_or(ViewError::InvalidPageSize(items_per_page))?;
        Ok(self)
    }

    pub fn with_collation(mut self, collation: Collation) -> Self {
        self.collation = collation;
        self
    }

    pub fn with_initial_sort(mut self, sort: SortConfig) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    /// Read overrides from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> ViewResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> ViewResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();

        if let Some(raw) = lookup(ITEMS_PER_PAGE_ENV) {
            let items_per_page: usize = raw.trim().parse().map_err(|_| ViewError::InvalidConfig {
                name: ITEMS_PER_PAGE_ENV,
                value: raw.clone(),
            })?;
            config = config.with_items_per_page(items_per_page)?;
        }

        if let Some(raw) = lookup(COLLATION_ENV) {
            config.collation = raw.trim().parse()?;
        }

        log::debug!(
            "engine config: {} per page, {} collation",
            config.items_per_page,
            config.collation
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.items_per_page.get(), 5);
        assert_eq!(config.collation, Collation::CaseInsensitive);
        assert!(config.initial_sort.is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = EngineConfig::default().with_items_per_page(0).unwrap_err();
        assert!(matches!(err, ViewError::InvalidPageSize(0)));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ITEMS_PER_PAGE_ENV, " 25 "),
            (COLLATION_ENV, "case_sensitive"),
        ]))
        .unwrap();
        assert_eq!(config.items_per_page.get(), 25);
        assert_eq!(config.collation, Collation::CaseSensitive);
    }

    #[test]
    fn test_from_lookup_unset_keeps_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_from_lookup_bad_values() {
        let err = EngineConfig::from_lookup(lookup_from(&[(ITEMS_PER_PAGE_ENV, "ten")])).unwrap_err();
        assert!(matches!(err, ViewError::InvalidConfig { .. }));

        let err = EngineConfig::from_lookup(lookup_from(&[(ITEMS_PER_PAGE_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ViewError::InvalidPageSize(0)));

        let err = EngineConfig::from_lookup(lookup_from(&[(COLLATION_ENV, "klingon")])).unwrap_err();
        assert!(matches!(err, ViewError::UnknownCollation(_)));
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"items_per_page": 3}"#).unwrap();
        assert_eq!(config.items_per_page.get(), 3);
        assert_eq!(config.collation, Collation::CaseInsensitive);
    }
}
