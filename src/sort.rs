/// Sort Stage
///
/// Produces an ordering of the Source Buffer by a single field. The output is
/// a list of buffer indices (`order[view_pos] = buffer_index`); the buffer
/// itself is never touched.
///
/// # Ordering rules
///
/// - Numbers compare numerically, booleans `false < true`.
/// - Strings compare case-insensitively under the default
///   [`Collation::CaseInsensitive`], byte-wise under
///   [`Collation::CaseSensitive`].
/// - Different value kinds order as bool < number < string.
/// - Missing fields and `Null` values sort after every present value in both
///   directions, and compare equal to each other.
/// - Ties keep their input order. Descending order reverses the comparison
///   of present values only, so tied records keep input order there too.

use crate::record::Record;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow shown next to the active column
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => " ↑",
            SortDirection::Descending => " ↓",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The active sort: one field and a direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: impl Into<String>) -> Self {
        SortConfig {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        SortConfig {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        SortConfig {
            key: key.into(),
            direction,
        }
    }
}

/// How strings compare while sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collation {
    /// `"amy" < "Bob" < "Cara"` (default)
    #[default]
    CaseInsensitive,
    /// `"Bob" < "Cara" < "amy"`
    CaseSensitive,
}

impl FromStr for Collation {
    type Err = crate::error::ViewError;

    /// Accepts `case_insensitive` / `case_sensitive` (also without the
    /// underscore, any letter case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "case_insensitive" | "caseinsensitive" | "insensitive" => Ok(Collation::CaseInsensitive),
            "case_sensitive" | "casesensitive" | "sensitive" => Ok(Collation::CaseSensitive),
            _ => Err(crate::error::ViewError::UnknownCollation(s.to_string())),
        }
    }
}

impl fmt::Display for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collation::CaseInsensitive => f.write_str("case_insensitive"),
            Collation::CaseSensitive => f.write_str("case_sensitive"),
        }
    }
}

/// Sort key extracted once per record so the comparator does no lookups
/// or case folding.
enum KeyValue<'a> {
    Present(FieldValue),
    Borrowed(&'a FieldValue),
    Missing,
}

impl<'a> KeyValue<'a> {
    fn extract(record: &'a Record, key: &str, collation: Collation) -> Self {
        match record.get(key) {
            None | Some(FieldValue::Null) => KeyValue::Missing,
            Some(FieldValue::String(s)) if collation == Collation::CaseInsensitive => {
                KeyValue::Present(FieldValue::String(s.to_lowercase()))
            }
            Some(value) => KeyValue::Borrowed(value),
        }
    }

    fn value(&self) -> Option<&FieldValue> {
        match self {
            KeyValue::Present(v) => Some(v),
            KeyValue::Borrowed(v) => Some(v),
            KeyValue::Missing => None,
        }
    }
}

/// Compare two sort keys. Missing values go last regardless of direction.
fn compare_keys(a: &KeyValue<'_>, b: &KeyValue<'_>, direction: SortDirection) -> Ordering {
    match (a.value(), b.value()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => direction.apply(a.compare(b)),
    }
}

/// Compare two records on the config's field
pub fn compare_records(a: &Record, b: &Record, config: &SortConfig, collation: Collation) -> Ordering {
    let key_a = KeyValue::extract(a, &config.key, collation);
    let key_b = KeyValue::extract(b, &config.key, collation);
    compare_keys(&key_a, &key_b, config.direction)
}

/// Order the records by `config`, returning buffer indices.
///
/// `None` keeps source order.
pub fn sort(records: &[Record], config: Option<&SortConfig>, collation: Collation) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();

    let Some(config) = config else {
        return order;
    };

    let keys: Vec<KeyValue<'_>> = records
        .iter()
        .map(|record| KeyValue::extract(record, &config.key, collation))
        .collect();

    // slice::sort_by is stable, so equal keys keep their input order
    order.sort_by(|&a, &b| compare_keys(&keys[a], &keys[b], config.direction));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[Record], order: &[usize]) -> Vec<String> {
        order
            .iter()
            .map(|&i| records[i].get("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    fn people() -> Vec<Record> {
        vec![
            Record::new().with("name", "Bob").with("age", 30),
            Record::new().with("name", "amy").with("age", 25),
            Record::new().with("name", "Cara").with("age", 35),
        ]
    }

    #[test]
    fn test_sort_case_insensitive_default() {
        let records = people();
        let order = sort(&records, Some(&SortConfig::ascending("name")), Collation::default());
        assert_eq!(names(&records, &order), vec!["amy", "Bob", "Cara"]);
    }

    #[test]
    fn test_sort_case_sensitive() {
        let records = people();
        let order = sort(&records, Some(&SortConfig::ascending("name")), Collation::CaseSensitive);
        assert_eq!(names(&records, &order), vec!["Bob", "Cara", "amy"]);
    }

    #[test]
    fn test_sort_descending_numeric() {
        let records = people();
        let order = sort(&records, Some(&SortConfig::descending("age")), Collation::default());
        assert_eq!(names(&records, &order), vec!["Cara", "Bob", "amy"]);
    }

    #[test]
    fn test_sort_none_keeps_source_order() {
        let records = people();
        assert_eq!(sort(&records, None, Collation::default()), vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let records = vec![
            Record::new().with("name", "first").with("team", "red"),
            Record::new().with("name", "second").with("team", "blue"),
            Record::new().with("name", "third").with("team", "red"),
            Record::new().with("name", "fourth").with("team", "blue"),
        ];

        let asc = sort(&records, Some(&SortConfig::ascending("team")), Collation::default());
        assert_eq!(names(&records, &asc), vec!["second", "fourth", "first", "third"]);

        let desc = sort(&records, Some(&SortConfig::descending("team")), Collation::default());
        assert_eq!(names(&records, &desc), vec!["first", "third", "second", "fourth"]);
    }

    #[test]
    fn test_case_variants_tie_and_keep_input_order() {
        let records = vec![
            Record::new().with("name", "AMY"),
            Record::new().with("name", "amy"),
            Record::new().with("name", "Amy"),
        ];
        let order = sort(&records, Some(&SortConfig::ascending("name")), Collation::default());
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_missing_and_null_sort_last_in_both_directions() {
        let records = vec![
            Record::new().with("name", "no-age"),
            Record::new().with("name", "young").with("age", 20),
            Record::new().with("name", "null-age").with("age", FieldValue::Null),
            Record::new().with("name", "old").with("age", 60),
        ];

        let asc = sort(&records, Some(&SortConfig::ascending("age")), Collation::default());
        assert_eq!(names(&records, &asc), vec!["young", "old", "no-age", "null-age"]);

        let desc = sort(&records, Some(&SortConfig::descending("age")), Collation::default());
        assert_eq!(names(&records, &desc), vec!["old", "young", "no-age", "null-age"]);
    }

    #[test]
    fn test_reverse_without_ties() {
        let records = people();
        let asc = sort(&records, Some(&SortConfig::ascending("age")), Collation::default());
        let mut desc = sort(&records, Some(&SortConfig::descending("age")), Collation::default());
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let records = people();
        let before = records.clone();
        let _ = sort(&records, Some(&SortConfig::ascending("name")), Collation::default());
        assert_eq!(records, before);
    }

    #[test]
    fn test_compare_records() {
        let a = Record::new().with("n", 1);
        let b = Record::new().with("n", 2);
        let config = SortConfig::descending("n");
        assert_eq!(compare_records(&a, &b, &config, Collation::default()), Ordering::Greater);
    }

    #[test]
    fn test_collation_from_str() {
        assert_eq!("case_sensitive".parse::<Collation>().unwrap(), Collation::CaseSensitive);
        assert_eq!("Case_Insensitive".parse::<Collation>().unwrap(), Collation::CaseInsensitive);
        assert!("natural".parse::<Collation>().is_err());
        assert_eq!(Collation::CaseSensitive.to_string(), "case_sensitive");
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.arrow(), " ↑");
        assert_eq!(SortDirection::Descending.arrow(), " ↓");
    }
}
