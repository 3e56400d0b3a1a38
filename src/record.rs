/// Records and the Source Buffer
///
/// A Record maps field names to scalar values. The engine is schema-agnostic:
/// records in one buffer usually share a shape, but nothing checks that.
///
/// Records are usually loaded from JSON. Nested objects are flattened into
/// dotted field names (`{"address": {"city": "X"}}` becomes `address.city`),
/// so nested fields can be sorted on and searched like top-level ones.
/// Arrays are kept as their compact JSON text.
///
/// # Examples
///
/// ```
/// use datatable::{Record, SourceBuffer};
///
/// let buffer = SourceBuffer::from_json_str(
///     r#"[{"name": "Leanne", "address": {"city": "Gwenborough"}}]"#,
/// ).unwrap();
///
/// let record = &buffer.records()[0];
/// assert_eq!(record.get("name").unwrap().as_str(), Some("Leanne"));
/// assert_eq!(record.get("address.city").unwrap().as_str(), Some("Gwenborough"));
///
/// let built = Record::new().with("name", "Ervin").with("id", 2);
/// assert_eq!(built.len(), 2);
/// ```

use crate::error::{ViewError, ViewResult};
use crate::value::FieldValue;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// One row of source data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Insert a field, returning the previous value if there was one
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a record from a JSON object, flattening nested objects
    pub fn from_json_object(object: &Map<String, JsonValue>) -> Self {
        let mut record = Record::new();
        flatten_into(&mut record.fields, "", object);
        record
    }

    /// Build a record from a JSON value. Returns None unless it is an object.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_object().map(Record::from_json_object)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = Map::<String, JsonValue>::deserialize(deserializer)?;
        Ok(Record::from_json_object(&object))
    }
}

fn flatten_into(fields: &mut BTreeMap<String, FieldValue>, prefix: &str, object: &Map<String, JsonValue>) {
    for (key, value) in object {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            JsonValue::Object(nested) => flatten_into(fields, &name, nested),
            other => {
                fields.insert(name, json_to_field_value(other));
            }
        }
    }
}

/// Convert a non-object JSON value to a FieldValue
fn json_to_field_value(value: &JsonValue) -> FieldValue {
    match value {
        JsonValue::Null => FieldValue::Null,
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Int(i)
            } else {
                // u64 beyond i64::MAX and all non-integers
                FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => FieldValue::String(value.to_string()),
    }
}

/// The complete, immutable record list for one load cycle.
///
/// `generation` increases every time the buffer is replaced, so derived
/// stages can tell whether their cached output is still valid.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    records: Vec<Record>,
    generation: u64,
}

impl SourceBuffer {
    pub fn new(records: Vec<Record>) -> Self {
        SourceBuffer {
            records,
            generation: 0,
        }
    }

    /// Parse a JSON array of objects
    pub fn from_json_str(json: &str) -> ViewResult<Self> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &JsonValue) -> ViewResult<Self> {
        let items = value.as_array().ok_or(ViewError::NotAnArray)?;
        let records = items
            .iter()
            .enumerate()
            .map(|(index, item)| Record::from_json(item).ok_or(ViewError::NotAnObject { index }))
            .collect::<ViewResult<Vec<_>>>()?;
        Ok(SourceBuffer::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in the records of a new load cycle
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
        self.generation += 1;
    }
}
