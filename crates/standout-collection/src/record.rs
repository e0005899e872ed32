//! Records: ordered mappings from field name to [`Value`].

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, Result};
use crate::value::Value;

/// Separator for reaching into nested records, as in `"address.city"`.
pub const FIELD_SEPARATOR: char = '.';

/// A structured record: field names mapped to values.
///
/// Fields keep their insertion order, which is the order used when the
/// record is serialized or projected. Equality ignores that order: two
/// records are equal when they hold the same fields with equal values.
///
/// # Example
///
/// ```
/// use standout_collection::{record, Value};
///
/// let person = record! {
///     name: "John Doe",
///     address: { city: "New York" },
/// };
///
/// assert_eq!(person.field("name").unwrap(), &Value::from("John Doe"));
/// assert_eq!(person.field("address.city").unwrap(), &Value::from("New York"));
/// assert!(person.field("age").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut entries: Vec<(&String, &Value)> = self.fields.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.len().hash(state);
        for (key, value) in entries {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Sets a field, returning the previous value if there was one.
    ///
    /// Replacing a field keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Returns the field stored under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Looks a field up by name, falling back to a dotted path.
    ///
    /// A key stored verbatim wins; otherwise `"a.b.c"` walks into nested
    /// records one segment at a time.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }
        let (head, rest) = path.split_once(FIELD_SEPARATOR)?;
        match self.fields.get(head)? {
            Value::Object(inner) => inner.get_path(rest),
            _ => None,
        }
    }

    /// Looks a field up like [`Record::get_path`], failing with
    /// [`CollectionError::MissingField`] when it is absent.
    pub fn field(&self, name: &str) -> Result<&Value> {
        self.get_path(name)
            .ok_or_else(|| CollectionError::missing_field(name))
    }

    /// Removes a top-level field, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Removes the field [`Record::get_path`] would find for `path`.
    ///
    /// For a dotted path the leaf is removed from its nested record; the
    /// enclosing records stay in place.
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        if self.fields.contains_key(path) {
            return self.fields.shift_remove(path);
        }
        let (head, rest) = path.split_once(FIELD_SEPARATOR)?;
        match self.fields.get_mut(head)? {
            Value::Object(inner) => inner.remove_path(rest),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Strips the quotes `stringify!` leaves around string-literal keys.
#[doc(hidden)]
pub fn normalize_key(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Builds a [`Record`] from `key: value` pairs.
///
/// Keys are identifiers or string literals. Values are expressions, nested
/// `{ ... }` records, `[ ... ]` arrays, or `null`. Negative numbers and
/// multi-token expressions need parentheses.
///
/// ```
/// use standout_collection::{record, Value};
///
/// let item = record! {
///     "first name": "Alice",
///     age: 18,
///     balance: (-2.5),
///     tags: ["a", "b"],
///     spouse: null,
/// };
/// assert_eq!(item.len(), 5);
/// assert_eq!(item.get("spouse"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            let mut record = $crate::Record::new();
            $(
                record.insert(
                    $crate::normalize_key(stringify!($key)),
                    $crate::record_value!($value),
                );
            )*
            record
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! record_value {
    (null) => {
        $crate::Value::Null
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::Value::Object($crate::record!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::record_value!($value)),*])
    };

    ($value:expr) => {
        $crate::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_position_on_replace() {
        let mut record = crate::record! { a: 1, b: 2 };
        assert_eq!(record.insert("a", 10), Some(Value::from(1)));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut record = crate::record! { a: 1, b: 2, c: 3 };
        assert_eq!(record.remove("b"), Some(Value::from(2)));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(record.remove("b"), None);
    }

    #[test]
    fn remove_path_reaches_nested_leaf() {
        let mut record = crate::record! {
            address: { city: "New York", zip: "10001" },
            "a.b": "literal",
            name: "John",
        };
        assert_eq!(record.remove_path("address.city"), Some(Value::from("New York")));
        assert_eq!(record.get_path("address.zip"), Some(&Value::from("10001")));
        assert_eq!(record.get_path("address.city"), None);
        assert_eq!(record.remove_path("a.b"), Some(Value::from("literal")));
        assert_eq!(record.remove_path("name.first"), None);
        assert_eq!(record.remove_path("missing.path"), None);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["address", "name"]);
    }

    #[test]
    fn dotted_paths() {
        let record = crate::record! {
            address: { city: "New York", geo: { lat: 40 } },
            "a.b": "literal",
        };
        assert_eq!(record.get_path("address.city"), Some(&Value::from("New York")));
        assert_eq!(record.get_path("address.geo.lat"), Some(&Value::from(40)));
        assert_eq!(record.get_path("a.b"), Some(&Value::from("literal")));
        assert_eq!(record.get_path("address.zip"), None);
        assert_eq!(record.get_path("address.city.name"), None);
        assert_eq!(record.get("address.city"), None);
    }

    #[test]
    fn missing_field_names_the_field() {
        let record = crate::record! { name: "John" };
        let err = record.field("age").unwrap_err();
        assert_eq!(err.to_string(), "field 'age' not found");
    }

    #[test]
    fn macro_builds_nested_values() {
        let record = crate::record! {
            name: "Bob",
            scores: [1, 2, (-3)],
            spouse: null,
            address: {},
        };
        assert_eq!(
            record.get("scores"),
            Some(&Value::Array(vec![
                Value::from(1),
                Value::from(2),
                Value::from(-3)
            ]))
        );
        assert_eq!(record.get("spouse"), Some(&Value::Null));
        assert_eq!(record.get("address"), Some(&Value::Object(Record::new())));
    }

    #[test]
    fn equality_ignores_field_order() {
        let a = crate::record! { x: 1, y: 2 };
        let b = crate::record! { y: 2, x: 1 };
        assert_eq!(a, b);
    }
}
