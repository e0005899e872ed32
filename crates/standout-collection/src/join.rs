//! Nested-loop joins.

use log::trace;

use crate::collection::Collection;
use crate::error::Result;
use crate::value::Value;

/// The inner-side key of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinKey {
    /// Match `outer[outer_key]` against `inner[key]`.
    Single(String),
    /// Match every listed field by the same name on both sides.
    Composite(Vec<String>),
}

impl JoinKey {
    /// Tests whether an outer/inner pair matches under loose equality.
    ///
    /// `outer_key` is only consulted for [`JoinKey::Single`].
    pub fn matches(&self, outer: &Value, outer_key: &str, inner: &Value) -> Result<bool> {
        match self {
            JoinKey::Single(inner_key) => {
                Ok(outer.field(outer_key)?.loose_eq(inner.field(inner_key)?))
            }
            JoinKey::Composite(keys) => {
                for key in keys {
                    if !outer.field(key)?.loose_eq(inner.field(key)?) {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

impl From<&str> for JoinKey {
    fn from(key: &str) -> Self {
        JoinKey::Single(key.to_string())
    }
}

impl From<String> for JoinKey {
    fn from(key: String) -> Self {
        JoinKey::Single(key)
    }
}

impl From<&[&str]> for JoinKey {
    fn from(keys: &[&str]) -> Self {
        JoinKey::Composite(keys.iter().map(|key| key.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for JoinKey {
    fn from(keys: [&str; N]) -> Self {
        JoinKey::from(&keys[..])
    }
}

impl From<Vec<String>> for JoinKey {
    fn from(keys: Vec<String>) -> Self {
        JoinKey::Composite(keys)
    }
}

impl Collection {
    /// Joins every item with every matching item of `inner`.
    ///
    /// Each receiver item is compared with each inner item (O(n·m), no
    /// index). For every match, `result(outer, inner)` produces one output
    /// item; output follows receiver order, then inner order.
    ///
    /// ```
    /// use standout_collection::{record, Collection, Value};
    ///
    /// let people = Collection::from(vec![record! { name: "John", city_id: 1 }]);
    /// let cities = vec![Value::from(record! { id: "1", city: "New York" })];
    ///
    /// let joined = people
    ///     .join(&cities, "city_id", "id", |person, city| {
    ///         record! {
    ///             name: (person.field("name").unwrap().clone()),
    ///             city: (city.field("city").unwrap().clone()),
    ///         }
    ///     })
    ///     .unwrap();
    /// assert_eq!(joined.count(), 1);
    /// ```
    pub fn join<I, K, F, V>(
        &self,
        inner: I,
        outer_key: &str,
        inner_key: K,
        mut result: F,
    ) -> Result<Collection>
    where
        I: AsRef<[Value]>,
        K: Into<JoinKey>,
        F: FnMut(&Value, &Value) -> V,
        V: Into<Value>,
    {
        let inner = inner.as_ref();
        let inner_key = inner_key.into();
        let mut joined = Vec::new();
        for outer in self {
            for candidate in inner {
                if inner_key.matches(outer, outer_key, candidate)? {
                    joined.push(result(outer, candidate).into());
                }
            }
        }
        trace!(
            "join: {} x {} items produced {} rows",
            self.count(),
            inner.len(),
            joined.len()
        );
        Ok(Collection::new(joined))
    }
}
