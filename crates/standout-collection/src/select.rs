//! Projection and mapping.

use crate::collection::Collection;
use crate::error::Result;
use crate::record::Record;
use crate::value::Value;

/// Separator between a source field and its alias in a projection key.
pub const ALIAS_SEPARATOR: &str = " as ";

/// Splits `"field as alias"` into `("field", "alias")`; a bare field maps
/// to itself.
fn parse_projection(key: &str) -> (&str, &str) {
    match key.split_once(ALIAS_SEPARATOR) {
        Some((source, rest)) => {
            let alias = rest.split(ALIAS_SEPARATOR).next().unwrap_or(rest);
            (source, alias)
        }
        None => (key, key),
    }
}

impl Collection {
    /// Projects every item onto the named fields.
    ///
    /// Each key is a field name (`"name"`) or an aliasing expression
    /// (`"name as n"`, case-sensitive). Output records hold the selected
    /// fields in key order. A field missing from any item is an error.
    ///
    /// ```
    /// use standout_collection::{record, Collection, Value};
    ///
    /// let people = Collection::from(vec![record! { name: "John", age: 30 }]);
    /// let names = people.select(&["name as n"]).unwrap();
    /// assert_eq!(names.to_list(), &[Value::from(record! { n: "John" })]);
    /// ```
    pub fn select(&self, keys: &[&str]) -> Result<Collection> {
        let projections: Vec<(&str, &str)> = keys.iter().map(|key| parse_projection(key)).collect();
        let mut selected = Vec::with_capacity(self.count());
        for item in self {
            let mut record = Record::new();
            for (source, alias) in &projections {
                record.insert(*alias, item.field(source)?.clone());
            }
            selected.push(Value::Object(record));
        }
        Ok(Collection::new(selected))
    }

    /// Applies `f` to every item, in order.
    pub fn map<F, V>(&self, f: F) -> Collection
    where
        F: FnMut(&Value) -> V,
        V: Into<Value>,
    {
        self.iter().map(f).map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;
    use serde_json::json;

    fn people() -> Collection {
        Collection::from(json!([
            {"name": "John", "age": 30, "sex": "male"},
            {"name": "Alice", "age": 18, "sex": "female"},
            {"name": "Bob", "age": 22, "sex": "male"},
        ]))
    }

    #[test]
    fn parse_projection_forms() {
        assert_eq!(parse_projection("name"), ("name", "name"));
        assert_eq!(parse_projection("name as n"), ("name", "n"));
        assert_eq!(parse_projection("a as b as c"), ("a", "b"));
        assert_eq!(parse_projection("name AS n"), ("name AS n", "name AS n"));
    }

    #[test]
    fn select_keeps_only_named_fields() {
        let selected = people().select(&["name"]).unwrap();
        assert_eq!(
            selected.to_array(),
            json!([{"name": "John"}, {"name": "Alice"}, {"name": "Bob"}])
        );
    }

    #[test]
    fn select_aliases() {
        let selected = people().select(&["name as n", "age"]).unwrap();
        let first = selected.first().unwrap().as_record().unwrap();
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["n", "age"]);
        assert_eq!(first.get("n"), Some(&Value::from("John")));
        assert!(first.get("name").is_none());
    }

    #[test]
    fn select_nested_path() {
        let collection = Collection::from(json!([{"address": {"city": "New York"}}]));
        let selected = collection.select(&["address.city as city"]).unwrap();
        assert_eq!(selected.to_array(), json!([{"city": "New York"}]));
    }

    #[test]
    fn select_missing_field_fails() {
        let err = people().select(&["name", "email"]).unwrap_err();
        assert!(matches!(err, CollectionError::MissingField { field } if field == "email"));
    }

    #[test]
    fn select_does_not_touch_receiver() {
        let collection = people();
        let _ = collection.select(&["name"]).unwrap();
        assert_eq!(collection.first().unwrap().as_record().unwrap().len(), 3);
    }

    #[test]
    fn map_same_length_and_order() {
        let names = people().map(|item| item.field("name").unwrap().clone());
        assert_eq!(names.to_array(), json!(["John", "Alice", "Bob"]));

        let ages = people().map(|item| item.field("age").unwrap().as_i64().unwrap() * 2);
        assert_eq!(ages.to_array(), json!([60, 36, 44]));
    }
}
