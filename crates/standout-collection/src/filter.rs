//! The `where` family and set operations.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::clause::Clause;
use crate::collection::Collection;
use crate::error::Result;
use crate::op::Op;
use crate::value::Value;

impl Collection {
    /// Keeps the items whose `key` field satisfies `op value`.
    ///
    /// `op` is parsed without regard to case (see [`Op`]). An unrecognized
    /// operator is not an error: it matches no item. `IN`/`NOT IN` require
    /// an array `value`.
    ///
    /// ```
    /// use standout_collection::{record, Collection};
    ///
    /// let people = Collection::from(vec![
    ///     record! { name: "John", age: 30 },
    ///     record! { name: "Alice", age: 18 },
    ///     record! { name: "Bob", age: 22 },
    /// ]);
    /// let older = people.where_op("age", ">", 20).unwrap();
    /// assert_eq!(older.count(), 2);
    /// ```
    pub fn where_op(&self, key: &str, op: &str, value: impl Into<Value>) -> Result<Collection> {
        let clause = Clause::parse(key, op, value)?;
        if clause.op.is_none() {
            warn!("where: unknown operator '{op}' on field '{key}' matches nothing");
        }
        self.where_clause(&clause)
    }

    /// Keeps the items whose `key` field is strictly equal (`===`) to `value`.
    pub fn where_eq(&self, key: &str, value: impl Into<Value>) -> Result<Collection> {
        self.where_clause(&Clause::new(key, Op::StrictEq, value)?)
    }

    /// Keeps the items whose `key` field loosely equals one of `values`.
    pub fn where_in<I, V>(&self, key: &str, values: I) -> Result<Collection>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let set = Value::Array(values.into_iter().map(Into::into).collect());
        self.where_clause(&Clause::new(key, Op::In, set)?)
    }

    /// Keeps the items matching `clause`, in order.
    pub fn where_clause(&self, clause: &Clause) -> Result<Collection> {
        let mut matched = Vec::new();
        for item in self {
            if clause.evaluate(item)? {
                matched.push(item.clone());
            }
        }
        trace!(
            "where: {} {} {} kept {} of {} items",
            clause.field,
            clause.op.map_or("?", Op::as_str),
            clause.value,
            matched.len(),
            self.count()
        );
        Ok(Collection::new(matched))
    }

    /// Appends every item whose `key` field loosely equals `value`. Impure.
    ///
    /// Matches are appended after the existing items, so an item that
    /// matches appears twice. This is not a pure filter: it grows the
    /// receiver and returns it.
    pub fn or_where(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let clause = Clause::new(key, Op::LooseEq, value)?;
        let matched = self.where_clause(&clause)?.into_list();
        debug!(
            "or_where: appending {} matches to {} items",
            matched.len(),
            self.count()
        );
        self.items_mut().extend(matched);
        Ok(self)
    }

    /// Items of this collection followed by those of `other`, without
    /// structural duplicates. First occurrences win.
    pub fn union(&self, other: &Collection) -> Collection {
        let mut seen = HashSet::new();
        self.iter()
            .chain(other.iter())
            .filter(|item| seen.insert(*item))
            .cloned()
            .collect()
    }

    /// Items of this collection that are structurally present in `other`.
    pub fn intersect(&self, other: &Collection) -> Collection {
        let theirs: HashSet<&Value> = other.iter().collect();
        self.iter()
            .filter(|item| theirs.contains(*item))
            .cloned()
            .collect()
    }

    /// Items of this collection that are not structurally present in `other`.
    pub fn except(&self, other: &Collection) -> Collection {
        let theirs: HashSet<&Value> = other.iter().collect();
        self.iter()
            .filter(|item| !theirs.contains(*item))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;
    use serde_json::json;

    fn people() -> Collection {
        Collection::from(json!([
            {"name": "John Doe", "age": 30, "sex": "male"},
            {"name": "Alice Doe", "age": 18, "sex": "female"},
            {"name": "Bob Roe", "age": "22", "sex": "male"},
        ]))
    }

    fn names(collection: &Collection) -> Vec<String> {
        collection
            .iter()
            .map(|item| item.field("name").unwrap().as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn greater_than_keeps_order() {
        let older = people().where_op("age", ">", 20).unwrap();
        assert_eq!(names(&older), vec!["John Doe", "Bob Roe"]);
    }

    #[test]
    fn strict_vs_loose_equality() {
        assert_eq!(names(&people().where_eq("age", 22).unwrap()), Vec::<String>::new());
        assert_eq!(names(&people().where_op("age", "===", "22").unwrap()), vec!["Bob Roe"]);
        assert_eq!(names(&people().where_op("age", "==", 22).unwrap()), vec!["Bob Roe"]);
        assert_eq!(names(&people().where_op("age", "=", 22).unwrap()), vec!["Bob Roe"]);
    }

    #[test]
    fn not_equal_is_strict() {
        // "22" == 22 loosely, yet "22" != 22 as well.
        let ne = people().where_op("age", "!=", 22).unwrap();
        assert_eq!(ne.count(), 3);
    }

    #[test]
    fn relational_bounds() {
        assert_eq!(people().where_op("age", ">=", 22).unwrap().count(), 2);
        assert_eq!(people().where_op("age", "<", 22).unwrap().count(), 1);
        assert_eq!(people().where_op("age", "<=", 22).unwrap().count(), 2);
    }

    #[test]
    fn relational_on_boolean_field() {
        let flags = Collection::from(json!([
            {"id": 1, "active": true},
            {"id": 2, "active": false},
            {"id": 3, "active": true},
        ]));
        assert_eq!(flags.where_op("active", ">", 0).unwrap().count(), 2);
        assert_eq!(flags.where_op("active", ">=", 1).unwrap().count(), 2);
        assert_eq!(flags.where_op("active", "==", 1).unwrap().count(), 2);
        assert_eq!(flags.where_op("active", "<", 1).unwrap().count(), 1);
    }

    #[test]
    fn membership_and_like() {
        let set = Value::from(vec!["female", "other"]);
        assert_eq!(names(&people().where_op("sex", "in", set.clone()).unwrap()), vec!["Alice Doe"]);
        assert_eq!(people().where_op("sex", "NOT IN", set).unwrap().count(), 2);
        assert_eq!(names(&people().where_op("name", "like", "Roe").unwrap()), vec!["Bob Roe"]);
        assert_eq!(people().where_op("name", "NOT LIKE", "Doe").unwrap().count(), 1);
    }

    #[test]
    fn unknown_operator_matches_nothing() {
        let filtered = people().where_op("age", "<>", 30).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn membership_rejects_scalar() {
        assert!(matches!(
            people().where_op("sex", "IN", "male"),
            Err(CollectionError::InvalidOperand { .. })
        ));
    }

    #[test]
    fn missing_field_fails() {
        assert!(matches!(
            people().where_op("email", "==", "x"),
            Err(CollectionError::MissingField { .. })
        ));
    }

    #[test]
    fn where_in_is_loose() {
        let filtered = people().where_in("age", vec![22, 18]).unwrap();
        assert_eq!(names(&filtered), vec!["Alice Doe", "Bob Roe"]);
    }

    #[test]
    fn where_leaves_receiver_alone() {
        let collection = people();
        let _ = collection.where_op("age", ">", 100).unwrap();
        assert_eq!(collection.count(), 3);
    }

    #[test]
    fn or_where_appends_matches() {
        let mut collection = people();
        collection.or_where("sex", "male").unwrap();
        assert_eq!(
            names(&collection),
            vec!["John Doe", "Alice Doe", "Bob Roe", "John Doe", "Bob Roe"]
        );
    }

    #[test]
    fn or_where_chains_on_the_same_receiver() {
        let mut collection = people();
        collection
            .or_where("age", 18)
            .unwrap()
            .or_where("age", "30")
            .unwrap();
        assert_eq!(collection.count(), 5);
    }

    #[test]
    fn union_dedupes_structurally() {
        let a = Collection::from(json!([{"x": 1}, {"x": 2}, {"x": 1}]));
        let b = Collection::from(json!([{"x": 2}, {"x": 3}, {"x": 1.0}]));
        assert_eq!(
            a.union(&b).to_array(),
            json!([{"x": 1}, {"x": 2}, {"x": 3}, {"x": 1.0}])
        );
    }

    #[test]
    fn intersect_and_except() {
        let a = Collection::from(json!([{"x": 1}, {"x": 2}, {"x": 3}]));
        let b = Collection::from(json!([{"x": 3}, {"x": 1}, {"x": "2"}]));
        assert_eq!(a.intersect(&b).to_array(), json!([{"x": 1}, {"x": 3}]));
        assert_eq!(a.except(&b).to_array(), json!([{"x": 2}]));
    }
}
