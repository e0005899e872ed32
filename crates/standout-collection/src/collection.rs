//! The [`Collection`] type: construction, extraction, element access,
//! slicing, whole-collection predicates and mutation helpers.
//!
//! Querying operations live next to the concerns they implement:
//! projection in `select`, joins in `join`, the `where` family and set
//! operations in `filter`, ordering in `sort`, grouping and aggregates in
//! `group`.
//!
//! # Pure and impure operations
//!
//! Most operations take `&self` and return a new collection. A few take
//! `&mut self`, change the receiver in place and return it for chaining:
//! [`or_where`](Collection::or_where), [`order_by`](Collection::order_by),
//! [`order_by_descending`](Collection::order_by_descending),
//! [`add_range`](Collection::add_range) and [`clear`](Collection::clear).

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, Result};
use crate::record::Record;
use crate::value::Value;

/// An ordered, in-memory collection of items.
///
/// Items are usually records ([`Value::Object`]), but any [`Value`] may be
/// stored; aggregates without a field name and [`sort`](Collection::sort)
/// operate on the items themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<Value>,
}

impl Collection {
    // ========================================================================
    // Construction & extraction
    // ========================================================================

    /// Wraps a sequence of items. The sequence is moved, not copied.
    pub fn new(items: Vec<Value>) -> Self {
        Collection { items }
    }

    /// Parses JSON text into a collection.
    ///
    /// A JSON array becomes one item per element; any other JSON value
    /// becomes a single-item collection, and `null` an empty one.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: serde_json::Value = serde_json::from_str(json)?;
        Ok(Collection::from(parsed))
    }

    /// Returns the underlying items without copying.
    pub fn to_list(&self) -> &[Value] {
        &self.items
    }

    /// Consumes the collection and returns its items.
    pub fn into_list(self) -> Vec<Value> {
        self.items
    }

    /// Converts every item, at any nesting depth, into plain JSON data.
    pub fn to_array(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(Value::to_json).collect())
    }

    /// Returns a new collection holding a copy of the same items.
    pub fn get(&self) -> Collection {
        self.clone()
    }

    /// Number of items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Removes every item. Impure.
    pub fn clear(&mut self) -> &mut Self {
        debug!("clear: dropping {} items", self.items.len());
        self.items.clear();
        self
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Value> {
        &mut self.items
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Returns the first item, if any.
    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    /// Returns the first item satisfying `predicate`.
    pub fn first_where<P>(&self, mut predicate: P) -> Option<&Value>
    where
        P: FnMut(&Value) -> bool,
    {
        self.items.iter().find(|item| predicate(*item))
    }

    /// Returns the first item (matching `predicate`, when given), or
    /// `default` when there is none.
    pub fn first_or_default(
        &self,
        default: Value,
        predicate: Option<&dyn Fn(&Value) -> bool>,
    ) -> Value {
        let found = match predicate {
            Some(predicate) => self.first_where(predicate),
            None => self.first(),
        };
        found.cloned().unwrap_or(default)
    }

    /// Returns the last item, if any.
    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Returns the last item satisfying `predicate`, scanning from the end.
    pub fn last_where<P>(&self, mut predicate: P) -> Option<&Value>
    where
        P: FnMut(&Value) -> bool,
    {
        self.items.iter().rev().find(|item| predicate(*item))
    }

    /// Returns the last item (matching `predicate`, when given), or
    /// `default` when there is none.
    pub fn last_or_default(
        &self,
        default: Value,
        predicate: Option<&dyn Fn(&Value) -> bool>,
    ) -> Value {
        let found = match predicate {
            Some(predicate) => self.last_where(predicate),
            None => self.last(),
        };
        found.cloned().unwrap_or(default)
    }

    /// Index of the first item satisfying `predicate`.
    pub fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&Value) -> bool,
    {
        self.items.iter().position(predicate)
    }

    /// Bounds-checked positional access. Negative or out-of-range indexes
    /// return `None`.
    pub fn find_at(&self, index: isize) -> Option<&Value> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.items.get(index))
    }

    // ========================================================================
    // Slicing & paging
    // ========================================================================

    /// Skips the first `n` items.
    pub fn skip(&self, n: usize) -> Collection {
        self.items.iter().skip(n).cloned().collect()
    }

    /// Keeps at most the first `n` items.
    pub fn take(&self, n: usize) -> Collection {
        self.items.iter().take(n).cloned().collect()
    }

    /// Returns page `page` (1-indexed) of `limit` items.
    ///
    /// Page 0 does not exist and yields an empty collection.
    pub fn to_page(&self, page: usize, limit: usize) -> Collection {
        if page == 0 {
            return Collection::default();
        }
        let offset = (page - 1).saturating_mul(limit);
        self.items
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    // ========================================================================
    // Whole-collection predicates
    // ========================================================================

    /// Tests the collection against an optional predicate.
    ///
    /// **With no predicate this returns `true` when the collection is
    /// empty** and `false` otherwise: the inverse of the usual "does any
    /// element exist" reading. Callers relying on that reading should use
    /// `!is_empty()`. With a predicate, returns whether some item
    /// satisfies it.
    pub fn any(&self, predicate: Option<&dyn Fn(&Value) -> bool>) -> bool {
        match predicate {
            None => self.items.is_empty(),
            Some(predicate) => self.items.iter().any(predicate),
        }
    }

    /// Tests every item against an optional predicate.
    ///
    /// An empty collection returns `false`. With no predicate, every item
    /// must be truthy (see [`Value::is_truthy`]).
    pub fn all(&self, predicate: Option<&dyn Fn(&Value) -> bool>) -> bool {
        if self.items.is_empty() {
            return false;
        }
        match predicate {
            None => self.items.iter().all(Value::is_truthy),
            Some(predicate) => self.items.iter().all(predicate),
        }
    }

    // ========================================================================
    // Mutation helpers
    // ========================================================================

    /// Returns a new collection with `item` appended.
    ///
    /// The item must have exactly the fields of the first item, otherwise
    /// [`CollectionError::FieldMismatch`] is returned. Any item may be added
    /// to an empty collection.
    pub fn add(&self, item: impl Into<Value>) -> Result<Collection> {
        let item = item.into();
        if let Some(template) = self.items.first() {
            check_fields(template, &item)?;
        }
        let mut items = self.items.clone();
        items.push(item);
        Ok(Collection::new(items))
    }

    /// Appends every item to this collection. Impure.
    ///
    /// Each item is checked like [`add`](Collection::add), against the
    /// receiver's first item, or the batch's first item when the receiver
    /// is empty. Nothing is appended unless every item passes.
    pub fn add_range<I, V>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let batch: Vec<Value> = items.into_iter().map(Into::into).collect();
        if let Some(template) = self.items.first().or(batch.first()) {
            for item in &batch {
                check_fields(template, item)?;
            }
        }
        debug!(
            "add_range: appending {} items to {}",
            batch.len(),
            self.items.len()
        );
        self.items.extend(batch);
        Ok(self)
    }
}

fn field_set(item: &Value) -> BTreeSet<&str> {
    item.as_record()
        .map(|record| record.keys().collect())
        .unwrap_or_default()
}

fn check_fields(template: &Value, item: &Value) -> Result<()> {
    let expected = field_set(template);
    let actual = field_set(item);
    if expected == actual {
        return Ok(());
    }
    let join = |fields: BTreeSet<&str>| fields.into_iter().collect::<Vec<_>>().join(", ");
    Err(CollectionError::FieldMismatch {
        expected: join(expected),
        actual: join(actual),
    })
}

impl<V: Into<Value>> From<Vec<V>> for Collection {
    fn from(items: Vec<V>) -> Self {
        Collection::new(items.into_iter().map(Into::into).collect())
    }
}

/// A single record as a one-item collection.
impl From<Record> for Collection {
    fn from(record: Record) -> Self {
        Collection::new(vec![Value::Object(record)])
    }
}

impl From<serde_json::Value> for Collection {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Collection::default(),
            serde_json::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            other => Collection::new(vec![Value::from(other)]),
        }
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Collection::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Collection {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl AsRef<[Value]> for Collection {
    fn as_ref(&self) -> &[Value] {
        &self.items
    }
}
