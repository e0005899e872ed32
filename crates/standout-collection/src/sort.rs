//! Ordering operations.
//!
//! [`Collection::order_by`] sorts the receiver in place by a field;
//! [`Collection::sort`] returns a sorted copy ordered by the items
//! themselves. Both sorts are stable, so ties keep their input order.

use log::debug;

use crate::collection::Collection;
use crate::error::Result;
use crate::ordering::{compare_values, Dir};
use crate::value::Value;

impl Collection {
    /// Sorts the receiver in place by the `key` field. Impure.
    ///
    /// Every item is checked for the field before anything moves, so a
    /// missing field leaves the receiver untouched.
    pub fn order_by(&mut self, key: &str, dir: Dir) -> Result<&mut Self> {
        let keys = self
            .iter()
            .map(|item| item.field(key).cloned())
            .collect::<Result<Vec<Value>>>()?;
        let items = std::mem::take(self.items_mut());
        let mut keyed: Vec<(Value, Value)> = keys.into_iter().zip(items).collect();
        keyed.sort_by(|a, b| dir.apply(compare_values(&a.0, &b.0)));
        debug!("order_by: sorted {} items by '{key}' {dir}", keyed.len());
        *self.items_mut() = keyed.into_iter().map(|(_, item)| item).collect();
        Ok(self)
    }

    /// Sorts the receiver in place by the `key` field, largest first. Impure.
    pub fn order_by_descending(&mut self, key: &str) -> Result<&mut Self> {
        self.order_by(key, Dir::Desc)
    }

    /// Returns a copy of the items sorted by their own values.
    pub fn sort(&self, dir: Dir) -> Collection {
        let mut sorted = self.to_list().to_vec();
        sorted.sort_by(|a, b| dir.apply(compare_values(a, b)));
        Collection::new(sorted)
    }
}
