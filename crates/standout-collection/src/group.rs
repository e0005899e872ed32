//! Grouping and aggregates.

use std::collections::HashMap;

use indexmap::IndexSet;
use log::trace;

use crate::collection::Collection;
use crate::error::{CollectionError, Result};
use crate::ordering::compare_values;
use crate::record::Record;
use crate::value::{Number, Value};

/// Default name of the member list produced by [`Collection::group_by`].
pub const DEFAULT_DATALIST: &str = "datalist";

impl Collection {
    /// Groups items by the values of `keys`.
    ///
    /// Produces one record per distinct key tuple, in order of first
    /// appearance. Each record holds the grouping fields (in `keys` order)
    /// and a `datalist_name` array with the remaining fields of every
    /// member. Tuples are compared structurally, so `1` and `"1"` form
    /// different groups.
    ///
    /// Keys may be dotted paths; the grouping field is then named by the
    /// whole path and only the leaf is removed from each member. A key
    /// listed twice counts once.
    ///
    /// ```
    /// use standout_collection::{record, Collection, DEFAULT_DATALIST};
    ///
    /// let people = Collection::from(vec![
    ///     record! { name: "John", sex: "male" },
    ///     record! { name: "Alice", sex: "female" },
    ///     record! { name: "Bob", sex: "male" },
    /// ]);
    /// let groups = people.group_by(&["sex"], DEFAULT_DATALIST).unwrap();
    /// assert_eq!(groups.count(), 2);
    /// ```
    pub fn group_by(&self, keys: &[&str], datalist_name: &str) -> Result<Collection> {
        let keys: IndexSet<&str> = keys.iter().copied().collect();
        let mut slots: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut groups: Vec<(Vec<Value>, Vec<Value>)> = Vec::new();

        for item in self {
            let mut rest = item
                .as_record()
                .ok_or(CollectionError::NotARecord {
                    found: item.type_name(),
                })?
                .clone();
            let group_key = keys
                .iter()
                .map(|key| {
                    rest.remove_path(key)
                        .ok_or_else(|| CollectionError::missing_field(*key))
                })
                .collect::<Result<Vec<Value>>>()?;

            let slot = *slots.entry(group_key).or_insert_with_key(|group_key| {
                groups.push((group_key.clone(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(Value::Object(rest));
        }

        trace!(
            "group_by: {} items into {} groups by {:?}",
            self.count(),
            groups.len(),
            keys
        );

        Ok(groups
            .into_iter()
            .map(|(values, members)| {
                let mut record: Record = keys.iter().copied().zip(values).collect();
                record.insert(datalist_name, Value::Array(members));
                Value::Object(record)
            })
            .collect())
    }

    /// Operands for an aggregate: the items themselves, or one field of each.
    fn operands(&self, key: Option<&str>) -> Result<Vec<&Value>> {
        match key {
            None => Ok(self.iter().collect()),
            Some(key) => self.iter().map(|item| item.field(key)).collect(),
        }
    }

    /// Largest value, or `None` for an empty collection.
    pub fn max(&self, key: Option<&str>) -> Result<Option<Value>> {
        Ok(self
            .operands(key)?
            .into_iter()
            .max_by(|a, b| compare_values(a, b))
            .cloned())
    }

    /// Smallest value, or `None` for an empty collection.
    pub fn min(&self, key: Option<&str>) -> Result<Option<Value>> {
        Ok(self
            .operands(key)?
            .into_iter()
            .min_by(|a, b| compare_values(a, b))
            .cloned())
    }

    /// Sum of the values. An empty collection sums to `0`.
    ///
    /// Numeric strings, booleans and null are coerced (see
    /// [`Value::to_number`]); any other operand is an error. The sum stays
    /// an integer while every operand is one.
    pub fn sum(&self, key: Option<&str>) -> Result<Number> {
        self.operands(key)?
            .into_iter()
            .try_fold(Number::Int(0), |total, value| {
                let n = value.to_number().ok_or(CollectionError::NotNumeric {
                    found: value.type_name(),
                })?;
                Ok(total + n)
            })
    }

    /// Arithmetic mean of the values.
    ///
    /// Fails with [`CollectionError::EmptyAggregate`] on an empty collection.
    pub fn avg(&self, key: Option<&str>) -> Result<f64> {
        if self.is_empty() {
            return Err(CollectionError::EmptyAggregate("avg"));
        }
        Ok(self.sum(key)?.to_f64() / self.count() as f64)
    }
}
