//! Clause types for `where` predicates.
//!
//! A [`Clause`] represents a single filter predicate: a field name,
//! an operator, and a comparison value.

use crate::error::{CollectionError, Result};
use std::cmp::Ordering;

use crate::op::Op;
use crate::ordering::compare_values;
use crate::value::Value;

/// A single filter predicate.
///
/// A clause whose operator text is not in the catalog is still a valid
/// clause: it simply matches nothing.
///
/// # Example
///
/// ```
/// use standout_collection::{Clause, Op, Value};
///
/// let adult = Clause::new("age", Op::Gte, 18).unwrap();
/// assert!(adult.matches(&Value::from(30)));
/// assert!(!adult.matches(&Value::from(12)));
///
/// let unknown = Clause::parse("age", "<>", 18).unwrap();
/// assert_eq!(unknown.op, None);
/// assert!(!unknown.matches(&Value::from(30)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// The field name to compare.
    pub field: String,
    /// The comparison operator, or `None` for unrecognized operator text.
    pub op: Option<Op>,
    /// The value to compare against.
    pub value: Value,
}

impl Clause {
    /// Creates a new clause.
    ///
    /// Membership operators require an array value; anything else is
    /// rejected with [`CollectionError::InvalidOperand`].
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        if op.is_membership() && value.as_array().is_none() {
            return Err(CollectionError::InvalidOperand {
                op: op.as_str(),
                expected: "an array",
                found: value.type_name(),
            });
        }
        Ok(Clause {
            field: field.into(),
            op: Some(op),
            value,
        })
    }

    /// Creates a clause from operator text, ignoring case.
    ///
    /// Unknown operator text yields a clause that never matches.
    pub fn parse(field: impl Into<String>, op: &str, value: impl Into<Value>) -> Result<Self> {
        match Op::parse(op) {
            Some(op) => Clause::new(field, op, value),
            None => Ok(Clause {
                field: field.into(),
                op: None,
                value: value.into(),
            }),
        }
    }

    /// Evaluates this clause against a field value.
    pub fn matches(&self, field_value: &Value) -> bool {
        let Some(op) = self.op else {
            return false;
        };
        match op {
            Op::StrictEq => *field_value == self.value,
            Op::StrictNe => *field_value != self.value,
            Op::LooseEq => field_value.loose_eq(&self.value),
            Op::Gt | Op::Gte | Op::Lt | Op::Lte => {
                op.eval_ordering(relate(field_value, &self.value))
            }
            Op::In => self.contains(field_value),
            Op::NotIn => !self.contains(field_value),
            Op::Like => self.like(field_value).unwrap_or(false),
            Op::NotLike => self.like(field_value).map_or(true, |found| !found),
        }
    }

    /// Evaluates this clause against an item, reading the clause's field.
    pub fn evaluate(&self, item: &Value) -> Result<bool> {
        Ok(self.matches(item.field(&self.field)?))
    }

    fn contains(&self, field_value: &Value) -> bool {
        self.value
            .as_array()
            .is_some_and(|set| set.iter().any(|member| field_value.loose_eq(member)))
    }

    /// Substring test on the string forms; `None` when either side is not
    /// a scalar.
    fn like(&self, field_value: &Value) -> Option<bool> {
        let haystack = field_value.to_text()?;
        let needle = self.value.to_text()?;
        Some(haystack.contains(needle.as_ref()))
    }
}

/// Ordering for the relational operators.
///
/// A boolean on either side turns the comparison into one of truthiness,
/// so `true > 0` and `false < "a"`. Everything else uses [`compare_values`].
fn relate(field_value: &Value, operand: &Value) -> Ordering {
    match (field_value, operand) {
        (Value::Bool(_), _) | (_, Value::Bool(_)) => {
            field_value.is_truthy().cmp(&operand.is_truthy())
        }
        _ => compare_values(field_value, operand),
    }
}
