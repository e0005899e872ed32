//! Sort direction and the ordering of values.
//!
//! [`compare_values`] is the single ordering used by `order_by`, `sort`,
//! `max`, `min` and the relational `where` operators.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::record::Record;
use crate::value::{parse_numeric, Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses `"asc"` or `"desc"`, ignoring case.
impl FromStr for Dir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Dir::Asc),
            "desc" => Ok(Dir::Desc),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// Ordering class of a value. Classes sort in declaration order.
enum Class<'a> {
    Null,
    Bool(bool),
    Numeric(Number),
    Text(&'a str),
    Array(&'a [Value]),
    Object(&'a Record),
}

impl<'a> Class<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Class::Null,
            Value::Bool(b) => Class::Bool(*b),
            Value::Number(n) => Class::Numeric(*n),
            Value::String(s) => match parse_numeric(s) {
                Some(n) => Class::Numeric(n),
                None => Class::Text(s),
            },
            Value::Array(items) => Class::Array(items),
            Value::Object(record) => Class::Object(record),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Class::Null => 0,
            Class::Bool(_) => 1,
            Class::Numeric(_) => 2,
            Class::Text(_) => 3,
            Class::Array(_) => 4,
            Class::Object(_) => 5,
        }
    }
}

/// Compares two values under a total order.
///
/// Values are ranked `null < bool < numeric < string < array < record`.
/// Numbers and numeric strings share the numeric rank and compare by value,
/// so `"10" > 9` and `"10" > "9"`. Other strings compare bytewise. Arrays
/// compare by length, then element by element; records by field count, then
/// by their fields in name order.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (a, b) = (Class::of(a), Class::of(b));
    match (&a, &b) {
        (Class::Null, Class::Null) => Ordering::Equal,
        (Class::Bool(x), Class::Bool(y)) => x.cmp(y),
        (Class::Numeric(x), Class::Numeric(y)) => x.compare(*y),
        (Class::Text(x), Class::Text(y)) => x.cmp(y),
        (Class::Array(x), Class::Array(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| compare_sequences(x.iter(), y.iter())),
        (Class::Object(x), Class::Object(y)) => compare_records(x, y),
        _ => a.rank().cmp(&b.rank()),
    }
}

fn compare_sequences<'a>(
    a: impl Iterator<Item = &'a Value>,
    b: impl Iterator<Item = &'a Value>,
) -> Ordering {
    a.zip(b)
        .map(|(x, y)| compare_values(x, y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn sorted_fields(record: &Record) -> Vec<(&str, &Value)> {
    let mut entries: Vec<(&str, &Value)> = record.iter().collect();
    entries.sort_by(|x, y| x.0.cmp(y.0));
    entries
}

fn compare_records(a: &Record, b: &Record) -> Ordering {
    let (a, b) = (sorted_fields(a), sorted_fields(b));
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(&b)
            .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| compare_values(va, vb)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_parse_ignores_case() {
        assert_eq!("ASC".parse::<Dir>(), Ok(Dir::Asc));
        assert_eq!("Desc".parse::<Dir>(), Ok(Dir::Desc));
        assert!("down".parse::<Dir>().is_err());
        assert_eq!(Dir::default(), Dir::Asc);
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn compare_numbers_and_numeric_strings() {
        assert_eq!(compare_values(&v(json!(18)), &v(json!(22))), Ordering::Less);
        assert_eq!(compare_values(&v(json!("10")), &v(json!(9))), Ordering::Greater);
        assert_eq!(compare_values(&v(json!("10")), &v(json!("9"))), Ordering::Greater);
        assert_eq!(compare_values(&v(json!(2)), &v(json!(2.0))), Ordering::Equal);
    }

    #[test]
    fn compare_strings_bytewise() {
        assert_eq!(compare_values(&v(json!("Alice")), &v(json!("Bob"))), Ordering::Less);
        assert_eq!(compare_values(&v(json!("b")), &v(json!("B"))), Ordering::Greater);
    }

    #[test]
    fn classes_rank_in_order() {
        let ladder = [
            json!(null),
            json!(false),
            json!(true),
            json!(-5),
            json!("7"),
            json!("abc"),
            json!([]),
            json!([1, 2]),
            json!({}),
            json!({"a": 1}),
        ];
        for pair in ladder.windows(2) {
            let (a, b) = (v(pair[0].clone()), v(pair[1].clone()));
            assert_eq!(compare_values(&a, &b), Ordering::Less, "{a} < {b}");
            assert_eq!(compare_values(&b, &a), Ordering::Greater, "{b} > {a}");
        }
    }

    #[test]
    fn numeric_and_text_strings_do_not_cycle() {
        // "9" < "10" numerically; both numeric strings sort before "1a".
        let nine = v(json!("9"));
        let ten = v(json!("10"));
        let text = v(json!("1a"));
        assert_eq!(compare_values(&nine, &ten), Ordering::Less);
        assert_eq!(compare_values(&ten, &text), Ordering::Less);
        assert_eq!(compare_values(&nine, &text), Ordering::Less);
    }

    #[test]
    fn compare_records_by_sorted_fields() {
        let a = v(json!({"b": 1, "a": 2}));
        let b = v(json!({"a": 2, "b": 1}));
        let c = v(json!({"a": 3, "b": 0}));
        assert_eq!(compare_values(&a, &b), Ordering::Equal);
        assert_eq!(compare_values(&a, &c), Ordering::Less);
    }

    #[test]
    fn compare_arrays_length_first() {
        let short = v(json!([9, 9]));
        let long = v(json!([1, 1, 1]));
        assert_eq!(compare_values(&short, &long), Ordering::Less);
        assert_eq!(
            compare_values(&v(json!([1, 2])), &v(json!([1, 3]))),
            Ordering::Less
        );
    }
}
