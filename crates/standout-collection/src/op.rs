//! Comparison operators for `where` clauses.
//!
//! The [`Op`] enum is the operator catalog accepted by
//! [`Collection::where_op`](crate::Collection::where_op). Operators are
//! written as text (`"==="`, `"not in"`, `"LIKE"`) and parsed without regard
//! to case.

use std::cmp::Ordering;

/// Comparison operator for a `where` clause.
///
/// - **Equality**: `===` (strict), `==` and `=` (loose), `!=` (strict
///   inequality, so `!=` is *not* the negation of `==`)
/// - **Relational**: `>`, `<`, `>=`, `<=` (booleans compare by truthiness)
/// - **Membership**: `IN`, `NOT IN` (loose, against an array)
/// - **Substring**: `LIKE`, `NOT LIKE` (plain containment, no wildcards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `===`: same type and structurally equal.
    StrictEq,
    /// `==` or `=`: equal after coercion.
    LooseEq,
    /// `!=`: not strictly equal.
    StrictNe,
    Gt,
    Gte,
    Lt,
    Lte,
    /// `IN`: loosely equal to some member of the array.
    In,
    /// `NOT IN`: loosely equal to no member of the array.
    NotIn,
    /// `LIKE`: field text contains the value text.
    Like,
    /// `NOT LIKE`: field text does not contain the value text.
    NotLike,
}

impl Op {
    /// Parses an operator, ignoring case.
    ///
    /// Returns `None` for anything outside the catalog.
    pub fn parse(s: &str) -> Option<Op> {
        let op = match s.to_ascii_uppercase().as_str() {
            "===" => Op::StrictEq,
            "==" | "=" => Op::LooseEq,
            "!=" => Op::StrictNe,
            ">" => Op::Gt,
            ">=" => Op::Gte,
            "<" => Op::Lt,
            "<=" => Op::Lte,
            "IN" => Op::In,
            "NOT IN" => Op::NotIn,
            "LIKE" => Op::Like,
            "NOT LIKE" => Op::NotLike,
            _ => return None,
        };
        Some(op)
    }

    /// Returns `true` for `>`, `>=`, `<` and `<=`.
    pub fn is_relational(self) -> bool {
        matches!(self, Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }

    /// Returns `true` for `IN` and `NOT IN`.
    pub fn is_membership(self) -> bool {
        matches!(self, Op::In | Op::NotIn)
    }

    /// Evaluates a relational operator given an ordering result.
    ///
    /// Non-relational operators always return `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the canonical spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::StrictEq => "===",
            Op::LooseEq => "==",
            Op::StrictNe => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::In => "IN",
            Op::NotIn => "NOT IN",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog() {
        assert_eq!(Op::parse("==="), Some(Op::StrictEq));
        assert_eq!(Op::parse("=="), Some(Op::LooseEq));
        assert_eq!(Op::parse("="), Some(Op::LooseEq));
        assert_eq!(Op::parse("!="), Some(Op::StrictNe));
        assert_eq!(Op::parse(">="), Some(Op::Gte));
        assert_eq!(Op::parse("<"), Some(Op::Lt));
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(Op::parse("in"), Some(Op::In));
        assert_eq!(Op::parse("Not In"), Some(Op::NotIn));
        assert_eq!(Op::parse("like"), Some(Op::Like));
        assert_eq!(Op::parse("not LIKE"), Some(Op::NotLike));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(Op::parse("<>"), None);
        assert_eq!(Op::parse("!=="), None);
        assert_eq!(Op::parse("NOT  IN"), None);
        assert_eq!(Op::parse(" = "), None);
        assert_eq!(Op::parse(""), None);
    }

    #[test]
    fn eval_ordering() {
        assert!(Op::Gt.eval_ordering(Ordering::Greater));
        assert!(!Op::Gt.eval_ordering(Ordering::Equal));
        assert!(Op::Gte.eval_ordering(Ordering::Equal));
        assert!(!Op::Gte.eval_ordering(Ordering::Less));
        assert!(Op::Lt.eval_ordering(Ordering::Less));
        assert!(Op::Lte.eval_ordering(Ordering::Equal));
        assert!(!Op::Lte.eval_ordering(Ordering::Greater));
        assert!(!Op::StrictEq.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn display_round_trips() {
        for op in [
            Op::StrictEq,
            Op::LooseEq,
            Op::StrictNe,
            Op::Gt,
            Op::Gte,
            Op::Lt,
            Op::Lte,
            Op::In,
            Op::NotIn,
            Op::Like,
            Op::NotLike,
        ] {
            assert_eq!(Op::parse(&op.to_string()), Some(op));
        }
    }
}
