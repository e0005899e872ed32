//! Collection - Fluent in-memory queries over lists of records.
//!
//! A [`Collection`] wraps an ordered list of [`Value`]s, usually records,
//! and offers SQL/LINQ-flavored operations on it:
//!
//! - Projection and mapping: `select` (with `field as alias`), `map`
//! - Joins on one field or a composite key: `join`
//! - Filtering: `where_op`, `where_eq`, `where_in`, `or_where`
//! - Set operations with structural equality: `union`, `intersect`, `except`
//! - Ordering: `order_by`, `order_by_descending`, `sort`
//! - Grouping and aggregates: `group_by`, `max`, `min`, `sum`, `avg`
//! - Element access, slicing and pagination: `first`, `last`, `find_at`,
//!   `skip`, `take`, `to_page`
//!
//! # Quick Start
//!
//! ```rust
//! use standout_collection::{record, Collection, Dir, Value};
//!
//! let mut people = Collection::from(vec![
//!     record! { name: "John", age: 30, sex: "male" },
//!     record! { name: "Alice", age: 18, sex: "female" },
//!     record! { name: "Bob", age: 22, sex: "male" },
//! ]);
//!
//! let adults = people.where_op("age", ">", 20).unwrap();
//! assert_eq!(adults.count(), 2);
//!
//! people.order_by("age", Dir::Asc).unwrap();
//! let names = people.select(&["name as n"]).unwrap();
//! assert_eq!(names.first(), Some(&Value::from(record! { n: "Alice" })));
//!
//! assert_eq!(people.sum(Some("age")).unwrap().to_f64(), 70.0);
//! ```
//!
//! # Equality
//!
//! Two notions of equality are in play:
//!
//! - **Structural** (`==` on [`Value`]): same type and same contents, so
//!   `1`, `1.0` and `"1"` all differ. Record key order is ignored. Used by
//!   `where_eq`, `===`, `!=`, the set operations and `group_by`.
//! - **Loose** ([`Value::loose_eq`]): numeric strings compare as numbers and
//!   scalars are coerced. Used by `==`, `=`, `IN`, `or_where` and `join`.
//!
//! # Ordering
//!
//! Sorting and `max`/`min` use [`compare_values`], a total order:
//!
//! ```text
//! null < bool < number (numeric strings included) < text < array < record
//! ```
//!
//! # Operators
//!
//! | Text | Meaning |
//! |------|---------|
//! | `===` | structural equality |
//! | `==`, `=` | loose equality |
//! | `!=` | structural inequality |
//! | `>`, `>=`, `<`, `<=` | [`compare_values`], or truthiness against a bool |
//! | `IN`, `NOT IN` | loose membership in an array |
//! | `LIKE`, `NOT LIKE` | substring containment |

mod clause;
mod collection;
mod error;
mod filter;
mod group;
mod join;
mod op;
mod ordering;
mod record;
mod select;
mod sort;
mod value;

// Re-export public API
pub use clause::Clause;
pub use collection::Collection;
pub use error::{CollectionError, Result};
pub use group::DEFAULT_DATALIST;
pub use join::JoinKey;
pub use op::Op;
pub use ordering::{compare_values, Dir};
pub use record::{Record, FIELD_SEPARATOR};
pub use select::ALIAS_SEPARATOR;
pub use value::{Number, Value};

#[doc(hidden)]
pub use record::normalize_key;
