//! The value type produced by the JSON sample grammar.

use smartstring::alias::String;

/// A parsed JSON value, restricted to the subset the sample grammar covers.
///
/// Objects keep their key/value pairs in declaration order and permit
/// duplicate keys; the derived `PartialEq` therefore compares entries
/// pairwise in order, not as a set.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Object(Vec<(String, Value)>),
}
