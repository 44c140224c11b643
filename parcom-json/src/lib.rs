//! # parcom-json
//!
//! A small demonstration crate built on **parcom**, composing the combinator
//! primitives into a JSON object-literal grammar. It exists to exercise and
//! validate the engine — recursive rules through `lazy`, ordered choice,
//! repetition, negation-based string scanning — rather than to be a general
//! JSON library: there is no escape handling, no signed or exponent number
//! forms, no streaming and no writing.
//!
//! ## Example
//!
//! ```rust
//! use parcom::Cursor;
//! use parcom_json::{document, Value};
//!
//! let step = document()
//!     .parse(Cursor::new(r#"{"name": "mokha", "age": 10}"#))
//!     .unwrap();
//! assert_eq!(step.value[0].0, "name");
//! assert_eq!(step.value[1].1, Value::Number(10.0));
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] — the parser rules (`space`, `string`, `number`, `object`,
//!   `value`, `document`)
//! - [`value`] — the [`Value`] sum type the rules produce

pub mod grammar;
pub mod value;

pub use grammar::{document, number, object, string_literal, value};
pub use value::Value;
