//! Helpers for loosely-typed values: coercion with default fallback,
//! a permissive fixed-format date parser, null coalescing, string case
//! conversion and order-preserving de-duplication.
//!
//! ```
//! use varhelpers::{Value, coerce_to_int, camel_case};
//!
//! assert_eq!(coerce_to_int(&Value::from("1.9"), None), Ok(Some(1)));
//! assert_eq!(camel_case("any-word"), "anyWord");
//! ```

mod case;
mod coerce;
mod consts;
mod date;
mod prelude;
mod seq;
mod value;

pub use case::{camel_case, camelize, pascal_case, upper_first};
pub use coerce::{
    coerce_to_array, coerce_to_boolean, coerce_to_date, coerce_to_int, coerce_to_number,
    coerce_to_string,
};
pub use consts::*;
pub use date::{DateParts, ParseOptions, Zone, parse_date};
pub use seq::{coalesce, distinct, map_distinct};
pub use value::Value;

use crate::prelude::*;

/// Error returned when text does not describe a date.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    /// The text does not match the fixed date grammar
    #[display(fmt = "\"{_0}\" is not a valid date value.")]
    InvalidFormat(String),
    /// The text matched, but names no representable instant
    /// (out of range, or a local time skipped by a DST transition)
    #[display(fmt = "\"{_0}\" does not name a valid point in time.")]
    InvalidDateTime(String),
}

impl std::error::Error for ParseError {}

/// Error returned when a present value cannot be coerced and no default was given.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
    /// The value has the wrong shape for the target type.
    #[error("\"{value}\" is not a valid {target} value.")]
    Invalid { value: String, target: &'static str },

    /// A string value failed date parsing.
    #[error(transparent)]
    Date(#[from] ParseError),
}

impl CoerceError {
    pub(crate) fn invalid(value: &Value, target: &'static str) -> Self {
        Self::Invalid {
            value: value.to_string(),
            target,
        }
    }
}
