//! Coercion of loosely-typed values, with default fallback.
//!
//! Every `coerce_to_*` function shares one contract:
//!
//! * a present, convertible value is converted;
//! * otherwise a present default is coerced through the same function
//!   (`Some(&Value::Null)` counts as no default); dates only take the
//!   default when the value is absent;
//! * otherwise an absent value yields `None`, and a present but
//!   unconvertible one yields [`CoerceError`].

use std::{borrow::Cow, sync::LazyLock};

use chrono::{DateTime, Local, TimeZone};
use regex::Regex;
use tracing::debug;

use crate::{
    CoerceError, ParseOptions, Value,
    consts::{
        DATE_TYPE, INT_PREFIX_PATTERN, INTEGER_TYPE, MAX_TIMESTAMP_MILLIS, NUMBER_PREFIX_PATTERN,
        NUMBER_TYPE,
    },
    parse_date,
};

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(NUMBER_PREFIX_PATTERN).expect("number prefix pattern is a valid regex")
});

static INT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(INT_PREFIX_PATTERN).expect("integer prefix pattern is a valid regex")
});

type Coercer<T> = fn(&Value, Option<&Value>) -> Result<Option<T>, CoerceError>;

#[inline]
fn present(default: Option<&Value>) -> Option<&Value> {
    default.filter(|d| !d.is_null())
}

/// Shared tail of the fallible coercions, once `value` failed to convert.
fn fall_back<T>(
    value: &Value,
    default: Option<&Value>,
    coerce: Coercer<T>,
    error: impl FnOnce() -> CoerceError,
) -> Result<Option<T>, CoerceError> {
    match present(default) {
        Some(d) => {
            if !value.is_null() {
                debug!(%value, default = %d, "value not convertible, coercing default");
            }
            coerce(d, None)
        }
        None if value.is_null() => Ok(None),
        None => {
            let err = error();
            debug!(%err, "coercion failed");
            Err(err)
        }
    }
}

/// Arrays are returned borrowed, any other present value is wrapped.
pub fn coerce_to_array<'a>(
    value: &'a Value,
    default: Option<&'a Value>,
) -> Option<Cow<'a, [Value]>> {
    match value {
        Value::Array(items) => Some(Cow::Borrowed(items.as_slice())),
        Value::Null => present(default).and_then(|d| coerce_to_array(d, None)),
        other => Some(Cow::Owned(vec![other.clone()])),
    }
}

/// Truthiness of a present value, see [`Value::is_truthy`].
pub fn coerce_to_boolean(value: &Value, default: Option<&Value>) -> Option<bool> {
    if value.is_null() {
        present(default).and_then(|d| coerce_to_boolean(d, None))
    } else {
        Some(value.is_truthy())
    }
}

/// The value's string form, see the `Display` impl of [`Value`].
pub fn coerce_to_string(value: &Value, default: Option<&Value>) -> Option<String> {
    if value.is_null() {
        present(default).and_then(|d| coerce_to_string(d, None))
    } else {
        Some(value.to_string())
    }
}

/// Parses the leading numeric prefix of the value's string form
/// (`"2.5abc"` is `2.5`). `NaN` is not a number here.
///
/// # Errors
/// Returns `CoerceError::Invalid` if a present value has no numeric prefix
/// and no default is given.
pub fn coerce_to_number(value: &Value, default: Option<&Value>) -> Result<Option<f64>, CoerceError> {
    if let Some(n) = to_number(value) {
        return Ok(Some(n));
    }
    fall_back(value, default, coerce_to_number, || {
        CoerceError::invalid(value, NUMBER_TYPE)
    })
}

/// Like [`coerce_to_number`] but truncates toward zero: `"1.9"` and `1.9` are both `1`.
///
/// # Errors
/// Returns `CoerceError::Invalid` if a present value has no integer prefix,
/// or does not fit in an `i64`, and no default is given.
pub fn coerce_to_int(value: &Value, default: Option<&Value>) -> Result<Option<i64>, CoerceError> {
    if let Some(n) = to_int(value) {
        return Ok(Some(n));
    }
    fall_back(value, default, coerce_to_int, || {
        CoerceError::invalid(value, INTEGER_TYPE)
    })
}

/// Dates are returned as-is, numbers are epoch milliseconds and strings go
/// through [`parse_date`] with default options.
///
/// Unlike the numeric coercions, the default only stands in for an absent
/// value: a present value that is not a date is always an error.
///
/// # Errors
/// Returns `CoerceError::Date` if a string value does not parse, and
/// `CoerceError::Invalid` for any other present value that is not a date.
pub fn coerce_to_date(
    value: &Value,
    default: Option<&Value>,
) -> Result<Option<DateTime<Local>>, CoerceError> {
    let result = match value {
        Value::Null => return present(default).map_or(Ok(None), |d| coerce_to_date(d, None)),
        Value::Date(d) => Ok(*d),
        Value::Number(ms) => {
            from_timestamp_millis(*ms).ok_or_else(|| CoerceError::invalid(value, DATE_TYPE))
        }
        Value::String(s) => parse_date(s, ParseOptions::default()).map_err(CoerceError::from),
        Value::Bool(_) | Value::Array(_) => Err(CoerceError::invalid(value, DATE_TYPE)),
    };
    if let Err(err) = &result {
        debug!(%err, "date coercion failed");
    }
    result.map(Some)
}

fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null | Value::Date(_) => None,
        Value::Number(n) => (!n.is_nan()).then_some(*n),
        Value::String(s) => parse_float_prefix(s),
        other => parse_float_prefix(&other.to_string()),
    }
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Null | Value::Date(_) => None,
        Value::Number(n) => truncate(*n),
        Value::String(s) => parse_int_prefix(s),
        other => parse_int_prefix(&other.to_string()),
    }
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let prefix = NUMBER_PREFIX.find(s.trim_start())?.as_str();
    if let Some(unsigned) = prefix.strip_suffix("Infinity") {
        return Some(if unsigned == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    prefix.parse().ok()
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    INT_PREFIX.find(s.trim_start())?.as_str().parse().ok()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(n: f64) -> Option<i64> {
    let n = n.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    (n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64).then_some(n as i64)
}

#[allow(clippy::cast_possible_truncation)]
fn from_timestamp_millis(ms: f64) -> Option<DateTime<Local>> {
    if !ms.is_finite() || ms.abs() > MAX_TIMESTAMP_MILLIS {
        return None;
    }
    Local.timestamp_millis_opt(ms.trunc() as i64).single()
}
