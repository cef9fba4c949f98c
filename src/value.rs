use crate::consts::ARRAY_SEPARATOR;
use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loosely-typed input value.
///
/// `Null` is the only absent value: `false`, `0` and `""` are present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    /// A point in time, viewed in the host time zone
    Date(DateTime<Local>),
}

impl Value {
    /// Returns `true` for the absent value
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Truthiness: `Null`, `false`, `0`, `NaN` and `""` are falsy,
    /// every other value (empty arrays included) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => !(n.is_nan() || *n == 0.0),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Date(_) => true,
        }
    }

    /// Returns the items of an array value
    pub const fn as_array(&self) -> Option<&Vec<Self>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the contents of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // -0 prints without its sign
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{ARRAY_SEPARATOR}")?;
                    }
                    if !item.is_null() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
        }
    }
}

macro_rules! from_lossless_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Number(f64::from(n))
                }
            }
        )*
    };
}

from_lossless_number!(i8, i16, i32, u8, u16, u32, f32, f64);

macro_rules! from_wide_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                #[allow(clippy::cast_precision_loss)]
                fn from(n: $t) -> Self {
                    Self::Number(n as f64)
                }
            }
        )*
    };
}

from_wide_number!(i64, u64, isize, usize);

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::String(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<DateTime<Local>> for Value {
    fn from(d: DateTime<Local>) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d.with_timezone(&Local))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Self::Date(d.with_timezone(&Local))
    }
}
