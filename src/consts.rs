/// Fixed date/time grammar:
/// `YYYY[-MM[-DD]][(T| )HH[:]MM[[:]SS][.fraction]][Z|(+|-)HH[[:]MM]]`
///
/// Every separator is optional. Day-of-month is only checked against `01..=31`.
pub const DATE_FORMAT_PATTERN: &str = concat!(
    r"^(?<year>[0-9]{4})-?(?<month>0[1-9]|1[012])?-?(?<day>[123]0|[012][1-9]|31)?",
    r"(?:[T ]?(?<hour>[01][0-9]|2[0-3]):?(?<minute>[0-5][0-9]):?(?<second>[0-5][0-9])?",
    r"(?:\.(?<fraction>[0-9]+))?",
    r"(?:(?<utc>Z)|(?:(?<sign>[+-])(?<offset_hour>[01][0-9]|2[0-3]):?(?<offset_minute>[0-5][0-9])?))?)?$",
);

/// Leading numeric prefix accepted by number coercion (after leading whitespace)
pub(crate) const NUMBER_PREFIX_PATTERN: &str =
    r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)";

/// Leading integer prefix accepted by integer coercion (after leading whitespace)
pub(crate) const INT_PREFIX_PATTERN: &str = r"^[+-]?[0-9]+";

/// A separator run followed by the character that starts the next word
pub(crate) const WORD_BOUNDARY_PATTERN: &str = r"[^A-Za-z0-9]+([A-Za-z0-9])";

/// Month used when the input names only a year
pub const DEFAULT_MONTH: u32 = 1;
/// Day used when the input names no day
pub const DEFAULT_DAY: u32 = 1;

/// Fraction digits kept when parsing (nanosecond precision)
pub const MAX_FRACTION_DIGITS: usize = 9;

pub(crate) const SECONDS_PER_MINUTE: u32 = 60;
pub(crate) const SECONDS_PER_HOUR: u32 = 3600;

/// Largest absolute epoch offset, in milliseconds, a timestamp may carry
/// (100 000 000 days either side of 1970-01-01)
pub const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

/// Separator used when an array is converted to a string
pub const ARRAY_SEPARATOR: char = ',';

/// Target type name reported by [`crate::CoerceError::Invalid`] for numbers
pub const NUMBER_TYPE: &str = "number";
/// Target type name reported by [`crate::CoerceError::Invalid`] for integers
pub const INTEGER_TYPE: &str = "integer";
/// Target type name reported by [`crate::CoerceError::Invalid`] for dates
pub const DATE_TYPE: &str = "date";
