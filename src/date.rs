use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    ParseError,
    consts::{
        DATE_FORMAT_PATTERN, DEFAULT_DAY, DEFAULT_MONTH, MAX_FRACTION_DIGITS, SECONDS_PER_HOUR,
        SECONDS_PER_MINUTE,
    },
    prelude::*,
};

static DATE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DATE_FORMAT_PATTERN).expect("date format pattern is a valid regex")
});

/// Options accepted by [`parse_date`].
///
/// Deserializes from `{"dateOnly": bool, "ignoreTimezone": bool}`, both optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Drop the time of day and any zone designator: the result is local midnight.
    pub date_only: bool,
    /// Read the clock time as local time, whatever zone designator follows it.
    pub ignore_timezone: bool,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            date_only: false,
            ignore_timezone: false,
        }
    }

    #[must_use]
    pub const fn with_date_only(mut self, date_only: bool) -> Self {
        self.date_only = date_only;
        self
    }

    #[must_use]
    pub const fn with_ignore_timezone(mut self, ignore_timezone: bool) -> Self {
        self.ignore_timezone = ignore_timezone;
        self
    }
}

/// Zone designator of a parsed date string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Zone {
    /// No designator: the host's local time
    #[default]
    #[display(fmt = "")]
    Local,
    /// `Z`
    #[display(fmt = "Z")]
    Utc,
    /// Fixed offset east of UTC, in seconds
    #[display(fmt = "{}", "format_offset(*_0)")]
    Offset(i32),
}

fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let hours = abs / SECONDS_PER_HOUR;
    let minutes = abs % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
    format!("{sign}{hours:02}:{minutes:02}")
}

/// Components matched by the date grammar, with absent parts defaulted.
///
/// `Display` renders the canonical `YYYY-MM-DDTHH:MM:SS[.fraction][zone]` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    /// `1..=31`, not checked against the month
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
    pub zone: Zone,
}

impl DateParts {
    /// Applies [`ParseOptions`] to the matched components.
    #[must_use]
    pub const fn with_options(mut self, options: ParseOptions) -> Self {
        if options.date_only {
            self.hour = 0;
            self.minute = 0;
            self.second = 0;
            self.nanosecond = 0;
            self.zone = Zone::Local;
        } else if options.ignore_timezone {
            self.zone = Zone::Local;
        }
        self
    }

    /// Wall-clock date and time. A day past the end of the month rolls
    /// into the following month (`2011-02-31` is `2011-03-03`).
    fn naive(&self) -> Option<NaiveDateTime> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let date = first.checked_add_days(Days::new(u64::from(self.day.checked_sub(1)?)))?;
        let time =
            NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nanosecond)?;
        Some(date.and_time(time))
    }

    /// Resolves to an instant, viewed in the host time zone.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDateTime` if the components name no instant.
    pub fn to_datetime(&self) -> Result<DateTime<Local>, ParseError> {
        let invalid = || ParseError::InvalidDateTime(self.to_string());
        let naive = self.naive().ok_or_else(invalid)?;

        match self.zone {
            // An ambiguous local time (DST fold) resolves to the earlier instant
            Zone::Local => Local.from_local_datetime(&naive).earliest().ok_or_else(invalid),
            Zone::Utc => Ok(Utc.from_utc_datetime(&naive).with_timezone(&Local)),
            Zone::Offset(seconds) => FixedOffset::east_opt(seconds)
                .and_then(|offset| offset.from_local_datetime(&naive).single())
                .map(|d| d.with_timezone(&Local))
                .ok_or_else(invalid),
        }
    }

    fn number(text: &str, caps: &Captures<'_>, name: &str, default: u32) -> Result<u32, ParseError> {
        caps.name(name).map_or(Ok(default), |m| {
            m.as_str()
                .parse()
                .map_err(|_| ParseError::InvalidFormat(text.to_owned()))
        })
    }

    fn fraction(text: &str, caps: &Captures<'_>) -> Result<u32, ParseError> {
        let Some(m) = caps.name("fraction") else {
            return Ok(0);
        };
        // The grammar only admits ASCII digits here, so byte slicing is safe
        let digits = &m.as_str()[..m.as_str().len().min(MAX_FRACTION_DIGITS)];
        format!("{digits:0<MAX_FRACTION_DIGITS$}")
            .parse()
            .map_err(|_| ParseError::InvalidFormat(text.to_owned()))
    }

    fn zone(text: &str, caps: &Captures<'_>) -> Result<Zone, ParseError> {
        if caps.name("utc").is_some() {
            return Ok(Zone::Utc);
        }
        let Some(sign) = caps.name("sign") else {
            return Ok(Zone::Local);
        };
        let hours = Self::number(text, caps, "offset_hour", 0)?;
        let minutes = Self::number(text, caps, "offset_minute", 0)?;
        let seconds = i32::try_from(hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE)
            .map_err(|_| ParseError::InvalidFormat(text.to_owned()))?;

        Ok(Zone::Offset(if sign.as_str() == "-" {
            -seconds
        } else {
            seconds
        }))
    }
}

impl FromStr for DateParts {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(caps) = DATE_FORMAT.captures(s) else {
            debug!(input = s, "text does not match the date grammar");
            return Err(ParseError::InvalidFormat(s.to_owned()));
        };

        let year = caps["year"]
            .parse()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;

        Ok(Self {
            year,
            month: Self::number(s, &caps, "month", DEFAULT_MONTH)?,
            day: Self::number(s, &caps, "day", DEFAULT_DAY)?,
            hour: Self::number(s, &caps, "hour", 0)?,
            minute: Self::number(s, &caps, "minute", 0)?,
            second: Self::number(s, &caps, "second", 0)?,
            nanosecond: Self::fraction(s, &caps)?,
            zone: Self::zone(s, &caps)?,
        })
    }
}

impl std::fmt::Display for DateParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.nanosecond > 0 {
            let fraction = format!("{:09}", self.nanosecond);
            write!(f, ".{}", fraction.trim_end_matches('0'))?;
        }
        write!(f, "{}", self.zone)
    }
}

/// Parses `text` against the fixed date grammar
/// `YYYY[-MM[-DD]][(T| )HH:MM[:SS][.fraction]][Z|(+|-)HH[:MM]]`.
///
/// Missing month and day default to `01`, missing time components to `0`.
/// Without a zone designator the time is local.
///
/// # Errors
/// Returns `ParseError::InvalidFormat` if the text does not match the grammar,
/// `ParseError::InvalidDateTime` if it matches but names no instant.
pub fn parse_date(text: &str, options: ParseOptions) -> Result<DateTime<Local>, ParseError> {
    let parts = text.parse::<DateParts>()?.with_options(options);
    trace!(input = text, canonical = %parts, "parsed date");
    parts.to_datetime()
}
