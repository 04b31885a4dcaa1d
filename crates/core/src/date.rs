//! Calendar date value type.
//!
//! A [`Date`] carries only the year/month/day of a point in time and travels
//! over the wire as a `YYYY-MM-DD` string.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Wire format of a [`Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Failure to read a `YYYY-MM-DD` string.
#[derive(Debug, thiserror::Error)]
pub enum DateParseError {
    /// Not four digits, dash, two digits, dash, two digits.
    #[error("unable to parse the date: expected YYYY-MM-DD, got {0:?}")]
    Shape(String),

    /// Well-formed but names no calendar day.
    #[error("unable to parse the date: {0}")]
    Invalid(#[from] chrono::ParseError),
}

/// A calendar date without time of day or zone.
///
/// The default value is `0001-01-01`, which also stands in for an explicit
/// JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a date from its components, `None` if they name no real day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a strictly zero-padded `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, DateParseError> {
        if !Self::has_wire_shape(value) {
            return Err(DateParseError::Shape(value.to_string()));
        }
        Ok(Self(NaiveDate::parse_from_str(value, DATE_FORMAT)?))
    }

    /// Whether `value` is laid out as `YYYY-MM-DD`, without checking that the
    /// day exists.
    pub fn has_wire_shape(value: &str) -> bool {
        let bytes = value.as_bytes();
        bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
    }

    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl Default for Date {
    fn default() -> Self {
        Self(NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default())
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(DateVisitor)
    }
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
    type Value = Date;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a date string in YYYY-MM-DD form or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Date::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Date::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_str(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Date::parse(value).map_err(E::custom)
    }
}
