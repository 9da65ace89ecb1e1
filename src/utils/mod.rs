//! Project-specific utilities live here.

use chrono::{Local, NaiveDate};
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

/// Source of "today" for loan and return dates.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Integer given as a JSON number or a numeric string (`4`, `"4"`, `" 4 "`).
///
/// Anything else, or a value outside the target range, is a decoding error.
pub fn integer_or_numeric_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let raw = Value::deserialize(deserializer)?;
    parse_integer(&raw).ok_or_else(|| D::Error::custom(format!("expected an integer, got {raw}")))
}

/// Optional flavour of [`integer_or_numeric_string`]; `null` reads as absent.
pub fn optional_integer_or_numeric_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => parse_integer(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {raw}"))),
    }
}

fn parse_integer<T: TryFrom<i64>>(raw: &Value) -> Option<T> {
    let value = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    T::try_from(value).ok()
}
