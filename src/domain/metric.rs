//! Known-or-unknown metric values
//!
//! Some sensors do not exist on some hardware. `Metric` keeps that
//! distinction explicit instead of collapsing it into a sentinel number.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker emitted in place of a value the platform does not expose
pub const UNKNOWN_MARKER: &str = "N/A";

/// A telemetry value that is either known or unavailable
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Metric<T> {
    /// Reported by the underlying tool
    Known(T),
    /// Not exposed on this platform, or unparseable
    #[default]
    Unknown,
}

impl<T> Metric<T> {
    /// Convert into an `Option`
    pub fn known(self) -> Option<T> {
        match self {
            Metric::Known(v) => Some(v),
            Metric::Unknown => None,
        }
    }
}

impl<T: FromStr> Metric<T> {
    /// Parse a raw tool field, yielding `Unknown` for anything non-numeric
    /// (`[N/A]`, `[Not Supported]`, empty)
    pub fn parse_field(raw: &str) -> Self {
        raw.trim().parse().map(Metric::Known).unwrap_or(Metric::Unknown)
    }
}

impl<T: fmt::Display> fmt::Display for Metric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Known(v) => write!(f, "{}", v),
            Metric::Unknown => f.write_str(UNKNOWN_MARKER),
        }
    }
}

impl<T: Serialize> Serialize for Metric<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Known(v) => v.serialize(serializer),
            Metric::Unknown => serializer.serialize_str(UNKNOWN_MARKER),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Metric<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Value(T),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Value(v) => Ok(Metric::Known(v)),
            Raw::Marker(s) if s == UNKNOWN_MARKER => Ok(Metric::Unknown),
            Raw::Marker(s) => Err(de::Error::custom(format!(
                "expected a number or \"{}\", got \"{}\"",
                UNKNOWN_MARKER, s
            ))),
        }
    }
}
