//! Domain entities: seat records and template descriptors

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Seat position key.
pub type Position = i64;

/// Caller data attached to a seat.
pub type Payload = BTreeMap<String, Value>;

/// Build a payload from key/value pairs.
pub fn payload<I, K>(fields: I) -> Payload
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    fields.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// A seat record used to seed a bracket directly.
///
/// Every field other than `position` ends up in the node payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Seat {
    pub fn new(position: Option<Position>, payload: Payload) -> Self {
        Self { position, payload }
    }
}

/// One entry of a bracket template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatDescriptor {
    pub position: Position,
}

/// Template file contents: the seats of a bracket of one size, top-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTemplate {
    pub seats: Vec<SeatDescriptor>,
}

/// Elimination format of a template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    SingleElimination,
    #[default]
    DoubleElimination,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::SingleElimination => "single_elimination",
            Format::DoubleElimination => "double_elimination",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "single_elimination" | "single" => Ok(Format::SingleElimination),
            "double_elimination" | "double" => Ok(Format::DoubleElimination),
            other => Err(format!("unknown bracket format: {other}")),
        }
    }
}
