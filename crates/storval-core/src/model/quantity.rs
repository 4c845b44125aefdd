//! Resource quantities such as `10Gi`, `500m` or `1e3`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([+-]?)([0-9]+(?:\.[0-9]*)?|\.[0-9]+)((?:[KMGTPE]i)|[numkMGTPE]|[eE][+-]?[0-9]+)?$",
    )
    .expect("quantity pattern is a valid regex")
});

/// Failure to parse a quantity string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid quantity {input:?}: expected a decimal number with an optional SI, binary or exponent suffix")]
pub struct QuantityParseError {
    pub input: String,
}

/// A decimal quantity with an optional SI, binary or exponent suffix
///
/// Equality is textual: `1Gi` and `1024Mi` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuantityRepr", into = "String")]
pub struct Quantity {
    raw: String,
    negative: bool,
}

impl Quantity {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the value is strictly below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }
}

impl FromStr for Quantity {
    type Err = QuantityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = QUANTITY_RE
            .captures(trimmed)
            .ok_or_else(|| QuantityParseError {
                input: s.to_string(),
            })?;
        let sign = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let digits = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let is_zero = digits.chars().all(|c| c == '0' || c == '.');
        Ok(Self {
            raw: trimmed.to_string(),
            negative: sign == "-" && !is_zero,
        })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<Quantity> for String {
    fn from(q: Quantity) -> Self {
        q.raw
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

impl TryFrom<QuantityRepr> for Quantity {
    type Error = QuantityParseError;

    fn try_from(repr: QuantityRepr) -> Result<Self, Self::Error> {
        match repr {
            QuantityRepr::Text(s) => s.parse(),
            QuantityRepr::Int(n) => n.to_string().parse(),
            QuantityRepr::Float(x) => x.to_string().parse(),
        }
    }
}
