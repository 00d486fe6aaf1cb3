//! Domain models used by the backend: GDP values, country attributes, difficulty tiers and the dataset.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Placeholder used when a record carries no usable GDP or export.
pub const NOT_AVAILABLE: &str = "N/A";

/// A GDP figure as it appears in the data file: a number, or a text label such as `"N/A"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Gdp {
  Amount(Number),
  Label(String),
}

impl Gdp {
  pub fn not_available() -> Self { Gdp::Label(NOT_AVAILABLE.into()) }

  /// Normalize any JSON value read from the data file.
  /// Numbers and strings are kept; null, bools, arrays and objects become `"N/A"`.
  pub fn from_value(v: Value) -> Self {
    match v {
      Value::Number(n) => Gdp::Amount(n),
      Value::String(s) => Gdp::Label(s),
      _ => Gdp::not_available(),
    }
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Gdp::Amount(n) => n.as_f64(),
      Gdp::Label(_) => None,
    }
  }
}

// Numbers compare numerically (100 == 100.0), labels verbatim, never across kinds.
impl PartialEq for Gdp {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Gdp::Amount(a), Gdp::Amount(b)) => match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => match (a.as_u64(), b.as_u64()) {
          (Some(x), Some(y)) => x == y,
          _ => a.as_f64() == b.as_f64(),
        },
      },
      (Gdp::Label(a), Gdp::Label(b)) => a == b,
      _ => false,
    }
  }
}

impl From<u64> for Gdp {
  fn from(v: u64) -> Self { Gdp::Amount(v.into()) }
}

impl From<&str> for Gdp {
  fn from(v: &str) -> Self { Gdp::Label(v.to_string()) }
}

impl fmt::Display for Gdp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Gdp::Amount(n) => write!(f, "{n}"),
      Gdp::Label(s) => f.write_str(s),
    }
  }
}

/// Attributes of one country, as served in the answer key and echoed back by clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
  pub gdp: Gdp,
  pub flag: String,
  pub top_export: String,
}

/// Difficulty tier gating which countries may appear in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  /// Parse a tier name. Anything unrecognized plays as `Hard` (no filter).
  pub fn parse_or_hard(s: &str) -> Self {
    match s.trim().to_ascii_lowercase().as_str() {
      "easy" => Difficulty::Easy,
      "medium" => Difficulty::Medium,
      _ => Difficulty::Hard,
    }
  }

  /// Exclusive lower bound on GDP for the tier; `None` means every record is eligible.
  pub fn min_gdp(self) -> Option<f64> {
    match self {
      Difficulty::Easy => Some(500_000_000_000.0),
      Difficulty::Medium => Some(10_000_000_000.0),
      Difficulty::Hard => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

impl Default for Difficulty {
  fn default() -> Self { Difficulty::Medium }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Country name -> attributes. Built once, read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
  countries: HashMap<String, CountryInfo>,
}

impl Dataset {
  pub fn new() -> Self { Self::default() }

  /// Insert or overwrite; a later record with the same name replaces the earlier one.
  pub fn insert(&mut self, name: impl Into<String>, info: CountryInfo) {
    self.countries.insert(name.into(), info);
  }

  pub fn get(&self, name: &str) -> Option<&CountryInfo> { self.countries.get(name) }

  pub fn contains(&self, name: &str) -> bool { self.countries.contains_key(name) }

  pub fn len(&self) -> usize { self.countries.len() }

  pub fn is_empty(&self) -> bool { self.countries.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &CountryInfo)> { self.countries.iter() }
}

impl FromIterator<(String, CountryInfo)> for Dataset {
  fn from_iter<I: IntoIterator<Item = (String, CountryInfo)>>(iter: I) -> Self {
    Self { countries: iter.into_iter().collect() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gdp_compares_numbers_numerically_and_labels_verbatim() {
    let int: Gdp = serde_json::from_str("100").unwrap();
    let float: Gdp = serde_json::from_str("100.0").unwrap();
    assert_eq!(int, float);
    assert_ne!(Gdp::from(100_u64), Gdp::from("100"));
    assert_eq!(Gdp::not_available(), Gdp::from("N/A"));
    assert_ne!(Gdp::from("n/a"), Gdp::from("N/A"));
  }

  #[test]
  fn integer_gdp_serializes_without_fraction() {
    let s = serde_json::to_string(&Gdp::from(25_462_700_000_000_u64)).unwrap();
    assert_eq!(s, "25462700000000");
  }

  #[test]
  fn unknown_tier_plays_as_hard() {
    assert_eq!(Difficulty::parse_or_hard("EASY"), Difficulty::Easy);
    assert_eq!(Difficulty::parse_or_hard("medium"), Difficulty::Medium);
    assert_eq!(Difficulty::parse_or_hard("impossible"), Difficulty::Hard);
    assert_eq!(Difficulty::parse_or_hard(""), Difficulty::Hard);
    assert!(Difficulty::Hard.min_gdp().is_none());
  }
}
