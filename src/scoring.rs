//! Scoring a client's proposed matches against the answer key it echoes back.
//!
//! One point per field (`gdp`, `flag`, `top_export`) that equals the key exactly:
//! numbers compare numerically, strings verbatim. `max_score` follows the number of
//! submitted countries, not the size of the original round.
//!
//! The answer key comes from the client, so a client can score itself against anything.
//! There is no server-side round registry to check it against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{CountryInfo, Gdp};
use crate::error::GameError;

pub const POINTS_PER_COUNTRY: u32 = 3;

/// A client's guess for one country. Fields left unmatched may be omitted or null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposedMatch {
  #[serde(default)]
  pub gdp: Option<Gdp>,
  #[serde(default)]
  pub flag: Option<String>,
  #[serde(default)]
  pub top_export: Option<String>,
}

impl From<CountryInfo> for ProposedMatch {
  fn from(c: CountryInfo) -> Self {
    Self { gdp: Some(c.gdp), flag: Some(c.flag), top_export: Some(c.top_export) }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
  Correct,
  Incorrect,
}

impl Verdict {
  fn of(ok: bool) -> Self {
    if ok { Verdict::Correct } else { Verdict::Incorrect }
  }

  fn points(self) -> u32 {
    match self {
      Verdict::Correct => 1,
      Verdict::Incorrect => 0,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldFeedback {
  pub gdp: Verdict,
  pub flag: Verdict,
  pub top_export: Verdict,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryFeedback {
  pub score: u32,
  /// Per-field verdicts.
  pub feedback: FieldFeedback,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
  pub total_score: u32,
  pub max_score: u32,
  pub feedback: BTreeMap<String, CountryFeedback>,
}

fn field_matches<T: PartialEq>(proposed: Option<&T>, correct: &T) -> Verdict {
  Verdict::of(proposed.is_some_and(|p| p == correct))
}

fn score_country(proposed: &ProposedMatch, correct: &CountryInfo) -> CountryFeedback {
  let feedback = FieldFeedback {
    gdp: field_matches(proposed.gdp.as_ref(), &correct.gdp),
    flag: field_matches(proposed.flag.as_ref(), &correct.flag),
    top_export: field_matches(proposed.top_export.as_ref(), &correct.top_export),
  };
  let score = feedback.gdp.points() + feedback.flag.points() + feedback.top_export.points();
  CountryFeedback { score, feedback }
}

/// Score every submitted country. A country missing from `correct` makes the whole request malformed.
#[instrument(level = "debug", skip_all, fields(submitted = submitted.len(), key_len = correct.len()))]
pub fn score(
  submitted: &BTreeMap<String, ProposedMatch>,
  correct: &BTreeMap<String, CountryInfo>,
) -> Result<ScoreReport, GameError> {
  let mut report = ScoreReport::default();
  for (country, proposed) in submitted {
    let key = correct.get(country).ok_or_else(|| {
      GameError::MalformedRequest(format!("country '{country}' is not part of the answer key"))
    })?;
    let fb = score_country(proposed, key);
    report.total_score += fb.score;
    report.feedback.insert(country.clone(), fb);
  }
  report.max_score = POINTS_PER_COUNTRY * submitted.len() as u32;
  debug!(target: "scoring", total = report.total_score, max = report.max_score, "Scored submission");
  Ok(report)
}
