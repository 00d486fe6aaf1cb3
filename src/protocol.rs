//! Public HTTP request/response DTOs (serde ready).
//! `Round` and `ScoreReport` are served as they are; only the envelopes live here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::CountryInfo;
use crate::scoring::ProposedMatch;

#[derive(Debug, Default, Deserialize)]
pub struct GameQuery {
    pub difficulty: Option<String>,
    /// Countries in the round; negative values give an empty round.
    pub count: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateIn {
    pub matches: BTreeMap<String, ProposedMatch>,
    pub correct_matches: BTreeMap<String, CountryInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}
