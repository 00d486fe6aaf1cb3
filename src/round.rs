//! Round generation: difficulty filtering, sampling and the four independent shuffles.
//!
//! Flow:
//! 1) Keep the countries whose GDP clears the tier threshold (the pool).
//! 2) Draw `min(count, pool)` distinct countries uniformly at random.
//! 3) Build the countries/gdps/flags/exports columns from the drawn set.
//! 4) Shuffle every column on its own, so position `i` in one column says
//!    nothing about position `i` in another.
//!
//! The random source is a parameter; handlers pass a fresh `StdRng`, tests a seeded one.

use std::collections::BTreeMap;

use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{CountryInfo, Dataset, Difficulty, Gdp};

/// One game instance: four shuffled columns plus the answer key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Round {
  pub countries: Vec<String>,
  pub gdps: Vec<Gdp>,
  pub flags: Vec<String>,
  pub exports: Vec<String>,
  pub correct_matches: BTreeMap<String, CountryInfo>,
}

impl Round {
  pub fn len(&self) -> usize { self.countries.len() }

  pub fn is_empty(&self) -> bool { self.countries.is_empty() }
}

/// Subset of `dataset` eligible for `tier`. Records without a numeric GDP only survive `Hard`.
pub fn filter_by_difficulty(dataset: &Dataset, tier: Difficulty) -> Dataset {
  let Some(min) = tier.min_gdp() else {
    return dataset.clone();
  };
  dataset
    .iter()
    .filter(|(_, info)| info.gdp.as_f64().is_some_and(|gdp| gdp > min))
    .map(|(name, info)| (name.clone(), info.clone()))
    .collect()
}

/// Build a round of up to `count` countries. An empty pool or `count == 0` yields an empty round.
#[instrument(level = "debug", skip(dataset, rng), fields(dataset_len = dataset.len()))]
pub fn generate_round<R: Rng + ?Sized>(dataset: &Dataset, count: usize, tier: Difficulty, rng: &mut R) -> Round {
  let pool = filter_by_difficulty(dataset, tier);

  // Sorted so a seeded rng gives the same draw regardless of map iteration order.
  let mut names: Vec<&String> = pool.iter().map(|(name, _)| name).collect();
  names.sort();

  let amount = count.min(names.len());
  if amount == 0 {
    debug!(target: "round", pool = names.len(), count, "Empty round");
    return Round::default();
  }

  let drawn: Vec<(&String, &CountryInfo)> = index::sample(rng, names.len(), amount)
    .into_iter()
    .filter_map(|i| pool.get(names[i]).map(|info| (names[i], info)))
    .collect();

  let mut countries: Vec<String> = drawn.iter().map(|(name, _)| (*name).clone()).collect();
  let mut gdps: Vec<Gdp> = drawn.iter().map(|(_, info)| info.gdp.clone()).collect();
  let mut flags: Vec<String> = drawn.iter().map(|(_, info)| info.flag.clone()).collect();
  let mut exports: Vec<String> = drawn.iter().map(|(_, info)| info.top_export.clone()).collect();

  countries.shuffle(rng);
  gdps.shuffle(rng);
  flags.shuffle(rng);
  exports.shuffle(rng);

  let correct_matches = drawn
    .into_iter()
    .map(|(name, info)| (name.clone(), info.clone()))
    .collect();

  debug!(target: "round", pool = names.len(), drawn = amount, "Round generated");
  Round { countries, gdps, flags, exports, correct_matches }
}
