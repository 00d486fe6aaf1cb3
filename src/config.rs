//! Game configuration: defaults, optional TOML file, environment overrides.
//!
//! Precedence (lowest to highest): built-in defaults, the TOML file named by
//! GAME_CONFIG_PATH, then individual environment variables.
//!
//! ```toml
//! data_files = ["data/game_data_with_flags.json"]
//! round_size = 5
//! max_round_size = 20
//! default_difficulty = "medium"
//! static_dir = "./static"
//! preload = true
//! # rng_seed = 42
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::Difficulty;

pub const DEFAULT_DATA_FILE: &str = "data/game_data_with_flags.json";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
  /// Candidate data files, tried in order.
  pub data_files: Vec<PathBuf>,
  /// Countries per round when the request does not ask for a count.
  pub round_size: usize,
  /// Upper bound on a requested count.
  pub max_round_size: usize,
  /// Tier used when the request carries no `difficulty`.
  pub default_difficulty: Difficulty,
  pub static_dir: PathBuf,
  /// Load the dataset at startup instead of on the first request.
  pub preload: bool,
  /// Fixed seed for every round; only useful for demos and tests.
  pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      data_files: vec![PathBuf::from(DEFAULT_DATA_FILE)],
      round_size: 5,
      max_round_size: 20,
      default_difficulty: Difficulty::Medium,
      static_dir: PathBuf::from("./static"),
      preload: true,
      rng_seed: None,
    }
  }
}

impl GameConfig {
  /// Defaults, then GAME_CONFIG_PATH (if set and valid), then env overrides.
  pub fn from_env() -> Self {
    let mut cfg = load_toml_from_env().unwrap_or_default();
    cfg.apply_env(|key| std::env::var(key).ok());
    info!(
      target: "gdp_matcher",
      data_files = ?cfg.data_files,
      round_size = cfg.round_size,
      default_difficulty = %cfg.default_difficulty,
      seeded = cfg.rng_seed.is_some(),
      "Game configuration resolved"
    );
    cfg
  }

  /// Apply overrides from a key lookup. Unparseable values are logged and ignored.
  pub fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, get: F) {
    if let Some(path) = get("DATA_FILE").filter(|s| !s.is_empty()) {
      // Explicit file goes first; the configured candidates remain as fallbacks.
      self.data_files.retain(|p| p.as_os_str() != path.as_str());
      self.data_files.insert(0, PathBuf::from(path));
    }
    if let Some(v) = get("ROUND_SIZE") {
      match v.parse::<usize>() {
        Ok(n) => self.round_size = n,
        Err(e) => warn!(target: "gdp_matcher", value = %v, error = %e, "Ignoring invalid ROUND_SIZE"),
      }
    }
    if let Some(v) = get("DEFAULT_DIFFICULTY") {
      self.default_difficulty = Difficulty::parse_or_hard(&v);
    }
    if let Some(v) = get("STATIC_DIR") {
      self.static_dir = PathBuf::from(v);
    }
    if let Some(v) = get("GAME_RNG_SEED") {
      match v.parse::<u64>() {
        Ok(seed) => self.rng_seed = Some(seed),
        Err(e) => warn!(target: "gdp_matcher", value = %v, error = %e, "Ignoring invalid GAME_RNG_SEED"),
      }
    }
    if self.max_round_size < self.round_size {
      self.max_round_size = self.round_size;
    }
  }
}

/// Attempt to load `GameConfig` from GAME_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_toml_from_env() -> Option<GameConfig> {
  let path = std::env::var("GAME_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GameConfig>(&s) {
      Ok(cfg) => {
        info!(target: "gdp_matcher", %path, "Loaded game config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "gdp_matcher", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "gdp_matcher", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  #[test]
  fn toml_fills_missing_fields_with_defaults() {
    let cfg: GameConfig = toml::from_str("round_size = 8\ndefault_difficulty = \"easy\"").unwrap();
    assert_eq!(cfg.round_size, 8);
    assert_eq!(cfg.default_difficulty, Difficulty::Easy);
    assert_eq!(cfg.data_files, vec![PathBuf::from(DEFAULT_DATA_FILE)]);
    assert!(cfg.rng_seed.is_none());
  }

  #[test]
  fn env_overrides_take_precedence() {
    let env = HashMap::from([
      ("DATA_FILE", "/srv/countries.json"),
      ("ROUND_SIZE", "30"),
      ("GAME_RNG_SEED", "not-a-number"),
      ("DEFAULT_DIFFICULTY", "hard"),
    ]);
    let mut cfg = GameConfig::default();
    cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));

    assert_eq!(cfg.data_files[0], PathBuf::from("/srv/countries.json"));
    assert_eq!(cfg.data_files.len(), 2);
    assert_eq!(cfg.round_size, 30);
    assert_eq!(cfg.max_round_size, 30);
    assert_eq!(cfg.default_difficulty, Difficulty::Hard);
    assert!(cfg.rng_seed.is_none());
  }
}
