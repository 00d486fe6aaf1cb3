//! Loading the country dataset from its JSON file.
//!
//! The file is an array of objects with keys `country`, `GDP`, `flag_url`, `top_export`.
//! Loading never fails towards callers: `load` logs the problem and hands back an
//! empty dataset so the game keeps serving (empty) rounds.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::{CountryInfo, Dataset, Gdp, NOT_AVAILABLE};
use crate::error::GameError;

/// One element of the data file. Every field is optional; extraction rules live in `into_entry`.
#[derive(Debug, Deserialize)]
struct RawRecord {
  #[serde(default)]
  country: Option<Value>,
  #[serde(default, rename = "GDP")]
  gdp: Option<Value>,
  #[serde(default)]
  flag_url: Option<Value>,
  #[serde(default)]
  top_export: Option<Value>,
}

impl RawRecord {
  fn into_entry(self) -> Option<(String, CountryInfo)> {
    let name = match self.country? {
      Value::String(s) => s,
      _ => return None,
    };
    let info = CountryInfo {
      gdp: self.gdp.map(Gdp::from_value).unwrap_or_else(Gdp::not_available),
      flag: text_or(self.flag_url, ""),
      top_export: text_or(self.top_export, NOT_AVAILABLE),
    };
    Some((name, info))
  }
}

fn text_or(v: Option<Value>, fallback: &str) -> String {
  match v {
    Some(Value::String(s)) => s,
    _ => fallback.to_string(),
  }
}

/// Parse the raw file contents. Elements without a string `country` are dropped;
/// a repeated country name keeps its last occurrence.
pub fn parse_records(bytes: &[u8]) -> Result<Dataset, GameError> {
  let items: Vec<Value> = serde_json::from_slice(bytes)?;
  let total = items.len();
  let mut dataset = Dataset::new();
  for (idx, item) in items.into_iter().enumerate() {
    match serde_json::from_value::<RawRecord>(item).ok().and_then(RawRecord::into_entry) {
      Some((name, info)) => dataset.insert(name, info),
      None => debug!(target: "dataset", idx, "Dropping record without a country name"),
    }
  }
  debug!(target: "dataset", total, kept = dataset.len(), "Parsed country records");
  Ok(dataset)
}

#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn load_from_path(path: &Path) -> Result<Dataset, GameError> {
  let bytes = tokio::fs::read(path).await?;
  parse_records(&bytes)
}

/// Try each candidate path in order and return the first dataset that loads.
/// When none does, report `DataUnavailable` in the logs and return an empty dataset.
#[instrument(level = "info", skip_all, fields(candidates = paths.len()))]
pub async fn load(paths: &[PathBuf]) -> Dataset {
  let mut last_err = None;
  for path in paths {
    match load_from_path(path).await {
      Ok(dataset) => {
        info!(target: "dataset", path = %path.display(), countries = dataset.len(), "Loaded country data");
        return dataset;
      }
      Err(e) => {
        warn!(target: "dataset", path = %path.display(), error = %e, "Could not load country data");
        last_err = Some(e);
      }
    }
  }

  let err = GameError::DataUnavailable(
    last_err.map(|e| e.to_string()).unwrap_or_else(|| "no data file configured".into()),
  );
  error!(target: "dataset", error = %err, "Serving an empty dataset");
  log_directory_contents(Path::new(".")).await;
  log_directory_contents(Path::new("data")).await;
  Dataset::new()
}

/// Deployment aid: list what the process can actually see when the data file is missing.
async fn log_directory_contents(dir: &Path) {
  let mut entries = match tokio::fs::read_dir(dir).await {
    Ok(e) => e,
    Err(e) => {
      debug!(target: "dataset", dir = %dir.display(), error = %e, "Cannot list directory");
      return;
    }
  };
  let mut names = Vec::new();
  while let Ok(Some(entry)) = entries.next_entry().await {
    names.push(entry.file_name().to_string_lossy().into_owned());
  }
  names.sort();
  info!(target: "dataset", dir = %dir.display(), entries = ?names, "Directory contents");
}
