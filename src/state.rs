//! Application state: configuration, the shared read-only dataset and the random source.
//!
//! The dataset is loaded at most once. Concurrent first requests wait on the same
//! initialization through `OnceCell`, then share the immutable `Arc<Dataset>`.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

use crate::config::GameConfig;
use crate::dataset;
use crate::domain::Dataset;

pub struct AppState {
    pub config: GameConfig,
    dataset: OnceCell<Arc<Dataset>>,
}

impl AppState {
    /// State whose dataset is read from `config.data_files` on first use.
    pub fn new(config: GameConfig) -> Self {
        Self { config, dataset: OnceCell::new() }
    }

    /// State around an already-built dataset (tests, embedding).
    pub fn with_dataset(config: GameConfig, dataset: Dataset) -> Self {
        Self { config, dataset: OnceCell::new_with(Some(Arc::new(dataset))) }
    }

    /// The dataset, loading it if this is the first access.
    /// Load failures leave an empty dataset in place; they are not retried.
    pub async fn dataset(&self) -> Arc<Dataset> {
        self.dataset
            .get_or_init(|| async {
                let ds = dataset::load(&self.config.data_files).await;
                Arc::new(ds)
            })
            .await
            .clone()
    }

    #[instrument(level = "info", skip(self))]
    pub async fn preload(&self) {
        let ds = self.dataset().await;
        info!(target: "gdp_matcher", countries = ds.len(), "Dataset ready");
    }

    /// Fresh random source for one request: seeded from config when set, otherwise from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
