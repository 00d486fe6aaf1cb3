//! GDP Matcher · country matching quiz backend.
//!
//! Loads a static dataset of countries (GDP, flag, top export), serves rounds of
//! independently shuffled columns for the client to match up, and scores the
//! matches the client sends back.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod round;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod telemetry;

pub use config::GameConfig;
pub use routes::build_router;
pub use state::AppState;
