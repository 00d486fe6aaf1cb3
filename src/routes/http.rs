//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};

use crate::domain::Difficulty;
use crate::error::GameError;
use crate::protocol::*;
use crate::round::{generate_round, Round};
use crate::scoring::{score, ScoreReport};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { status: "healthy" })
}

/// Missing `difficulty` uses the configured default; an unknown one plays as hard.
fn resolve_difficulty(state: &AppState, raw: Option<&str>) -> Difficulty {
    raw.map(Difficulty::parse_or_hard)
        .unwrap_or(state.config.default_difficulty)
}

fn resolve_count(state: &AppState, raw: Option<i64>) -> usize {
    match raw {
        None => state.config.round_size,
        Some(n) if n <= 0 => 0,
        Some(n) => usize::try_from(n)
            .unwrap_or(usize::MAX)
            .min(state.config.max_round_size),
    }
}

#[instrument(level = "info", skip_all)]
pub async fn http_get_game(
    State(state): State<Arc<AppState>>,
    query: Result<Query<GameQuery>, QueryRejection>,
) -> Result<Json<Round>, GameError> {
    let Query(q) = query.map_err(|e| GameError::MalformedRequest(e.body_text()))?;
    let difficulty = resolve_difficulty(&state, q.difficulty.as_deref());
    let count = resolve_count(&state, q.count);
    let dataset = state.dataset().await;

    let mut rng = state.rng();
    let round = generate_round(&dataset, count, difficulty, &mut rng);
    info!(target: "game", %difficulty, requested = count, served = round.len(), countries = dataset.len(), "HTTP round served");
    Ok(Json(round))
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_validate(
    body: Result<Json<ValidateIn>, JsonRejection>,
) -> Result<Json<ScoreReport>, GameError> {
    let Json(body) = body.map_err(|e| GameError::MalformedRequest(e.body_text()))?;
    let report = score(&body.matches, &body.correct_matches)?;
    info!(target: "game", submitted = body.matches.len(), total = report.total_score, max = report.max_score, "HTTP matches validated");
    Ok(Json(report))
}
