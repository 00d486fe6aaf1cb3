use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use gdp_matcher::dataset::parse_records;
use gdp_matcher::{build_router, AppState, GameConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const DATA: &str = r#"[
    {"country": "Giantland", "GDP": 900000000000, "flag_url": "https://flags/g.png", "top_export": "Cars"},
    {"country": "Midland", "GDP": 50000000000, "flag_url": "https://flags/m.png", "top_export": "Fish"},
    {"country": "Smallland", "GDP": 2000000000, "flag_url": "https://flags/s.png", "top_export": "Wool"},
    {"country": "Mystery", "flag_url": "https://flags/x.png"}
]"#;

fn app_with(data: &str, config: GameConfig) -> Router {
    let dataset = parse_records(data.as_bytes()).expect("test data should parse");
    build_router(Arc::new(AppState::with_dataset(config, dataset)))
}

fn app() -> Router {
    app_with(DATA, GameConfig::default())
}

async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn names(v: &Value) -> BTreeSet<String> {
    v.as_array()
        .expect("array")
        .iter()
        .map(|c| c.as_str().expect("string").to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = send(app(), Method::GET, "/api/health", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn missing_difficulty_plays_medium() {
    let (status, body) = send(app(), Method::GET, "/api/game", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&body["countries"]),
        BTreeSet::from(["Giantland".to_string(), "Midland".to_string()])
    );
    assert_eq!(body["gdps"].as_array().unwrap().len(), 2);
    assert_eq!(body["correct_matches"]["Giantland"]["gdp"], json!(900000000000_u64));
}

#[tokio::test]
async fn each_tier_filters_the_pool() {
    let (_, easy) = send(app(), Method::GET, "/api/game?difficulty=easy", Body::empty()).await;
    assert_eq!(names(&easy["countries"]), BTreeSet::from(["Giantland".to_string()]));

    let (_, hard) = send(app(), Method::GET, "/api/game?difficulty=hard", Body::empty()).await;
    assert_eq!(names(&hard["countries"]).len(), 4);
    assert_eq!(hard["correct_matches"]["Mystery"]["gdp"], "N/A");
    assert_eq!(hard["correct_matches"]["Mystery"]["top_export"], "N/A");

    // Unknown tiers play without a filter.
    let (status, odd) = send(app(), Method::GET, "/api/game?difficulty=legendary", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&odd["countries"]).len(), 4);
}

#[tokio::test]
async fn count_is_capped_and_non_positive_is_empty() {
    let (_, two) = send(app(), Method::GET, "/api/game?difficulty=hard&count=2", Body::empty()).await;
    assert_eq!(two["countries"].as_array().unwrap().len(), 2);
    assert_eq!(two["correct_matches"].as_object().unwrap().len(), 2);

    let (_, none) = send(app(), Method::GET, "/api/game?difficulty=hard&count=-3", Body::empty()).await;
    assert_eq!(none["countries"], json!([]));
    assert_eq!(none["correct_matches"], json!({}));

    let (status, _) = send(app(), Method::GET, "/api/game?count=lots", Body::empty()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_dataset_serves_empty_round() {
    let (status, body) = send(app_with("[]", GameConfig::default()), Method::GET, "/api/game", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"countries": [], "gdps": [], "flags": [], "exports": [], "correct_matches": {}})
    );
}

#[tokio::test]
async fn unreadable_data_file_still_serves() {
    let config = GameConfig { data_files: vec!["/definitely/not/here.json".into()], ..GameConfig::default() };
    let app = build_router(Arc::new(AppState::new(config)));
    let (status, body) = send(app, Method::GET, "/api/game?difficulty=easy", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countries"], json!([]));
}

#[tokio::test]
async fn round_key_scores_perfectly_when_echoed() {
    let (_, round) = send(app(), Method::GET, "/api/game?difficulty=hard", Body::empty()).await;
    let key = round["correct_matches"].clone();
    let body = json!({"matches": key, "correct_matches": key});
    let (status, report) = send(app(), Method::POST, "/api/validate_matches", Body::from(body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_score"], 12);
    assert_eq!(report["max_score"], 12);
}

#[tokio::test]
async fn validate_reports_per_field_feedback() {
    let body = json!({
        "matches": {"A": {"gdp": 100, "flag": "wrong", "top_export": "x"}},
        "correct_matches": {"A": {"gdp": 100, "flag": "fa", "top_export": "x"}}
    });
    let (status, report) = send(app(), Method::POST, "/api/validate_matches", Body::from(body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        report,
        json!({
            "total_score": 2,
            "max_score": 3,
            "feedback": {"A": {"score": 2, "feedback": {"gdp": "correct", "flag": "incorrect", "top_export": "correct"}}}
        })
    );
}

#[tokio::test]
async fn malformed_requests_are_client_errors() {
    let unknown = json!({
        "matches": {"Atlantis": {"gdp": 1, "flag": "f", "top_export": "x"}},
        "correct_matches": {"A": {"gdp": 100, "flag": "fa", "top_export": "x"}}
    });
    let (status, body) = send(app(), Method::POST, "/api/validate_matches", Body::from(unknown.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));

    let (status, body) = send(app(), Method::POST, "/api/validate_matches", Body::from("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let missing_key = json!({"matches": {}});
    let (status, _) = send(app(), Method::POST, "/api/validate_matches", Body::from(missing_key.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seeded_config_repeats_rounds() {
    let config = GameConfig { rng_seed: Some(17), ..GameConfig::default() };
    let (_, a) = send(app_with(DATA, config.clone()), Method::GET, "/api/game?difficulty=hard", Body::empty()).await;
    let (_, b) = send(app_with(DATA, config), Method::GET, "/api/game?difficulty=hard", Body::empty()).await;
    assert_eq!(a, b);
}
