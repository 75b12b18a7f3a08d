// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use axum::{Router, http::StatusCode};
use epica_api::{ANALYSIS_FAILED_TEXT, AnalysisResponse, DisabledNarrativeClient, StatsResponse};
use epica_domain::Money;
use epica_persistence::Persistence;

use super::helpers::{create_editions, create_test_app_state, read_json, send};
use crate::routes::build_router;
use crate::state::AppState;

async fn seed(app: &Router) {
    create_editions(app).await;
    for (edition, kind, amount) in [
        ("2024", "ENTRATA", 100),
        ("2025", "ENTRATA", 250),
        ("2025", "USCITA", 75),
    ] {
        let response = send(
            app,
            "POST",
            "/transactions",
            Some(serde_json::json!({
                "edition": edition,
                "type": kind,
                "description": "Movimento",
                "amount": amount
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    send(
        app,
        "POST",
        "/participants",
        Some(serde_json::json!({
            "edition": "2025",
            "nome": "Mario",
            "cognome": "Rossi",
            "ebike": true
        })),
    )
    .await;
}

#[tokio::test]
async fn test_stats_by_edition() {
    let app: Router = build_router(create_test_app_state());
    seed(&app).await;

    let response = send(&app, "GET", "/stats?edition=2025", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let stats: StatsResponse = read_json(response).await;
    assert_eq!(stats.stats.total_income, Money::from_cents(25_000));
    assert_eq!(stats.stats.total_expense, Money::from_cents(7_500));
    assert_eq!(stats.stats.net_balance, Money::from_cents(17_500));
    assert_eq!(stats.stats.cash_income, Money::from_cents(25_000));
    assert_eq!(stats.stats.participants_count, 1);
    assert_eq!(stats.stats.total_ebikes, 1);
}

#[tokio::test]
async fn test_stats_for_all_editions() {
    let app: Router = build_router(create_test_app_state());
    seed(&app).await;

    let stats: StatsResponse = read_json(send(&app, "GET", "/stats?edition=all", None).await).await;

    assert_eq!(stats.stats.total_income, Money::from_cents(35_000));
    assert_eq!(stats.chart[0].value, Money::from_cents(35_000));
    assert_eq!(stats.chart[1].value, Money::from_cents(7_500));
}

#[tokio::test]
async fn test_analysis_uses_backend() {
    let app: Router = build_router(create_test_app_state());
    seed(&app).await;

    let response = send(&app, "POST", "/stats/analysis?edition=2025", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let analysis: AnalysisResponse = read_json(response).await;
    assert_eq!(analysis.text, "Andamento positivo.");
    assert!(analysis.available);
}

#[tokio::test]
async fn test_analysis_without_backend_falls_back() {
    let app_state: AppState = AppState::new(
        Persistence::new_in_memory().unwrap(),
        Arc::new(DisabledNarrativeClient),
        "Staff",
    );
    let app: Router = build_router(app_state);

    let analysis: AnalysisResponse =
        read_json(send(&app, "POST", "/stats/analysis", None).await).await;

    assert_eq!(analysis.text, ANALYSIS_FAILED_TEXT);
    assert!(!analysis.available);
}

#[tokio::test]
async fn test_analysis_rejected_while_another_runs() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());

    let _guard = app_state.analysis_busy.try_acquire().unwrap();
    let response = send(&app, "POST", "/stats/analysis", None).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
