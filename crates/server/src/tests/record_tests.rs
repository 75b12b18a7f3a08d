// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use epica_api::{
    CONFIRM_DELETE_TRANSACTION, ListEditionsResponse, ListParticipantsResponse,
    ListTransactionsResponse, ParticipantResponse, RecordTransactionResponse,
};
use epica_domain::{BusRoute, EditionId, Money, SourceType};

use super::helpers::{
    STAFF_MEMBER, create_editions, create_test_app_state, read_json, read_text, send,
};
use crate::error::ErrorResponse;
use crate::routes::build_router;

#[tokio::test]
async fn test_list_editions_empty() {
    let app: Router = build_router(create_test_app_state());

    let response = send(&app, "GET", "/editions", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let listed: ListEditionsResponse = read_json(response).await;
    assert!(listed.editions.is_empty());
}

#[tokio::test]
async fn test_duplicate_edition_is_unprocessable() {
    let app: Router = build_router(create_test_app_state());
    create_editions(&app).await;

    let response = send(
        &app,
        "POST",
        "/editions",
        Some(serde_json::json!({ "year": "2025", "name": "Again" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_record_transaction_with_form_defaults() {
    let app: Router = build_router(create_test_app_state());
    create_editions(&app).await;

    let response = send(
        &app,
        "POST",
        "/transactions",
        Some(serde_json::json!({
            "edition": "all",
            "type": "ENTRATA",
            "description": "Quota iscrizione",
            "amount": "45,50"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let created: RecordTransactionResponse = read_json(response).await;
    assert_eq!(created.transaction.edition_id, EditionId::new("2024"));
    assert_eq!(created.transaction.details.source, SourceType::Cash);
    assert_eq!(created.transaction.details.person, STAFF_MEMBER);
    assert_eq!(created.transaction.details.amount, Money::from_cents(4550));
}

#[tokio::test]
async fn test_list_transactions_by_edition() {
    let app: Router = build_router(create_test_app_state());
    create_editions(&app).await;
    for (edition, amount) in [("2024", 10), ("2025", 20)] {
        let response = send(
            &app,
            "POST",
            "/transactions",
            Some(serde_json::json!({
                "edition": edition,
                "date": "2025-04-01",
                "type": "USCITA",
                "source": "ENDU",
                "person": "Marco",
                "description": "Noleggio",
                "amount": amount
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(&app, "GET", "/transactions?edition=2025", None).await;
    let listed: ListTransactionsResponse = read_json(response).await;
    assert_eq!(listed.transactions.len(), 1);
    assert_eq!(listed.transactions[0].details.amount, Money::from_cents(2000));

    let response = send(&app, "GET", "/transactions", None).await;
    let listed: ListTransactionsResponse = read_json(response).await;
    assert_eq!(listed.transactions.len(), 2);
}

#[tokio::test]
async fn test_record_transaction_without_editions_is_unprocessable() {
    let app: Router = build_router(create_test_app_state());

    let response = send(
        &app,
        "POST",
        "/transactions",
        Some(serde_json::json!({
            "type": "ENTRATA",
            "description": "Quota",
            "amount": 10
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let app: Router = build_router(create_test_app_state());
    create_editions(&app).await;
    let created: RecordTransactionResponse = read_json(
        send(
            &app,
            "POST",
            "/transactions",
            Some(serde_json::json!({
                "edition": "2025",
                "type": "ENTRATA",
                "description": "Quota",
                "amount": 10
            })),
        )
        .await,
    )
    .await;
    let uri: String = format!("/transactions/{}", created.transaction.id);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.message, CONFIRM_DELETE_TRANSACTION);

    let response = send(&app, "DELETE", &format!("{uri}?confirm=true"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "DELETE", &format!("{uri}?confirm=true"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_and_patch_participant() {
    let app: Router = build_router(create_test_app_state());
    create_editions(&app).await;

    let response = send(
        &app,
        "POST",
        "/participants",
        Some(serde_json::json!({
            "edition": "2025",
            "nome": "Mario",
            "cognome": "Rossi",
            "taglia": "L",
            "tappaPullman": "esine - ponte di legno",
            "pagato": 30
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: ParticipantResponse = read_json(response).await;
    assert_eq!(created.participant.edition_id, EditionId::new("2025"));
    assert_eq!(
        created.participant.details.tappa_pullman,
        BusRoute::EsineToPonteDiLegno
    );
    assert_eq!(created.participant.details.pagato, Money::from_cents(3000));

    let uri: String = format!("/participants/{}", created.participant.id);
    let response = send(
        &app,
        "PATCH",
        &uri,
        Some(serde_json::json!({ "ebike": true, "notteHotel": true })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ParticipantResponse = read_json(response).await;
    assert!(updated.participant.details.ebike);
    assert!(updated.participant.details.notte_hotel);
    assert_eq!(updated.participant.details.nome, "Mario");

    let response = send(&app, "PATCH", &uri, Some(serde_json::json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_edition_keeps_its_participants() {
    let app: Router = build_router(create_test_app_state());
    create_editions(&app).await;
    send(
        &app,
        "POST",
        "/participants",
        Some(serde_json::json!({ "edition": "2024", "nome": "Anna", "cognome": "Verdi" })),
    )
    .await;

    let response = send(&app, "DELETE", "/editions/2024?confirm=true", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: ListParticipantsResponse =
        read_json(send(&app, "GET", "/participants?edition=2024", None).await).await;
    assert_eq!(listed.participants.len(), 1);
}

#[tokio::test]
async fn test_export_transactions() {
    let app: Router = build_router(create_test_app_state());

    let response = send(&app, "GET", "/export/transactions.csv", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    create_editions(&app).await;
    send(
        &app,
        "POST",
        "/transactions",
        Some(serde_json::json!({
            "edition": "2025",
            "date": "2025-04-01",
            "type": "ENTRATA",
            "description": "Quota",
            "amount": 10
        })),
    )
    .await;

    let response = send(&app, "GET", "/export/transactions.csv", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    let text: String = read_text(response).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "id,editionId,date,type,source,person,description,amount"
    );
    assert!(lines[1].ends_with(
        "\"2025\",\"2025-04-01\",\"ENTRATA\",\"CONTANTI/PERSONALE\",\"Giulia\",\"Quota\",\"10.00\""
    ));
}
