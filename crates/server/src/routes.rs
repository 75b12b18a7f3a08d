// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP routes. Each handler locks the store for one API call, then
//! publishes the touched collection to live subscribers.

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use epica::Collection;
use epica_api::{
    AnalysisResponse, ApiError, CreateEditionRequest, CreateEditionResponse, DeleteResponse,
    ImportParticipantsResponse, ListEditionsResponse, ListParticipantsResponse,
    ListTransactionsResponse, ParticipantImportPlan, ParticipantResponse,
    RecordTransactionRequest, RecordTransactionResponse, RegisterParticipantRequest,
    StatsResponse, TransactionDefaults, analyze_stats, create_edition, delete_edition,
    delete_participant, delete_transaction, export_transactions, get_stats,
    import_single_participant, list_editions, list_participants, list_transactions,
    prepare_participant_import, record_transaction, register_participant, run_participant_import,
    update_participant,
};
use epica_domain::{EditionFilter, EditionId, Participant, ParticipantPatch, RecordId, Stats};
use serde::Deserialize;
use tracing::info;

use crate::error::HttpError;
use crate::live::live_events_handler;
use crate::state::AppState;

/// File name offered for the ledger download.
pub const EXPORT_FILE_NAME: &str = "Report_Epica.csv";

/// Query parameters selecting an edition scope.
#[derive(Debug, Default, Deserialize)]
pub struct EditionQuery {
    /// The scope; `all` or absent selects every edition.
    #[serde(default)]
    pub edition: EditionFilter,
}

/// Query parameters for destructive operations.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    /// Must be `true` for the delete to proceed.
    #[serde(default)]
    pub confirm: bool,
}

async fn publish(app_state: &AppState, collection: Collection) {
    app_state
        .broadcaster
        .publish_collection(&app_state.persistence, collection)
        .await;
}

// ============================================================================
// Editions
// ============================================================================

async fn handle_list_editions(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListEditionsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_editions(&mut persistence)?))
}

async fn handle_create_edition(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEditionRequest>,
) -> Result<Json<CreateEditionResponse>, HttpError> {
    info!(year = %req.year, "Handling create_edition request");

    let response: CreateEditionResponse = {
        let mut persistence = app_state.persistence.lock().await;
        create_edition(&mut persistence, req)?
    };

    publish(&app_state, Collection::Editions).await;
    Ok(Json(response))
}

async fn handle_delete_edition(
    AxumState(app_state): AxumState<AppState>,
    Path(edition_id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(edition_id = %edition_id, "Handling delete_edition request");

    let response: DeleteResponse = {
        let mut persistence = app_state.persistence.lock().await;
        delete_edition(&mut persistence, &EditionId::new(&edition_id), query.confirm)?
    };

    publish(&app_state, Collection::Editions).await;
    Ok(Json(response))
}

// ============================================================================
// Transactions
// ============================================================================

async fn handle_list_transactions(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<EditionQuery>,
) -> Result<Json<ListTransactionsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_transactions(&mut persistence, &query.edition)?))
}

async fn handle_record_transaction(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RecordTransactionRequest>,
) -> Result<Json<RecordTransactionResponse>, HttpError> {
    info!(edition = %req.edition, kind = %req.kind, "Handling record_transaction request");

    let defaults: TransactionDefaults = TransactionDefaults::new(
        time::OffsetDateTime::now_utc().date(),
        &app_state.staff_member,
    );

    let response: RecordTransactionResponse = {
        let mut persistence = app_state.persistence.lock().await;
        record_transaction(&mut persistence, req, &defaults)?
    };

    publish(&app_state, Collection::Transactions).await;
    Ok(Json(response))
}

async fn handle_delete_transaction(
    AxumState(app_state): AxumState<AppState>,
    Path(transaction_id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(transaction_id = %transaction_id, "Handling delete_transaction request");

    let response: DeleteResponse = {
        let mut persistence = app_state.persistence.lock().await;
        delete_transaction(
            &mut persistence,
            &RecordId::new(&transaction_id),
            query.confirm,
        )?
    };

    publish(&app_state, Collection::Transactions).await;
    Ok(Json(response))
}

async fn handle_export_transactions(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Response, HttpError> {
    let csv: Option<String> = {
        let mut persistence = app_state.persistence.lock().await;
        export_transactions(&mut persistence)?
    };

    Ok(match csv {
        None => StatusCode::NO_CONTENT.into_response(),
        Some(text) => (
            [
                (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            text,
        )
            .into_response(),
    })
}

// ============================================================================
// Participants
// ============================================================================

async fn handle_list_participants(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<EditionQuery>,
) -> Result<Json<ListParticipantsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_participants(&mut persistence, &query.edition)?))
}

async fn handle_register_participant(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterParticipantRequest>,
) -> Result<Json<ParticipantResponse>, HttpError> {
    info!(edition = %req.edition, "Handling register_participant request");

    let response: ParticipantResponse = {
        let mut persistence = app_state.persistence.lock().await;
        register_participant(&mut persistence, req)?
    };

    publish(&app_state, Collection::Participants).await;
    Ok(Json(response))
}

async fn handle_update_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(participant_id): Path<String>,
    Json(patch): Json<ParticipantPatch>,
) -> Result<Json<ParticipantResponse>, HttpError> {
    info!(participant_id = %participant_id, "Handling update_participant request");

    let response: ParticipantResponse = {
        let mut persistence = app_state.persistence.lock().await;
        update_participant(&mut persistence, &RecordId::new(&participant_id), patch)?
    };

    publish(&app_state, Collection::Participants).await;
    Ok(Json(response))
}

async fn handle_delete_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(participant_id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(participant_id = %participant_id, "Handling delete_participant request");

    let response: DeleteResponse = {
        let mut persistence = app_state.persistence.lock().await;
        delete_participant(
            &mut persistence,
            &RecordId::new(&participant_id),
            query.confirm,
        )?
    };

    publish(&app_state, Collection::Participants).await;
    Ok(Json(response))
}

/// Handler for POST `/participants/import`.
///
/// The body is the raw file text. Rows are written one at a time, each
/// under its own store lock, so other requests interleave with a running
/// import and live clients see every row land.
async fn handle_import_participants(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<EditionQuery>,
    body: String,
) -> Result<Json<ImportParticipantsResponse>, HttpError> {
    let Some(_import) = app_state.import_busy.try_acquire() else {
        return Err(HttpError::busy("Importazione già in corso"));
    };

    info!(edition = %query.edition, bytes = body.len(), "Handling participant import");

    let plan: ParticipantImportPlan = {
        let mut persistence = app_state.persistence.lock().await;
        prepare_participant_import(&mut persistence, &query.edition, &body)?
    };

    let app_state: &AppState = &app_state;
    let response: ImportParticipantsResponse =
        run_participant_import(plan, move |edition_id, details| async move {
            let written: Result<Participant, ApiError> = {
                let mut persistence = app_state.persistence.lock().await;
                import_single_participant(&mut persistence, &edition_id, details)
            };
            if written.is_ok() {
                publish(app_state, Collection::Participants).await;
            }
            written
        })
        .await;

    Ok(Json(response))
}

// ============================================================================
// Statistics
// ============================================================================

async fn handle_get_stats(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<EditionQuery>,
) -> Result<Json<StatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_stats(&mut persistence, &query.edition)?))
}

/// Handler for POST `/stats/analysis`.
///
/// The store lock is released before the backend is called.
async fn handle_analyze_stats(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<EditionQuery>,
) -> Result<Json<AnalysisResponse>, HttpError> {
    let Some(_analysis) = app_state.analysis_busy.try_acquire() else {
        return Err(HttpError::busy("Analisi già in corso"));
    };

    let stats: Stats = {
        let mut persistence = app_state.persistence.lock().await;
        get_stats(&mut persistence, &query.edition)?.stats
    };

    Ok(Json(
        analyze_stats(app_state.narrative.as_ref(), &stats).await,
    ))
}

/// Builds the application router.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/editions", get(handle_list_editions).post(handle_create_edition))
        .route("/editions/{id}", delete(handle_delete_edition))
        .route(
            "/transactions",
            get(handle_list_transactions).post(handle_record_transaction),
        )
        .route("/transactions/{id}", delete(handle_delete_transaction))
        .route(
            "/participants",
            get(handle_list_participants).post(handle_register_participant),
        )
        .route(
            "/participants/{id}",
            delete(handle_delete_participant).patch(handle_update_participant),
        )
        .route("/participants/import", post(handle_import_participants))
        .route("/stats", get(handle_get_stats))
        .route("/stats/analysis", post(handle_analyze_stats))
        .route("/export/transactions.csv", get(handle_export_transactions))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}
