// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary for the Epica event ledger.
//!
//! Handlers translate requests into commands, run them against the store
//! and translate every lower-level error into an [`ApiError`]. The crate
//! has no knowledge of HTTP.

mod csv_export;
mod error;
mod handlers;
mod narrative;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_export::{TRANSACTION_CSV_HEADER, export_transactions_csv};
pub use error::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
pub use handlers::{
    CONFIRM_DELETE_EDITION, CONFIRM_DELETE_PARTICIPANT, CONFIRM_DELETE_TRANSACTION,
    IMPORT_FAILED_MESSAGE, ParticipantImportPlan, TransactionDefaults, create_edition,
    delete_edition, delete_participant, delete_transaction, export_transactions, get_stats,
    import_single_participant, list_editions, list_participants, list_transactions,
    prepare_participant_import, record_transaction, register_participant, run_participant_import,
    update_participant,
};
pub use narrative::{
    ANALYSIS_FAILED_TEXT, DisabledNarrativeClient, NO_ANALYSIS_TEXT, NarrativeClient,
    NarrativeError, analyze_stats, build_analysis_prompt,
};
pub use request_response::{
    AnalysisResponse, CreateEditionRequest, CreateEditionResponse, DeleteResponse,
    ImportParticipantsResponse, ListEditionsResponse, ListParticipantsResponse,
    ListTransactionsResponse, ParticipantResponse, RecordTransactionRequest,
    RecordTransactionResponse, RegisterParticipantRequest, StatsResponse,
};
