// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every write goes through the same path: load a snapshot, validate the
//! command with [`epica::apply`], then perform the single resulting write.

use epica::{Command, Mutation, Snapshot, apply, resolve_target_edition};
use epica_domain::{
    CsvImportReport, Edition, EditionFilter, EditionId, Participant, ParticipantDetails,
    ParticipantPatch, RecordId, SourceType, Stats, Transaction, TransactionDetails,
    parse_participant_csv_report,
};
use epica_persistence::{PersistMutationResult, Persistence};
use time::Date;
use tracing::{debug, info, warn};

use crate::csv_export::export_transactions_csv;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    CreateEditionRequest, CreateEditionResponse, DeleteResponse, ImportParticipantsResponse,
    ListEditionsResponse, ListParticipantsResponse, ListTransactionsResponse, ParticipantResponse,
    RecordTransactionRequest, RecordTransactionResponse, RegisterParticipantRequest,
    StatsResponse,
};

/// Confirmation prompt for deleting an edition.
pub const CONFIRM_DELETE_EDITION: &str = "Eliminare questa edizione?";
/// Confirmation prompt for deleting a transaction.
pub const CONFIRM_DELETE_TRANSACTION: &str = "Eliminare questo movimento?";
/// Confirmation prompt for deleting a participant.
pub const CONFIRM_DELETE_PARTICIPANT: &str = "Eliminare questo iscritto?";
/// Message attached to an import that stopped on a failed write.
pub const IMPORT_FAILED_MESSAGE: &str = "Errore durante l'importazione del file CSV";

/// Values used for transaction fields the caller leaves out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDefaults {
    /// The date recorded when none is given.
    pub today: Date,
    /// The person recorded when none is given.
    pub staff_member: String,
}

impl TransactionDefaults {
    /// Creates defaults for the given date and staff member.
    #[must_use]
    pub fn new(today: Date, staff_member: &str) -> Self {
        Self {
            today,
            staff_member: staff_member.to_string(),
        }
    }
}

/// Validates a command against the current store contents and performs
/// the resulting write.
///
/// Returns the mutation that was written alongside the store result, so
/// callers can echo the normalized record back.
fn execute(
    persistence: &mut Persistence,
    command: Command,
) -> Result<(Mutation, PersistMutationResult), ApiError> {
    let command_name: &'static str = command.name();
    let snapshot: Snapshot = persistence.load_snapshot()?;
    let mutation: Mutation = apply(&snapshot, command).map_err(translate_core_error)?;
    let result: PersistMutationResult = persistence.persist_mutation(&mutation)?;

    info!(
        command = command_name,
        collection = %result.collection,
        record_id = %result.record_id,
        "Command executed"
    );

    Ok((mutation, result))
}

/// Fails with the given prompt unless the caller confirmed.
fn require_confirmation(confirmed: bool, prompt: &str) -> Result<(), ApiError> {
    if confirmed {
        Ok(())
    } else {
        Err(ApiError::ConfirmationRequired {
            prompt: prompt.to_string(),
        })
    }
}

/// Resolves the edition that new records are written to.
fn resolve_edition(
    persistence: &mut Persistence,
    filter: &EditionFilter,
) -> Result<EditionId, ApiError> {
    let editions: Vec<Edition> = persistence.list_editions()?;
    resolve_target_edition(filter, &editions).map_err(translate_domain_error)
}

// ============================================================================
// Editions
// ============================================================================

/// Lists every edition ordered by id.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_editions(persistence: &mut Persistence) -> Result<ListEditionsResponse, ApiError> {
    let editions: Vec<Edition> = persistence.list_editions()?;
    debug!(count = editions.len(), "Listed editions");
    Ok(ListEditionsResponse { editions })
}

/// Creates an edition keyed by its year.
///
/// # Errors
///
/// Returns an error if:
/// - The year or name is blank
/// - An edition with the same year already exists
/// - The write fails
pub fn create_edition(
    persistence: &mut Persistence,
    request: CreateEditionRequest,
) -> Result<CreateEditionResponse, ApiError> {
    let (mutation, _) = execute(
        persistence,
        Command::CreateEdition {
            year: request.year,
            name: request.name,
        },
    )?;

    let Mutation::UpsertEdition(edition) = mutation else {
        return Err(ApiError::Internal {
            message: String::from("Edition creation produced an unexpected mutation"),
        });
    };

    Ok(CreateEditionResponse {
        message: format!("Created edition '{}'", edition.name),
        edition,
    })
}

/// Deletes an edition. Its transactions and participants are kept.
///
/// # Errors
///
/// Returns an error if:
/// - `confirmed` is false
/// - The edition does not exist
/// - The write fails
pub fn delete_edition(
    persistence: &mut Persistence,
    edition_id: &EditionId,
    confirmed: bool,
) -> Result<DeleteResponse, ApiError> {
    require_confirmation(confirmed, CONFIRM_DELETE_EDITION)?;
    execute(
        persistence,
        Command::DeleteEdition {
            edition_id: edition_id.clone(),
        },
    )?;

    Ok(DeleteResponse {
        id: edition_id.to_string(),
        message: format!("Deleted edition '{edition_id}'"),
    })
}

// ============================================================================
// Transactions
// ============================================================================

/// Lists the transactions in scope, newest date first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_transactions(
    persistence: &mut Persistence,
    filter: &EditionFilter,
) -> Result<ListTransactionsResponse, ApiError> {
    let transactions: Vec<Transaction> = persistence.list_transactions(filter)?;
    debug!(edition = %filter, count = transactions.len(), "Listed transactions");
    Ok(ListTransactionsResponse {
        edition: filter.clone(),
        transactions,
    })
}

/// Records an income or expense.
///
/// The target edition is resolved from the request scope. Missing date,
/// source and person are taken from `defaults` and `SourceType::Cash`.
///
/// # Errors
///
/// Returns an error if:
/// - No edition can be resolved
/// - The description is blank or the amount is not positive
/// - The write fails
pub fn record_transaction(
    persistence: &mut Persistence,
    request: RecordTransactionRequest,
    defaults: &TransactionDefaults,
) -> Result<RecordTransactionResponse, ApiError> {
    let edition_id: EditionId = resolve_edition(persistence, &request.edition)?;

    let person: String = request
        .person
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| defaults.staff_member.clone());

    let details: TransactionDetails = TransactionDetails {
        date: request.date.unwrap_or(defaults.today),
        kind: request.kind,
        source: request.source.unwrap_or(SourceType::Cash),
        person,
        description: request.description,
        amount: request.amount,
    };

    let (mutation, result) = execute(
        persistence,
        Command::RecordTransaction {
            edition_id,
            details,
        },
    )?;

    let Mutation::CreateTransaction {
        edition_id,
        details,
    } = mutation
    else {
        return Err(ApiError::Internal {
            message: String::from("Transaction recording produced an unexpected mutation"),
        });
    };

    Ok(RecordTransactionResponse {
        message: format!("Recorded {} of {}", details.kind, details.amount),
        transaction: Transaction {
            id: result.record_id,
            edition_id,
            details,
        },
    })
}

/// Deletes a transaction.
///
/// # Errors
///
/// Returns an error if:
/// - `confirmed` is false
/// - The transaction does not exist
/// - The write fails
pub fn delete_transaction(
    persistence: &mut Persistence,
    transaction_id: &RecordId,
    confirmed: bool,
) -> Result<DeleteResponse, ApiError> {
    require_confirmation(confirmed, CONFIRM_DELETE_TRANSACTION)?;
    execute(
        persistence,
        Command::DeleteTransaction {
            transaction_id: transaction_id.clone(),
        },
    )?;

    Ok(DeleteResponse {
        id: transaction_id.to_string(),
        message: String::from("Deleted transaction"),
    })
}

/// Exports every transaction as CSV, regardless of the selected scope.
///
/// # Returns
///
/// * `Ok(None)` if there are no transactions
/// * `Ok(Some(text))` otherwise
///
/// # Errors
///
/// Returns an error if the store cannot be read or the CSV cannot be
/// written.
pub fn export_transactions(persistence: &mut Persistence) -> Result<Option<String>, ApiError> {
    let transactions: Vec<Transaction> = persistence.list_transactions(&EditionFilter::All)?;
    export_transactions_csv(&transactions)
}

// ============================================================================
// Participants
// ============================================================================

/// Lists the participants in scope in registration order.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_participants(
    persistence: &mut Persistence,
    filter: &EditionFilter,
) -> Result<ListParticipantsResponse, ApiError> {
    let participants: Vec<Participant> = persistence.list_participants(filter)?;
    debug!(edition = %filter, count = participants.len(), "Listed participants");
    Ok(ListParticipantsResponse {
        edition: filter.clone(),
        participants,
    })
}

/// Registers a participant from the form.
///
/// # Errors
///
/// Returns an error if:
/// - No edition can be resolved
/// - The first or last name is blank
/// - The write fails
pub fn register_participant(
    persistence: &mut Persistence,
    request: RegisterParticipantRequest,
) -> Result<ParticipantResponse, ApiError> {
    let edition_id: EditionId = resolve_edition(persistence, &request.edition)?;
    let participant: Participant =
        import_single_participant(persistence, &edition_id, request.details)?;

    Ok(ParticipantResponse {
        message: format!(
            "Registered {} {}",
            participant.details.nome, participant.details.cognome
        ),
        participant,
    })
}

/// Replaces the fields present in `patch`.
///
/// # Errors
///
/// Returns an error if:
/// - The patch is empty or blanks out a name
/// - The participant does not exist
/// - The write fails
pub fn update_participant(
    persistence: &mut Persistence,
    participant_id: &RecordId,
    patch: ParticipantPatch,
) -> Result<ParticipantResponse, ApiError> {
    execute(
        persistence,
        Command::UpdateParticipant {
            participant_id: participant_id.clone(),
            patch,
        },
    )?;

    let participant: Participant = persistence
        .get_participant(participant_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Participant"),
            message: format!("Participant '{participant_id}' does not exist"),
        })?;

    Ok(ParticipantResponse {
        message: format!(
            "Updated {} {}",
            participant.details.nome, participant.details.cognome
        ),
        participant,
    })
}

/// Deletes a participant.
///
/// # Errors
///
/// Returns an error if:
/// - `confirmed` is false
/// - The participant does not exist
/// - The write fails
pub fn delete_participant(
    persistence: &mut Persistence,
    participant_id: &RecordId,
    confirmed: bool,
) -> Result<DeleteResponse, ApiError> {
    require_confirmation(confirmed, CONFIRM_DELETE_PARTICIPANT)?;
    execute(
        persistence,
        Command::DeleteParticipant {
            participant_id: participant_id.clone(),
        },
    )?;

    Ok(DeleteResponse {
        id: participant_id.to_string(),
        message: String::from("Deleted participant"),
    })
}

// ============================================================================
// CSV import
// ============================================================================

/// A parsed import file bound to its target edition, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantImportPlan {
    /// The edition every row is written to.
    pub edition_id: EditionId,
    /// The parsed rows.
    pub report: CsvImportReport,
}

impl ParticipantImportPlan {
    /// Builds the import response from the ids written so far and the
    /// failure that stopped the import, if any.
    #[must_use]
    pub fn into_response(
        self,
        participant_ids: Vec<RecordId>,
        error: Option<ApiError>,
    ) -> ImportParticipantsResponse {
        let imported_count: usize = participant_ids.len();
        let message: String = if error.is_some() {
            IMPORT_FAILED_MESSAGE.to_string()
        } else {
            format!("Importati {imported_count} iscritti con successo!")
        };

        ImportParticipantsResponse {
            data_rows: self.report.data_rows,
            rejected_rows: self.report.rejected_rows(),
            imported_count,
            edition_id: self.edition_id,
            participant_ids,
            error: error.map(|e| e.to_string()),
            message,
        }
    }
}

/// Parses an import file and resolves its target edition.
///
/// Nothing is written.
///
/// # Errors
///
/// Returns an error if:
/// - The file has no row with both first and last name
/// - No edition can be resolved
pub fn prepare_participant_import(
    persistence: &mut Persistence,
    filter: &EditionFilter,
    raw: &str,
) -> Result<ParticipantImportPlan, ApiError> {
    let report: CsvImportReport = parse_participant_csv_report(raw);
    if report.records.is_empty() {
        warn!(data_rows = report.data_rows, "CSV import has no valid rows");
        return Err(ApiError::NoValidRows);
    }

    let edition_id: EditionId = resolve_edition(persistence, filter)?;
    debug!(
        edition = %edition_id,
        data_rows = report.data_rows,
        valid_rows = report.records.len(),
        "Prepared participant import"
    );

    Ok(ParticipantImportPlan { edition_id, report })
}

/// Writes one participant and returns it as stored.
///
/// # Errors
///
/// Returns an error if the participant is invalid, the edition does not
/// exist, or the write fails.
pub fn import_single_participant(
    persistence: &mut Persistence,
    edition_id: &EditionId,
    details: ParticipantDetails,
) -> Result<Participant, ApiError> {
    let (mutation, result) = execute(
        persistence,
        Command::RegisterParticipant {
            edition_id: edition_id.clone(),
            details,
        },
    )?;

    let Mutation::CreateParticipant {
        edition_id,
        details,
    } = mutation
    else {
        return Err(ApiError::Internal {
            message: String::from("Participant registration produced an unexpected mutation"),
        });
    };

    Ok(Participant {
        id: result.record_id,
        edition_id,
        details,
    })
}

/// Writes the rows of `plan` one at a time in file order through
/// `write_row`.
///
/// `write_row` receives the target edition and one parsed row and returns
/// the stored participant. The first failed write stops the import; rows
/// written before it stay committed and the failure is reported in the
/// response.
pub async fn run_participant_import<W, Fut>(
    plan: ParticipantImportPlan,
    mut write_row: W,
) -> ImportParticipantsResponse
where
    W: FnMut(EditionId, ParticipantDetails) -> Fut + Send,
    Fut: Future<Output = Result<Participant, ApiError>> + Send,
{
    let mut participant_ids: Vec<RecordId> = Vec::with_capacity(plan.report.records.len());
    let mut failure: Option<ApiError> = None;

    for details in &plan.report.records {
        match write_row(plan.edition_id.clone(), details.clone()).await {
            Ok(participant) => participant_ids.push(participant.id),
            Err(e) => {
                warn!(
                    error = %e,
                    imported = participant_ids.len(),
                    "Participant import stopped"
                );
                failure = Some(e);
                break;
            }
        }
    }

    let response: ImportParticipantsResponse = plan.into_response(participant_ids, failure);
    info!(
        edition = %response.edition_id,
        imported = response.imported_count,
        rejected = response.rejected_rows,
        complete = response.is_complete(),
        "Participant import finished"
    );
    response
}

// ============================================================================
// Statistics
// ============================================================================

/// Aggregates the figures for a scope.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_stats(
    persistence: &mut Persistence,
    filter: &EditionFilter,
) -> Result<StatsResponse, ApiError> {
    let snapshot: Snapshot = persistence.load_snapshot()?;
    let stats: Stats = snapshot.stats(filter);
    Ok(StatsResponse {
        edition: filter.clone(),
        chart: stats.chart_series(),
        stats,
    })
}
