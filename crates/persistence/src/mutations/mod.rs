// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations, one module per collection, plus the
//! dispatcher that turns a validated `Mutation` into a single write.

pub mod editions;
pub mod participants;
pub mod transactions;

use diesel::SqliteConnection;
use epica::{Collection, Mutation};
use epica_domain::RecordId;
use tracing::info;

use crate::error::PersistenceError;

const RECORD_ID_LEN: usize = 20;
const RECORD_ID_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a fresh 20-character alphanumeric record id.
#[must_use]
pub fn generate_record_id() -> RecordId {
    // Bytes >= 248 (4 * 62) are rejected to avoid modulo bias.
    let id: String = std::iter::repeat_with(rand::random::<u8>)
        .filter(|b| *b < 248)
        .take(RECORD_ID_LEN)
        .map(|b| char::from(RECORD_ID_ALPHABET[usize::from(b % 62)]))
        .collect();
    RecordId::new(&id)
}

/// Result of persisting a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistMutationResult {
    /// The collection that changed.
    pub collection: Collection,
    /// The id of the record written. For editions this is the edition id.
    pub record_id: RecordId,
}

/// Performs the single store write described by `mutation`.
///
/// # Errors
///
/// Returns an error if the write fails or if the targeted record does not
/// exist.
pub fn persist_mutation(
    conn: &mut SqliteConnection,
    mutation: &Mutation,
) -> Result<PersistMutationResult, PersistenceError> {
    let record_id: RecordId = match mutation {
        Mutation::UpsertEdition(edition) => {
            editions::upsert_edition(conn, edition)?;
            RecordId::new(edition.id.value())
        }
        Mutation::DeleteEdition(edition_id) => {
            editions::delete_edition(conn, edition_id)?;
            RecordId::new(edition_id.value())
        }
        Mutation::CreateTransaction {
            edition_id,
            details,
        } => transactions::create_transaction(conn, edition_id, details)?,
        Mutation::DeleteTransaction(transaction_id) => {
            transactions::delete_transaction(conn, transaction_id)?;
            transaction_id.clone()
        }
        Mutation::CreateParticipant {
            edition_id,
            details,
        } => participants::create_participant(conn, edition_id, details)?,
        Mutation::PatchParticipant {
            participant_id,
            patch,
        } => {
            participants::patch_participant(conn, participant_id, patch)?;
            participant_id.clone()
        }
        Mutation::DeleteParticipant(participant_id) => {
            participants::delete_participant(conn, participant_id)?;
            participant_id.clone()
        }
    };

    let collection: Collection = mutation.collection();
    info!(%collection, %record_id, "Mutation persisted");

    Ok(PersistMutationResult {
        collection,
        record_id,
    })
}
