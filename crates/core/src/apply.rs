// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Mutation, Snapshot};
use crate::validate_edition_exists;
use epica_domain::{
    DomainError, Edition, Participant, validate_edition_fields, validate_edition_unique,
    validate_participant_details, validate_participant_patch, validate_transaction_fields,
};
use tracing::debug;

/// Applies a command to the current snapshot, producing the store write
/// it requires.
///
/// Invalid commands are rejected here and never reach the store.
///
/// # Arguments
///
/// * `snapshot` - The current store contents (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(Mutation)` describing the single write to perform
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - An edition is blank or already exists
/// - A transaction has no description or a non-positive amount
/// - A participant has no first or last name, or a negative payment
/// - The referenced edition or record does not exist
pub fn apply(snapshot: &Snapshot, command: Command) -> Result<Mutation, CoreError> {
    debug!(command = command.name(), "Applying command");

    match command {
        Command::CreateEdition { year, name } => {
            let edition: Edition = Edition::new(&year, &name);
            validate_edition_fields(&edition)?;
            validate_edition_unique(&snapshot.editions, &edition.id)?;
            Ok(Mutation::UpsertEdition(edition))
        }
        Command::DeleteEdition { edition_id } => {
            validate_edition_exists(snapshot, &edition_id)?;
            Ok(Mutation::DeleteEdition(edition_id))
        }
        Command::RecordTransaction {
            edition_id,
            mut details,
        } => {
            validate_transaction_fields(&details.description, details.amount)?;
            validate_edition_exists(snapshot, &edition_id)?;
            details.description = details.description.trim().to_string();
            Ok(Mutation::CreateTransaction {
                edition_id,
                details,
            })
        }
        Command::DeleteTransaction { transaction_id } => {
            if snapshot.find_transaction(&transaction_id).is_none() {
                return Err(DomainError::TransactionNotFound(transaction_id.to_string()).into());
            }
            Ok(Mutation::DeleteTransaction(transaction_id))
        }
        Command::RegisterParticipant {
            edition_id,
            details,
        } => {
            validate_participant_details(&details)?;
            validate_edition_exists(snapshot, &edition_id)?;
            Ok(Mutation::CreateParticipant {
                edition_id,
                details,
            })
        }
        Command::UpdateParticipant {
            participant_id,
            patch,
        } => {
            let current: &Participant = snapshot
                .find_participant(&participant_id)
                .ok_or_else(|| DomainError::ParticipantNotFound(participant_id.to_string()))?;
            validate_participant_patch(&current.details, &patch)?;
            Ok(Mutation::PatchParticipant {
                participant_id,
                patch,
            })
        }
        Command::DeleteParticipant { participant_id } => {
            if snapshot.find_participant(&participant_id).is_none() {
                return Err(DomainError::ParticipantNotFound(participant_id.to_string()).into());
            }
            Ok(Mutation::DeleteParticipant(participant_id))
        }
    }
}
