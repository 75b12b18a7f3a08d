// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use epica_domain::{EditionId, ParticipantDetails, ParticipantPatch, RecordId};
use tracing::debug;

use super::generate_record_id;
use crate::data_models::{NewParticipantRow, ParticipantChangeset};
use crate::diesel_schema::participants;
use crate::error::PersistenceError;

fn not_found(participant_id: &RecordId) -> PersistenceError {
    PersistenceError::NotFound(format!("Participant '{participant_id}' not found"))
}

/// Creates a participant and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_participant(
    conn: &mut SqliteConnection,
    edition_id: &EditionId,
    details: &ParticipantDetails,
) -> Result<RecordId, PersistenceError> {
    let participant_id: RecordId = generate_record_id();
    let row: NewParticipantRow<'_> = NewParticipantRow::new(&participant_id, edition_id, details);

    diesel::insert_into(participants::table)
        .values(&row)
        .execute(conn)?;

    debug!(%participant_id, %edition_id, "Participant created");
    Ok(participant_id)
}

/// Replaces the fields present in `patch`.
///
/// An empty patch writes nothing but still requires the participant to
/// exist.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the participant does not exist.
pub fn patch_participant(
    conn: &mut SqliteConnection,
    participant_id: &RecordId,
    patch: &ParticipantPatch,
) -> Result<(), PersistenceError> {
    let target = participants::table.filter(participants::participant_id.eq(participant_id.value()));

    if patch.is_empty() {
        let exists: bool = diesel::select(diesel::dsl::exists(target)).get_result(conn)?;
        return if exists {
            Ok(())
        } else {
            Err(not_found(participant_id))
        };
    }

    let changeset: ParticipantChangeset<'_> = ParticipantChangeset::from(patch);
    let updated: usize = diesel::update(target).set(changeset).execute(conn)?;

    if updated == 0 {
        return Err(not_found(participant_id));
    }

    debug!(%participant_id, "Participant updated");
    Ok(())
}

/// Deletes a participant.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the participant does not exist.
pub fn delete_participant(
    conn: &mut SqliteConnection,
    participant_id: &RecordId,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        participants::table.filter(participants::participant_id.eq(participant_id.value())),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(not_found(participant_id));
    }
    Ok(())
}
