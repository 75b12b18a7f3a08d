// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use epica_domain::{EditionFilter, Participant, RecordId};
use tracing::debug;

use crate::data_models::ParticipantRow;
use crate::diesel_schema::participants;
use crate::error::PersistenceError;

/// Lists participants in scope in registration order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_participants(
    conn: &mut SqliteConnection,
    filter: &EditionFilter,
) -> Result<Vec<Participant>, PersistenceError> {
    let mut query = participants::table
        .select(ParticipantRow::as_select())
        .order(participants::row_seq.asc())
        .into_boxed();

    if let EditionFilter::Edition(edition_id) = filter {
        query = query.filter(participants::edition_id.eq(edition_id.value()));
    }

    let rows: Vec<ParticipantRow> = query.load(conn)?;
    debug!(count = rows.len(), %filter, "Loaded participants");

    rows.into_iter().map(Participant::try_from).collect()
}

/// Retrieves a participant by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the participant is not found.
pub fn get_participant(
    conn: &mut SqliteConnection,
    participant_id: &RecordId,
) -> Result<Option<Participant>, PersistenceError> {
    let row: Option<ParticipantRow> = participants::table
        .filter(participants::participant_id.eq(participant_id.value()))
        .select(ParticipantRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Participant::try_from).transpose()
}
