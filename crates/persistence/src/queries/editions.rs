// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use epica_domain::{Edition, EditionId};
use tracing::debug;

use crate::data_models::EditionRow;
use crate::diesel_schema::editions;
use crate::error::PersistenceError;

/// Lists all editions ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_editions(conn: &mut SqliteConnection) -> Result<Vec<Edition>, PersistenceError> {
    let rows: Vec<EditionRow> = editions::table
        .select(EditionRow::as_select())
        .order(editions::edition_id.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded editions");
    Ok(rows.into_iter().map(Edition::from).collect())
}

/// Checks whether an edition exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn edition_exists(
    conn: &mut SqliteConnection,
    edition_id: &EditionId,
) -> Result<bool, PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        editions::table.filter(editions::edition_id.eq(edition_id.value())),
    ))
    .get_result(conn)?;
    Ok(exists)
}
