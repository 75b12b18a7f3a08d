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

/// Writes an edition under its id, replacing any existing row.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_edition(conn: &mut SqliteConnection, edition: &Edition) -> Result<(), PersistenceError> {
    let row: EditionRow = EditionRow::from(edition);
    diesel::replace_into(editions::table)
        .values(&row)
        .execute(conn)?;

    debug!(edition_id = %edition.id, "Edition written");
    Ok(())
}

/// Deletes an edition. Transactions and participants that reference it
/// are left in place.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the edition does not exist.
pub fn delete_edition(
    conn: &mut SqliteConnection,
    edition_id: &EditionId,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(editions::table.filter(editions::edition_id.eq(edition_id.value())))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Edition '{edition_id}' not found"
        )));
    }
    Ok(())
}
