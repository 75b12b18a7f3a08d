// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use epica_domain::{EditionId, RecordId, TransactionDetails};
use tracing::debug;

use super::generate_record_id;
use crate::data_models::NewTransactionRow;
use crate::diesel_schema::transactions;
use crate::error::PersistenceError;

/// Creates a transaction and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_transaction(
    conn: &mut SqliteConnection,
    edition_id: &EditionId,
    details: &TransactionDetails,
) -> Result<RecordId, PersistenceError> {
    let transaction_id: RecordId = generate_record_id();
    let row: NewTransactionRow<'_> = NewTransactionRow::new(&transaction_id, edition_id, details)?;

    diesel::insert_into(transactions::table)
        .values(&row)
        .execute(conn)?;

    debug!(%transaction_id, %edition_id, kind = %details.kind, "Transaction created");
    Ok(transaction_id)
}

/// Deletes a transaction.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the transaction does not exist.
pub fn delete_transaction(
    conn: &mut SqliteConnection,
    transaction_id: &RecordId,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        transactions::table.filter(transactions::transaction_id.eq(transaction_id.value())),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Transaction '{transaction_id}' not found"
        )));
    }
    Ok(())
}
