// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use epica_domain::{EditionFilter, Transaction};
use tracing::debug;

use crate::data_models::TransactionRow;
use crate::diesel_schema::transactions;
use crate::error::PersistenceError;

/// Lists transactions in scope, newest date first.
///
/// Transactions sharing a date keep their insertion order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `filter` - The edition scope
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_transactions(
    conn: &mut SqliteConnection,
    filter: &EditionFilter,
) -> Result<Vec<Transaction>, PersistenceError> {
    let mut query = transactions::table
        .select(TransactionRow::as_select())
        .order((transactions::date.desc(), transactions::row_seq.asc()))
        .into_boxed();

    if let EditionFilter::Edition(edition_id) = filter {
        query = query.filter(transactions::edition_id.eq(edition_id.value()));
    }

    let rows: Vec<TransactionRow> = query.load(conn)?;
    debug!(count = rows.len(), %filter, "Loaded transactions");

    rows.into_iter().map(Transaction::try_from).collect()
}
