// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of the transaction ledger.
//!
//! The header row is written bare; every data field is double-quoted with
//! embedded quotes doubled. Lines are separated by `\n` with no trailing
//! terminator.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use epica_domain::Transaction;

use crate::error::ApiError;

/// Column names, in output order.
pub const TRANSACTION_CSV_HEADER: [&str; 8] = [
    "id",
    "editionId",
    "date",
    "type",
    "source",
    "person",
    "description",
    "amount",
];

/// Serializes transactions to CSV text.
///
/// # Arguments
///
/// * `transactions` - The transactions to export, in output order
///
/// # Returns
///
/// * `Ok(None)` if there is nothing to export
/// * `Ok(Some(text))` otherwise
///
/// # Errors
///
/// Returns `ApiError::Internal` if the CSV writer fails.
pub fn export_transactions_csv(transactions: &[Transaction]) -> Result<Option<String>, ApiError> {
    if transactions.is_empty() {
        return Ok(None);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for transaction in transactions {
        let date: String = transaction.details.date.to_string();
        let amount: String = transaction.details.amount.to_string();
        writer
            .write_record([
                transaction.id.value(),
                transaction.edition_id.value(),
                date.as_str(),
                transaction.details.kind.as_str(),
                transaction.details.source.as_str(),
                transaction.details.person.as_str(),
                transaction.details.description.as_str(),
                amount.as_str(),
            ])
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to write CSV row: {e}"),
            })?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to flush CSV writer: {e}"),
    })?;
    let rows: String = String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV output is not UTF-8: {e}"),
    })?;

    let mut text: String = TRANSACTION_CSV_HEADER.join(",");
    text.push('\n');
    text.push_str(rows.trim_end_matches('\n'));
    Ok(Some(text))
}
