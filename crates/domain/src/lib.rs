// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod money;
mod participant_import;
mod stats;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use participant_import::{
    CsvImportReport, derive_bus_route, parse_participant_csv, parse_participant_csv_report,
    title_case, tokenize_line,
};
pub use stats::{ChartPoint, Stats, compute_stats};

// Re-export public types
pub use error::DomainError;
pub use money::{MAX_AMOUNT_CENTS, Money};
pub use types::{
    BusRoute, Edition, EditionFilter, EditionId, Participant, ParticipantDetails,
    ParticipantPatch, RecordId, SourceType, Transaction, TransactionDetails, TransactionType,
};
pub use validation::{
    validate_edition_fields, validate_edition_unique, validate_participant_details,
    validate_participant_patch, validate_transaction_fields,
};
