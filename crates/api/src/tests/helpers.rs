// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use epica_domain::{EditionFilter, EditionId, Money, ParticipantDetails, TransactionType};
use epica_persistence::Persistence;
use time::{Date, macros::date};

use crate::{
    CreateEditionRequest, RecordTransactionRequest, RecordTransactionResponse,
    TransactionDefaults, create_edition, record_transaction,
};

pub const STAFF_MEMBER: &str = "Giulia";
pub const TODAY: Date = date!(2025 - 06 - 14);

pub fn create_test_defaults() -> TransactionDefaults {
    TransactionDefaults::new(TODAY, STAFF_MEMBER)
}

/// Returns an in-memory store holding editions 2024 and 2025.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for (year, name) in [("2024", "Epica 2024"), ("2025", "Epica 2025")] {
        create_edition(
            &mut persistence,
            CreateEditionRequest {
                year: year.to_string(),
                name: name.to_string(),
            },
        )
        .unwrap();
    }
    persistence
}

pub fn edition(id: &str) -> EditionFilter {
    EditionFilter::Edition(EditionId::new(id))
}

pub fn transaction_request(
    edition_id: &str,
    kind: TransactionType,
    euros: i64,
    description: &str,
) -> RecordTransactionRequest {
    RecordTransactionRequest {
        edition: edition(edition_id),
        date: None,
        kind,
        source: None,
        person: None,
        description: description.to_string(),
        amount: Money::from_cents(euros * 100),
    }
}

pub fn record(
    persistence: &mut Persistence,
    edition_id: &str,
    kind: TransactionType,
    euros: i64,
) -> RecordTransactionResponse {
    record_transaction(
        persistence,
        transaction_request(edition_id, kind, euros, "Quote"),
        &create_test_defaults(),
    )
    .unwrap()
}

pub fn participant_details(nome: &str, cognome: &str) -> ParticipantDetails {
    ParticipantDetails {
        nome: nome.to_string(),
        cognome: cognome.to_string(),
        taglia: String::from("M"),
        ..ParticipantDetails::default()
    }
}
