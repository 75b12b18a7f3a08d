// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod edition_tests;
mod initialization_tests;
mod participant_tests;

use crate::Persistence;
use epica_domain::{
    Edition, Money, ParticipantDetails, SourceType, TransactionDetails, TransactionType,
};
use time::Date;

pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .upsert_edition(&Edition::new("2024", "Epica 2024"))
        .unwrap();
    persistence
        .upsert_edition(&Edition::new("2025", "Epica 2025"))
        .unwrap();
    persistence
}

pub fn create_test_transaction_details(
    date: Date,
    kind: TransactionType,
    description: &str,
    cents: i64,
) -> TransactionDetails {
    TransactionDetails {
        date,
        kind,
        source: SourceType::Cash,
        person: String::from("Staff"),
        description: description.to_string(),
        amount: Money::from_cents(cents),
    }
}

pub fn create_test_participant_details(nome: &str, cognome: &str) -> ParticipantDetails {
    ParticipantDetails {
        nome: nome.to_string(),
        cognome: cognome.to_string(),
        taglia: String::from("M"),
        ..ParticipantDetails::default()
    }
}
