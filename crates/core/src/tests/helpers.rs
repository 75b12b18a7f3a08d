// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Snapshot;
use epica_domain::{
    Edition, EditionId, Money, Participant, ParticipantDetails, RecordId, SourceType,
    TransactionDetails, TransactionType,
};
use time::macros::date;

pub fn create_test_transaction_details(description: &str, cents: i64) -> TransactionDetails {
    TransactionDetails {
        date: date!(2025 - 06 - 14),
        kind: TransactionType::Income,
        source: SourceType::Endu,
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

/// A snapshot with editions 2024 and 2025 and one participant in 2025.
pub fn create_test_snapshot() -> Snapshot {
    Snapshot::new(
        vec![
            Edition::new("2024", "Epica 2024"),
            Edition::new("2025", "Epica 2025"),
        ],
        Vec::new(),
        vec![Participant {
            id: RecordId::new("p1"),
            edition_id: EditionId::new("2025"),
            details: create_test_participant_details("Mario", "Rossi"),
        }],
    )
}
