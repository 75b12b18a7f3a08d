// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use epica_domain::{
    Edition, EditionFilter, EditionId, Participant, ParticipantDetails, ParticipantPatch,
    RecordId, Stats, Transaction, TransactionDetails, compute_stats,
};
use serde::{Deserialize, Serialize};

/// The three record collections of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Editions,
    Transactions,
    Participants,
}

impl Collection {
    /// Returns the collection name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Editions => "editions",
            Self::Transactions => "transactions",
            Self::Participants => "participants",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read-only projection of the record store.
///
/// Commands are validated against a snapshot; the snapshot itself is
/// never mutated locally. After a write, a fresh snapshot is read back
/// from the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// All editions, ordered by id.
    pub editions: Vec<Edition>,
    /// All transactions.
    pub transactions: Vec<Transaction>,
    /// All participants.
    pub participants: Vec<Participant>,
}

impl Snapshot {
    /// Creates a snapshot from the three collections.
    #[must_use]
    pub const fn new(
        editions: Vec<Edition>,
        transactions: Vec<Transaction>,
        participants: Vec<Participant>,
    ) -> Self {
        Self {
            editions,
            transactions,
            participants,
        }
    }

    /// Checks if an edition exists.
    #[must_use]
    pub fn has_edition(&self, edition_id: &EditionId) -> bool {
        self.editions.iter().any(|e| &e.id == edition_id)
    }

    /// Looks up a transaction by id.
    #[must_use]
    pub fn find_transaction(&self, transaction_id: &RecordId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == transaction_id)
    }

    /// Looks up a participant by id.
    #[must_use]
    pub fn find_participant(&self, participant_id: &RecordId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == participant_id)
    }

    /// Computes the statistics for an edition scope.
    #[must_use]
    pub fn stats(&self, filter: &EditionFilter) -> Stats {
        compute_stats(&self.transactions, &self.participants, filter)
    }
}

/// A single validated write against the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Write an edition under its id.
    UpsertEdition(Edition),
    /// Remove an edition.
    DeleteEdition(EditionId),
    /// Create a transaction; the store assigns the id.
    CreateTransaction {
        edition_id: EditionId,
        details: TransactionDetails,
    },
    /// Remove a transaction.
    DeleteTransaction(RecordId),
    /// Create a participant; the store assigns the id.
    CreateParticipant {
        edition_id: EditionId,
        details: ParticipantDetails,
    },
    /// Replace some fields of a participant.
    PatchParticipant {
        participant_id: RecordId,
        patch: ParticipantPatch,
    },
    /// Remove a participant.
    DeleteParticipant(RecordId),
}

impl Mutation {
    /// Returns the collection this mutation writes to.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::UpsertEdition(_) | Self::DeleteEdition(_) => Collection::Editions,
            Self::CreateTransaction { .. } | Self::DeleteTransaction(_) => {
                Collection::Transactions
            }
            Self::CreateParticipant { .. }
            | Self::PatchParticipant { .. }
            | Self::DeleteParticipant(_) => Collection::Participants,
        }
    }
}
