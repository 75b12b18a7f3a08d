// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use epica_domain::{EditionId, ParticipantDetails, ParticipantPatch, RecordId, TransactionDetails};

/// A command represents user intent as data only.
///
/// Commands are the only way to request changes to the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new edition keyed by its year.
    CreateEdition {
        /// The edition year.
        year: String,
        /// The display name.
        name: String,
    },
    /// Delete an edition. Records that reference it are kept.
    DeleteEdition {
        /// The edition to delete.
        edition_id: EditionId,
    },
    /// Record an income or expense.
    RecordTransaction {
        /// The edition the transaction belongs to.
        edition_id: EditionId,
        /// The transaction fields.
        details: TransactionDetails,
    },
    /// Delete a transaction.
    DeleteTransaction {
        /// The transaction to delete.
        transaction_id: RecordId,
    },
    /// Register a participant, from the form or from a CSV import row.
    RegisterParticipant {
        /// The edition the participant is registered for.
        edition_id: EditionId,
        /// The participant fields.
        details: ParticipantDetails,
    },
    /// Update some fields of a participant.
    UpdateParticipant {
        /// The participant to update.
        participant_id: RecordId,
        /// The fields to replace.
        patch: ParticipantPatch,
    },
    /// Delete a participant.
    DeleteParticipant {
        /// The participant to delete.
        participant_id: RecordId,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateEdition { .. } => "CreateEdition",
            Self::DeleteEdition { .. } => "DeleteEdition",
            Self::RecordTransaction { .. } => "RecordTransaction",
            Self::DeleteTransaction { .. } => "DeleteTransaction",
            Self::RegisterParticipant { .. } => "RegisterParticipant",
            Self::UpdateParticipant { .. } => "UpdateParticipant",
            Self::DeleteParticipant { .. } => "DeleteParticipant",
        }
    }
}
