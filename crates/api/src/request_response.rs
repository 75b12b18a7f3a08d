// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use epica_domain::{
    ChartPoint, Edition, EditionFilter, EditionId, Money, Participant, ParticipantDetails,
    RecordId, SourceType, Stats, Transaction, TransactionType,
};
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// API request to create a new edition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEditionRequest {
    /// The edition year, which also becomes its id.
    pub year: String,
    /// The display name.
    pub name: String,
}

/// API response for a successful edition creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEditionResponse {
    /// The created edition.
    pub edition: Edition,
    /// A success message.
    pub message: String,
}

/// API response listing every edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEditionsResponse {
    /// Editions ordered by id.
    pub editions: Vec<Edition>,
}

/// API response for a confirmed delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    /// The id of the removed record.
    pub id: String,
    /// A success message.
    pub message: String,
}

/// API request to record an income or expense.
///
/// Omitted fields take the values the entry form would prefill: today's
/// date, cash as source and the configured staff member as person.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransactionRequest {
    /// The selected edition scope. Under `all` the first edition is used.
    #[serde(default)]
    pub edition: EditionFilter,
    /// The transaction date.
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Where the money came from.
    #[serde(default)]
    pub source: Option<SourceType>,
    /// Who handled the money.
    #[serde(default)]
    pub person: Option<String>,
    /// Free text description.
    pub description: String,
    /// The amount, strictly positive.
    pub amount: Money,
}

/// API response for a recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTransactionResponse {
    /// The stored transaction.
    pub transaction: Transaction,
    /// A success message.
    pub message: String,
}

/// API response listing transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTransactionsResponse {
    /// The scope that was listed.
    pub edition: EditionFilter,
    /// Transactions, newest date first.
    pub transactions: Vec<Transaction>,
}

/// API request to register a participant from the form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterParticipantRequest {
    /// The selected edition scope. Under `all` the first edition is used.
    #[serde(default)]
    pub edition: EditionFilter,
    /// The participant fields.
    #[serde(flatten)]
    pub details: ParticipantDetails,
}

/// API response carrying a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResponse {
    /// The stored participant.
    pub participant: Participant,
    /// A success message.
    pub message: String,
}

/// API response listing participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParticipantsResponse {
    /// The scope that was listed.
    pub edition: EditionFilter,
    /// Participants in registration order.
    pub participants: Vec<Participant>,
}

/// API response for a CSV participant import.
///
/// When `error` is set the import stopped early; the rows counted in
/// `imported_count` stay committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportParticipantsResponse {
    /// Number of non-blank rows after the header.
    pub data_rows: usize,
    /// Rows dropped for missing first or last name.
    pub rejected_rows: usize,
    /// Number of participants written.
    pub imported_count: usize,
    /// The edition the participants were written to.
    pub edition_id: EditionId,
    /// Ids of the written participants, in file order.
    pub participant_ids: Vec<RecordId>,
    /// The failure that stopped the import, if any.
    pub error: Option<String>,
    /// A user-facing summary.
    pub message: String,
}

impl ImportParticipantsResponse {
    /// Returns whether every valid row was written.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// API response with the aggregated figures for a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    /// The scope that was aggregated.
    pub edition: EditionFilter,
    /// The figures.
    pub stats: Stats,
    /// The income/expense series for the dashboard chart.
    pub chart: Vec<ChartPoint>,
}

/// API response with the generated commentary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// The commentary, or a fallback message.
    pub text: String,
    /// Whether `text` came from the narrative backend.
    pub available: bool,
}
