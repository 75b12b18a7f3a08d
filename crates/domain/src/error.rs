// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::money::Money;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Edition year is empty or invalid.
    InvalidEditionYear(String),
    /// Edition name is empty or invalid.
    InvalidEditionName(String),
    /// An edition with this identifier already exists.
    DuplicateEdition(String),
    /// Edition does not exist.
    EditionNotFound(String),
    /// No edition exists to receive records.
    NoEditions,
    /// Transaction description is empty.
    InvalidDescription(String),
    /// A monetary amount is out of range for the field it is used in.
    InvalidAmount {
        /// The field carrying the amount.
        field: &'static str,
        /// The rejected amount.
        amount: Money,
    },
    /// A participant name field is empty.
    InvalidName(String),
    /// A participant patch carries no fields.
    EmptyPatch,
    /// Transaction does not exist.
    TransactionNotFound(String),
    /// Participant does not exist.
    ParticipantNotFound(String),
    /// Text could not be parsed as a currency amount.
    InvalidMoney(String),
    /// Unknown transaction type tag.
    InvalidTransactionType(String),
    /// Unknown transaction source tag.
    InvalidSource(String),
    /// Unknown bus route token.
    InvalidBusRoute(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEditionYear(msg) => write!(f, "Invalid edition year: {msg}"),
            Self::InvalidEditionName(msg) => write!(f, "Invalid edition name: {msg}"),
            Self::DuplicateEdition(id) => write!(f, "Edition '{id}' already exists"),
            Self::EditionNotFound(id) => write!(f, "Edition '{id}' not found"),
            Self::NoEditions => write!(f, "No edition exists; create an edition first"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidAmount { field, amount } => {
                write!(f, "Invalid amount for {field}: {amount}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::EmptyPatch => write!(f, "Participant update contains no fields"),
            Self::TransactionNotFound(id) => write!(f, "Transaction '{id}' not found"),
            Self::ParticipantNotFound(id) => write!(f, "Participant '{id}' not found"),
            Self::InvalidMoney(value) => write!(f, "Invalid amount: '{value}'"),
            Self::InvalidTransactionType(value) => {
                write!(f, "Invalid transaction type: '{value}'")
            }
            Self::InvalidSource(value) => write!(f, "Invalid transaction source: '{value}'"),
            Self::InvalidBusRoute(value) => write!(f, "Invalid bus route: '{value}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
