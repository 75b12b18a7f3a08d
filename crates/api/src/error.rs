// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use epica::CoreError;
use epica_domain::DomainError;
use epica_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A destructive action was requested without confirmation.
    ConfirmationRequired {
        /// The question the caller must confirm.
        prompt: String,
    },
    /// An import file contained no usable rows.
    NoValidRows,
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ConfirmationRequired { prompt } => {
                write!(f, "Confirmation required: {prompt}")
            }
            Self::NoValidRows => write!(f, "Nessun dato valido trovato nel file CSV"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidEditionYear(msg) => ApiError::InvalidInput {
            field: String::from("year"),
            message: msg,
        },
        DomainError::InvalidEditionName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::DuplicateEdition(id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_edition"),
            message: format!("Edition '{id}' already exists"),
        },
        DomainError::EditionNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Edition"),
            message: format!("Edition '{id}' does not exist"),
        },
        DomainError::NoEditions => ApiError::DomainRuleViolation {
            rule: String::from("edition_required"),
            message: String::from("No edition exists; create an edition first"),
        },
        DomainError::InvalidDescription(msg) => ApiError::InvalidInput {
            field: String::from("description"),
            message: msg,
        },
        DomainError::InvalidAmount { field, amount } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Amount {amount} is not allowed"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::EmptyPatch => ApiError::InvalidInput {
            field: String::from("patch"),
            message: String::from("At least one field must be provided"),
        },
        DomainError::TransactionNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Transaction"),
            message: format!("Transaction '{id}' does not exist"),
        },
        DomainError::ParticipantNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Participant"),
            message: format!("Participant '{id}' does not exist"),
        },
        DomainError::InvalidMoney(value) => ApiError::InvalidInput {
            field: String::from("amount"),
            message: format!("'{value}' is not a valid amount"),
        },
        DomainError::InvalidTransactionType(value) => ApiError::InvalidInput {
            field: String::from("type"),
            message: format!("'{value}' is not a transaction type"),
        },
        DomainError::InvalidSource(value) => ApiError::InvalidInput {
            field: String::from("source"),
            message: format!("'{value}' is not a transaction source"),
        },
        DomainError::InvalidBusRoute(value) => ApiError::InvalidInput {
            field: String::from("tappaPullman"),
            message: format!("'{value}' is not a bus route"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Only missing records are surfaced as such; every other storage failure
/// is reported as internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}
