// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::{MAX_AMOUNT_CENTS, Money};
use crate::types::{Edition, EditionId, ParticipantDetails, ParticipantPatch};

/// Validates the fields of a new edition.
///
/// # Errors
///
/// Returns an error if the year or the name is blank.
pub fn validate_edition_fields(edition: &Edition) -> Result<(), DomainError> {
    if edition.year.trim().is_empty() {
        return Err(DomainError::InvalidEditionYear(String::from(
            "Year cannot be empty",
        )));
    }

    if edition.name.trim().is_empty() {
        return Err(DomainError::InvalidEditionName(String::from(
            "Name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that an edition id is not already taken.
///
/// # Errors
///
/// Returns `DomainError::DuplicateEdition` if `existing` contains `id`.
pub fn validate_edition_unique(existing: &[Edition], id: &EditionId) -> Result<(), DomainError> {
    if existing.iter().any(|e| &e.id == id) {
        return Err(DomainError::DuplicateEdition(id.value().to_string()));
    }
    Ok(())
}

/// Validates the user-entered fields of a transaction.
///
/// # Arguments
///
/// * `description` - What the money was for
/// * `amount` - The magnitude; the direction is carried by the type
///
/// # Errors
///
/// Returns an error if:
/// - The description is blank
/// - The amount is zero or negative
/// - The amount exceeds [`MAX_AMOUNT_CENTS`]
pub fn validate_transaction_fields(description: &str, amount: Money) -> Result<(), DomainError> {
    if description.trim().is_empty() {
        return Err(DomainError::InvalidDescription(String::from(
            "Description cannot be empty",
        )));
    }

    if !amount.is_positive() || !amount.is_within_record_limit() {
        return Err(DomainError::InvalidAmount {
            field: "amount",
            amount,
        });
    }

    Ok(())
}

/// Validates a participant record before it is written.
///
/// # Errors
///
/// Returns an error if:
/// - `nome` or `cognome` is blank
/// - `pagato` is negative or exceeds [`MAX_AMOUNT_CENTS`]
pub fn validate_participant_details(details: &ParticipantDetails) -> Result<(), DomainError> {
    if details.nome.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "First name cannot be empty",
        )));
    }

    if details.cognome.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Last name cannot be empty",
        )));
    }

    if details.pagato.is_negative() || !details.pagato.is_within_record_limit() {
        return Err(DomainError::InvalidAmount {
            field: "pagato",
            amount: details.pagato,
        });
    }

    Ok(())
}

/// Validates a participant patch against the record it will modify.
///
/// # Errors
///
/// Returns an error if the patch is empty or if the patched record would
/// fail [`validate_participant_details`].
pub fn validate_participant_patch(
    current: &ParticipantDetails,
    patch: &ParticipantPatch,
) -> Result<(), DomainError> {
    if patch.is_empty() {
        return Err(DomainError::EmptyPatch);
    }
    validate_participant_details(&patch.apply_to(current))
}
