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

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use epica_domain::{DomainError, Edition, EditionFilter, EditionId};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{Collection, Mutation, Snapshot};

/// Validates that an edition exists in the snapshot.
///
/// # Arguments
///
/// * `snapshot` - The snapshot to check
/// * `edition_id` - The edition to look for
///
/// # Errors
///
/// Returns `DomainError::EditionNotFound` if the edition has not been
/// created.
pub fn validate_edition_exists(
    snapshot: &Snapshot,
    edition_id: &EditionId,
) -> Result<(), DomainError> {
    if !snapshot.has_edition(edition_id) {
        return Err(DomainError::EditionNotFound(edition_id.value().to_string()));
    }
    Ok(())
}

/// Picks the edition that new records are written to.
///
/// A concrete filter is used as is. When every edition is selected, the
/// first edition in id order receives the records.
///
/// # Arguments
///
/// * `filter` - The currently selected edition scope
/// * `editions` - All editions, ordered by id
///
/// # Errors
///
/// Returns `DomainError::NoEditions` if the filter selects every edition
/// and none exist.
pub fn resolve_target_edition(
    filter: &EditionFilter,
    editions: &[Edition],
) -> Result<EditionId, DomainError> {
    match filter {
        EditionFilter::Edition(id) => Ok(id.clone()),
        EditionFilter::All => editions
            .iter()
            .map(|e| &e.id)
            .min()
            .cloned()
            .ok_or(DomainError::NoEditions),
    }
}
