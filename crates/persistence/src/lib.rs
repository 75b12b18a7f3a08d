// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record store for the Epica event ledger.
//!
//! Holds the three collections (editions, transactions, participants) in
//! `SQLite` through Diesel. The store is the single source of truth:
//! callers never mutate local copies, they persist a validated
//! `Mutation` and read the collections back.
//!
//! ## Identity
//!
//! - Editions are written under their own id (the edition year)
//! - Transactions and participants receive a generated 20-character
//!   alphanumeric id on creation
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller an isolated shared
//! in-memory database, so tests never touch the filesystem.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use epica::{Mutation, Snapshot};
use epica_domain::{
    Edition, EditionFilter, EditionId, Participant, ParticipantDetails, ParticipantPatch,
    RecordId, Transaction, TransactionDetails,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::{PersistMutationResult, generate_record_id};

/// Persistence adapter for the record collections.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_epica_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Performs the single write described by a validated mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the targeted record does not
    /// exist.
    pub fn persist_mutation(
        &mut self,
        mutation: &Mutation,
    ) -> Result<PersistMutationResult, PersistenceError> {
        mutations::persist_mutation(&mut self.conn, mutation)
    }

    /// Writes an edition under its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_edition(&mut self, edition: &Edition) -> Result<(), PersistenceError> {
        mutations::editions::upsert_edition(&mut self.conn, edition)
    }

    /// Deletes an edition without touching the records that reference it.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the edition does not exist.
    pub fn delete_edition(&mut self, edition_id: &EditionId) -> Result<(), PersistenceError> {
        mutations::editions::delete_edition(&mut self.conn, edition_id)
    }

    /// Creates a transaction and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_transaction(
        &mut self,
        edition_id: &EditionId,
        details: &TransactionDetails,
    ) -> Result<RecordId, PersistenceError> {
        mutations::transactions::create_transaction(&mut self.conn, edition_id, details)
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the transaction does not exist.
    pub fn delete_transaction(&mut self, transaction_id: &RecordId) -> Result<(), PersistenceError> {
        mutations::transactions::delete_transaction(&mut self.conn, transaction_id)
    }

    /// Creates a participant and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_participant(
        &mut self,
        edition_id: &EditionId,
        details: &ParticipantDetails,
    ) -> Result<RecordId, PersistenceError> {
        mutations::participants::create_participant(&mut self.conn, edition_id, details)
    }

    /// Replaces the fields present in `patch`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the participant does not exist.
    pub fn patch_participant(
        &mut self,
        participant_id: &RecordId,
        patch: &ParticipantPatch,
    ) -> Result<(), PersistenceError> {
        mutations::participants::patch_participant(&mut self.conn, participant_id, patch)
    }

    /// Deletes a participant.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the participant does not exist.
    pub fn delete_participant(&mut self, participant_id: &RecordId) -> Result<(), PersistenceError> {
        mutations::participants::delete_participant(&mut self.conn, participant_id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lists all editions ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_editions(&mut self) -> Result<Vec<Edition>, PersistenceError> {
        queries::editions::list_editions(&mut self.conn)
    }

    /// Checks whether an edition exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn edition_exists(&mut self, edition_id: &EditionId) -> Result<bool, PersistenceError> {
        queries::editions::edition_exists(&mut self.conn, edition_id)
    }

    /// Lists transactions in scope, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_transactions(
        &mut self,
        filter: &EditionFilter,
    ) -> Result<Vec<Transaction>, PersistenceError> {
        queries::transactions::list_transactions(&mut self.conn, filter)
    }

    /// Lists participants in scope in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_participants(
        &mut self,
        filter: &EditionFilter,
    ) -> Result<Vec<Participant>, PersistenceError> {
        queries::participants::list_participants(&mut self.conn, filter)
    }

    /// Retrieves a participant by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_participant(
        &mut self,
        participant_id: &RecordId,
    ) -> Result<Option<Participant>, PersistenceError> {
        queries::participants::get_participant(&mut self.conn, participant_id)
    }

    /// Reads all three collections.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub fn load_snapshot(&mut self) -> Result<Snapshot, PersistenceError> {
        Ok(Snapshot::new(
            self.list_editions()?,
            self.list_transactions(&EditionFilter::All)?,
            self.list_participants(&EditionFilter::All)?,
        ))
    }
}
