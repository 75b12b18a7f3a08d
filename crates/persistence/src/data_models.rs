// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain records.

use diesel::prelude::*;
use epica_domain::{
    BusRoute, Edition, EditionId, Money, Participant, ParticipantDetails, ParticipantPatch,
    RecordId, SourceType, Transaction, TransactionDetails, TransactionType,
};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::diesel_schema::{editions, participants, transactions};
use crate::error::PersistenceError;

/// Storage format of transaction dates. Lexical order is date order.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a date for storage.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::QueryFailed(format!("Failed to format date {date}: {e}")))
}

fn corrupt(table: &'static str, id: &str, reason: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::CorruptRecord {
        table,
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

/// Diesel row for the `editions` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = editions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EditionRow {
    pub edition_id: String,
    pub year: String,
    pub name: String,
}

impl From<&Edition> for EditionRow {
    fn from(edition: &Edition) -> Self {
        Self {
            edition_id: edition.id.value().to_string(),
            year: edition.year.clone(),
            name: edition.name.clone(),
        }
    }
}

impl From<EditionRow> for Edition {
    fn from(row: EditionRow) -> Self {
        Self {
            id: EditionId::new(&row.edition_id),
            year: row.year,
            name: row.name,
        }
    }
}

/// Diesel row for the `transactions` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRow {
    pub row_seq: i64,
    pub transaction_id: String,
    pub edition_id: String,
    pub date: String,
    pub kind: String,
    pub source: String,
    pub person: String,
    pub description: String,
    pub amount_cents: i64,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = PersistenceError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "transactions";
        let id: &str = &row.transaction_id;

        let date: Date = Date::parse(&row.date, DATE_FORMAT).map_err(|e| corrupt(TABLE, id, e))?;
        let kind: TransactionType = row.kind.parse().map_err(|e| corrupt(TABLE, id, e))?;
        let source: SourceType = row.source.parse().map_err(|e| corrupt(TABLE, id, e))?;

        Ok(Self {
            id: RecordId::new(id),
            edition_id: EditionId::new(&row.edition_id),
            details: TransactionDetails {
                date,
                kind,
                source,
                person: row.person,
                description: row.description,
                amount: Money::from_cents(row.amount_cents),
            },
        })
    }
}

/// Insertable transaction row.
#[derive(Debug, Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransactionRow<'a> {
    pub transaction_id: &'a str,
    pub edition_id: &'a str,
    pub date: String,
    pub kind: &'static str,
    pub source: &'static str,
    pub person: &'a str,
    pub description: &'a str,
    pub amount_cents: i64,
}

impl<'a> NewTransactionRow<'a> {
    /// Builds the row for a transaction about to be created.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be formatted.
    pub fn new(
        transaction_id: &'a RecordId,
        edition_id: &'a EditionId,
        details: &'a TransactionDetails,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            transaction_id: transaction_id.value(),
            edition_id: edition_id.value(),
            date: format_date(details.date)?,
            kind: details.kind.as_str(),
            source: details.source.as_str(),
            person: &details.person,
            description: &details.description,
            amount_cents: details.amount.cents(),
        })
    }
}

/// Diesel row for the `participants` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = participants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ParticipantRow {
    pub row_seq: i64,
    pub participant_id: String,
    pub edition_id: String,
    pub nome: String,
    pub cognome: String,
    pub citta: String,
    pub cellulare: String,
    pub quota: String,
    pub taglia: String,
    pub pickup: String,
    pub tappa_pullman: String,
    pub pranzo: i32,
    pub notte_hotel: i32,
    pub ebike: i32,
    pub note: String,
    pub pagato_cents: i64,
}

impl TryFrom<ParticipantRow> for Participant {
    type Error = PersistenceError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let tappa_pullman: BusRoute = row
            .tappa_pullman
            .parse()
            .map_err(|e| corrupt("participants", &row.participant_id, e))?;

        Ok(Self {
            id: RecordId::new(&row.participant_id),
            edition_id: EditionId::new(&row.edition_id),
            details: ParticipantDetails {
                nome: row.nome,
                cognome: row.cognome,
                citta: row.citta,
                cellulare: row.cellulare,
                quota: row.quota,
                taglia: row.taglia,
                pickup: row.pickup,
                tappa_pullman,
                pranzo: row.pranzo != 0,
                notte_hotel: row.notte_hotel != 0,
                ebike: row.ebike != 0,
                note: row.note,
                pagato: Money::from_cents(row.pagato_cents),
            },
        })
    }
}

/// Insertable participant row.
#[derive(Debug, Insertable)]
#[diesel(table_name = participants)]
pub struct NewParticipantRow<'a> {
    pub participant_id: &'a str,
    pub edition_id: &'a str,
    pub nome: &'a str,
    pub cognome: &'a str,
    pub citta: &'a str,
    pub cellulare: &'a str,
    pub quota: &'a str,
    pub taglia: &'a str,
    pub pickup: &'a str,
    pub tappa_pullman: &'static str,
    pub pranzo: i32,
    pub notte_hotel: i32,
    pub ebike: i32,
    pub note: &'a str,
    pub pagato_cents: i64,
}

impl<'a> NewParticipantRow<'a> {
    /// Builds the row for a participant about to be created.
    #[must_use]
    pub fn new(
        participant_id: &'a RecordId,
        edition_id: &'a EditionId,
        details: &'a ParticipantDetails,
    ) -> Self {
        Self {
            participant_id: participant_id.value(),
            edition_id: edition_id.value(),
            nome: &details.nome,
            cognome: &details.cognome,
            citta: &details.citta,
            cellulare: &details.cellulare,
            quota: &details.quota,
            taglia: &details.taglia,
            pickup: &details.pickup,
            tappa_pullman: details.tappa_pullman.as_str(),
            pranzo: i32::from(details.pranzo),
            notte_hotel: i32::from(details.notte_hotel),
            ebike: i32::from(details.ebike),
            note: &details.note,
            pagato_cents: details.pagato.cents(),
        }
    }
}

/// Partial update of a participant row. `None` columns are left as is.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = participants)]
pub struct ParticipantChangeset<'a> {
    pub nome: Option<&'a str>,
    pub cognome: Option<&'a str>,
    pub citta: Option<&'a str>,
    pub cellulare: Option<&'a str>,
    pub quota: Option<&'a str>,
    pub taglia: Option<&'a str>,
    pub pickup: Option<&'a str>,
    pub tappa_pullman: Option<&'static str>,
    pub pranzo: Option<i32>,
    pub notte_hotel: Option<i32>,
    pub ebike: Option<i32>,
    pub note: Option<&'a str>,
    pub pagato_cents: Option<i64>,
}

impl<'a> From<&'a ParticipantPatch> for ParticipantChangeset<'a> {
    fn from(patch: &'a ParticipantPatch) -> Self {
        Self {
            nome: patch.nome.as_deref(),
            cognome: patch.cognome.as_deref(),
            citta: patch.citta.as_deref(),
            cellulare: patch.cellulare.as_deref(),
            quota: patch.quota.as_deref(),
            taglia: patch.taglia.as_deref(),
            pickup: patch.pickup.as_deref(),
            tappa_pullman: patch.tappa_pullman.map(|r| r.as_str()),
            pranzo: patch.pranzo.map(i32::from),
            notte_hotel: patch.notte_hotel.map(i32::from),
            ebike: patch.ebike.map(i32::from),
            note: patch.note.as_deref(),
            pagato_cents: patch.pagato.map(|m| m.cents()),
        }
    }
}
