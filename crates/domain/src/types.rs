// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Identifier of an event edition.
///
/// Editions are keyed by their year, so the identifier of a freshly
/// created edition is the year text itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditionId(String);

impl EditionId {
    /// Creates a new edition identifier, trimming surrounding whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned identifier of a transaction or participant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One instance of the recurring event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    pub id: EditionId,
    pub year: String,
    pub name: String,
}

impl Edition {
    /// Creates an edition keyed by its year.
    ///
    /// # Arguments
    ///
    /// * `year` - The edition year, also used as the identifier
    /// * `name` - The display name
    #[must_use]
    pub fn new(year: &str, name: &str) -> Self {
        let year: String = year.trim().to_string();
        Self {
            id: EditionId::new(&year),
            year,
            name: name.trim().to_string(),
        }
    }
}

/// Direction of a transaction. The stored amount is always a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "ENTRATA")]
    Income,
    #[serde(rename = "USCITA")]
    Expense,
}

impl TransactionType {
    /// Returns the stored tag for this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "ENTRATA",
            Self::Expense => "USCITA",
        }
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENTRATA" => Ok(Self::Income),
            "USCITA" => Ok(Self::Expense),
            _ => Err(DomainError::InvalidTransactionType(s.to_string())),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The channel that received or paid the money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SourceType {
    /// The external registration platform.
    #[serde(rename = "ENDU")]
    Endu,
    /// Cash or a staff member's own pocket.
    #[default]
    #[serde(rename = "CONTANTI/PERSONALE")]
    Cash,
}

impl SourceType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Endu => "ENDU",
            Self::Cash => "CONTANTI/PERSONALE",
        }
    }
}

impl FromStr for SourceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENDU" => Ok(Self::Endu),
            "CONTANTI/PERSONALE" => Ok(Self::Cash),
            _ => Err(DomainError::InvalidSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shuttle bus assignment for a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusRoute {
    #[serde(rename = "pisogne - ponte di legno")]
    PisogneToPonteDiLegno,
    #[serde(rename = "esine - ponte di legno")]
    EsineToPonteDiLegno,
    #[serde(rename = "rogno - ponte di legno")]
    RognoToPonteDiLegno,
    /// Return trip on Saturday evening.
    #[serde(rename = "pisogne - ponte di legno SABATO SERA")]
    SaturdayEveningReturn,
    /// Return trip on Sunday evening.
    #[serde(rename = "pisogne - ponte di legno DOMENICA SERA")]
    SundayEveningReturn,
    /// No bus booked.
    #[default]
    #[serde(rename = "nessuna")]
    NoRoute,
}

impl BusRoute {
    /// All routes in display order.
    pub const ALL: [Self; 6] = [
        Self::PisogneToPonteDiLegno,
        Self::EsineToPonteDiLegno,
        Self::RognoToPonteDiLegno,
        Self::SaturdayEveningReturn,
        Self::SundayEveningReturn,
        Self::NoRoute,
    ];

    /// Returns the stored token for this route.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PisogneToPonteDiLegno => "pisogne - ponte di legno",
            Self::EsineToPonteDiLegno => "esine - ponte di legno",
            Self::RognoToPonteDiLegno => "rogno - ponte di legno",
            Self::SaturdayEveningReturn => "pisogne - ponte di legno SABATO SERA",
            Self::SundayEveningReturn => "pisogne - ponte di legno DOMENICA SERA",
            Self::NoRoute => "nessuna",
        }
    }

    /// Returns the human-readable label shown next to the route.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PisogneToPonteDiLegno => "Pisogne - Ponte di Legno",
            Self::EsineToPonteDiLegno => "Esine - Ponte di Legno",
            Self::RognoToPonteDiLegno => "Rogno - Ponte di Legno",
            Self::SaturdayEveningReturn => "Pisogne - Ponte di Legno (Sabato sera)",
            Self::SundayEveningReturn => "Pisogne - Ponte di Legno (Domenica sera)",
            Self::NoRoute => "Nessuna tratta bus",
        }
    }

    /// Returns whether a seat on a bus is booked.
    #[must_use]
    pub const fn uses_bus(&self) -> bool {
        !matches!(self, Self::NoRoute)
    }
}

impl FromStr for BusRoute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|route| route.as_str() == s)
            .ok_or_else(|| DomainError::InvalidBusRoute(s.to_string()))
    }
}

impl std::fmt::Display for BusRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of a transaction that are chosen by the person recording it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    #[serde(with = "iso_date")]
    pub date: time::Date,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub source: SourceType,
    pub person: String,
    pub description: String,
    pub amount: Money,
}

/// A dated income or expense entry tied to an edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    pub edition_id: EditionId,
    #[serde(flatten)]
    pub details: TransactionDetails,
}

/// Participant fields without store identity.
///
/// This is the shape produced by CSV import and accepted by the
/// registration form; the identifier and edition are attached at write
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantDetails {
    pub nome: String,
    pub cognome: String,
    pub citta: String,
    pub cellulare: String,
    pub quota: String,
    /// Jersey size code.
    pub taglia: String,
    pub pickup: String,
    pub tappa_pullman: BusRoute,
    /// Lunch included.
    pub pranzo: bool,
    /// Hotel night included.
    pub notte_hotel: bool,
    pub ebike: bool,
    pub note: String,
    /// Amount already paid.
    pub pagato: Money,
}

/// A registered attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: RecordId,
    pub edition_id: EditionId,
    #[serde(flatten)]
    pub details: ParticipantDetails,
}

/// Field-by-field update of a participant. Absent fields are left as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantPatch {
    pub nome: Option<String>,
    pub cognome: Option<String>,
    pub citta: Option<String>,
    pub cellulare: Option<String>,
    pub quota: Option<String>,
    pub taglia: Option<String>,
    pub pickup: Option<String>,
    pub tappa_pullman: Option<BusRoute>,
    pub pranzo: Option<bool>,
    pub notte_hotel: Option<bool>,
    pub ebike: Option<bool>,
    pub note: Option<String>,
    pub pagato: Option<Money>,
}

impl ParticipantPatch {
    /// Returns whether the patch carries no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.cognome.is_none()
            && self.citta.is_none()
            && self.cellulare.is_none()
            && self.quota.is_none()
            && self.taglia.is_none()
            && self.pickup.is_none()
            && self.tappa_pullman.is_none()
            && self.pranzo.is_none()
            && self.notte_hotel.is_none()
            && self.ebike.is_none()
            && self.note.is_none()
            && self.pagato.is_none()
    }

    /// Returns a copy of `details` with the patched fields replaced.
    #[must_use]
    pub fn apply_to(&self, details: &ParticipantDetails) -> ParticipantDetails {
        fn pick<T: Clone>(patched: Option<&T>, current: &T) -> T {
            patched.unwrap_or(current).clone()
        }

        ParticipantDetails {
            nome: pick(self.nome.as_ref(), &details.nome),
            cognome: pick(self.cognome.as_ref(), &details.cognome),
            citta: pick(self.citta.as_ref(), &details.citta),
            cellulare: pick(self.cellulare.as_ref(), &details.cellulare),
            quota: pick(self.quota.as_ref(), &details.quota),
            taglia: pick(self.taglia.as_ref(), &details.taglia),
            pickup: pick(self.pickup.as_ref(), &details.pickup),
            tappa_pullman: self.tappa_pullman.unwrap_or(details.tappa_pullman),
            pranzo: self.pranzo.unwrap_or(details.pranzo),
            notte_hotel: self.notte_hotel.unwrap_or(details.notte_hotel),
            ebike: self.ebike.unwrap_or(details.ebike),
            note: pick(self.note.as_ref(), &details.note),
            pagato: self.pagato.unwrap_or(details.pagato),
        }
    }
}

/// Edition scope used by listings and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EditionFilter {
    /// Every edition.
    #[default]
    All,
    /// A single edition.
    Edition(EditionId),
}

impl EditionFilter {
    /// The wire sentinel selecting every edition.
    pub const ALL_SENTINEL: &'static str = "all";

    /// Returns whether a record belonging to `edition_id` is in scope.
    #[must_use]
    pub fn matches(&self, edition_id: &EditionId) -> bool {
        match self {
            Self::All => true,
            Self::Edition(id) => id == edition_id,
        }
    }
}

impl From<String> for EditionFilter {
    fn from(value: String) -> Self {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() || trimmed == Self::ALL_SENTINEL {
            Self::All
        } else {
            Self::Edition(EditionId::new(trimmed))
        }
    }
}

impl From<EditionFilter> for String {
    fn from(value: EditionFilter) -> Self {
        match value {
            EditionFilter::All => EditionFilter::ALL_SENTINEL.to_string(),
            EditionFilter::Edition(id) => id.0,
        }
    }
}

impl FromStr for EditionFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl std::fmt::Display for EditionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_SENTINEL),
            Self::Edition(id) => f.write_str(id.value()),
        }
    }
}
