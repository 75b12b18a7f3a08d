// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort conversion of a registration export into participant
//! records.
//!
//! Columns are positional:
//! `gruppo, quota, nome, cognome, citta, cellulare, taglia, pickup`.
//! The first non-blank line is always treated as a header. Rows without a
//! first or last name are dropped without error.
//!
//! Quoting is a simple toggle: a `"` flips quoted mode and is never kept,
//! so a doubled quote inside a quoted field is not unescaped. Text written
//! by the transaction CSV export therefore does not read back verbatim
//! when a field contains a quote character.

use crate::money::Money;
use crate::types::{BusRoute, ParticipantDetails};

const DEFAULT_TAGLIA: &str = "M";

/// Result of parsing an import file, including how many rows were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvImportReport {
    /// Records that survived normalization, in file order.
    pub records: Vec<ParticipantDetails>,
    /// Number of non-blank data rows after the header.
    pub data_rows: usize,
}

impl CsvImportReport {
    /// Returns the number of data rows dropped for missing names.
    #[must_use]
    pub const fn rejected_rows(&self) -> usize {
        self.data_rows.saturating_sub(self.records.len())
    }
}

/// Parses raw import text into participant records.
///
/// # Arguments
///
/// * `raw` - The full file contents
#[must_use]
pub fn parse_participant_csv(raw: &str) -> Vec<ParticipantDetails> {
    parse_participant_csv_report(raw).records
}

/// Parses raw import text and reports how many data rows were rejected.
#[must_use]
pub fn parse_participant_csv_report(raw: &str) -> CsvImportReport {
    let lines: Vec<&str> = raw.split('\n').filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return CsvImportReport::default();
    }

    let data_lines: &[&str] = &lines[1..];
    let records: Vec<ParticipantDetails> = data_lines
        .iter()
        .map(|line| participant_from_columns(&tokenize_line(line)))
        .filter(|p| !p.nome.is_empty() && !p.cognome.is_empty())
        .collect();

    CsvImportReport {
        records,
        data_rows: data_lines.len(),
    }
}

/// Splits one line on `,`, `;` or tab outside double quotes and trims
/// each field.
#[must_use]
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let mut current: String = String::new();
    let mut in_quotes: bool = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' | ';' | '\t' if !in_quotes => {
                columns.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    columns.push(current.trim().to_string());

    columns
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect()
    })
}

/// Assigns a bus route from the group and pickup columns.
///
/// Evening returns take precedence over the generic bus groups.
#[must_use]
pub fn derive_bus_route(gruppo: &str, quota: &str, pickup: &str) -> BusRoute {
    let gruppo: String = gruppo.to_lowercase();
    let pickup: String = pickup.to_lowercase();

    if gruppo.contains("domenica sera") || gruppo.contains("domenica ritorno") {
        BusRoute::SundayEveningReturn
    } else if gruppo.contains("sabato sera") || gruppo.contains("sabato ritorno") {
        BusRoute::SaturdayEveningReturn
    } else if gruppo.contains("bus") || gruppo.contains("pullman") {
        if pickup.contains("esine") {
            BusRoute::EsineToPonteDiLegno
        } else if pickup.contains("rogno") || quota.to_lowercase().contains("rogno") {
            BusRoute::RognoToPonteDiLegno
        } else {
            BusRoute::PisogneToPonteDiLegno
        }
    } else {
        BusRoute::NoRoute
    }
}

fn participant_from_columns(columns: &[String]) -> ParticipantDetails {
    let column = |index: usize| columns.get(index).map_or("", String::as_str);

    let gruppo: &str = column(0);
    let quota: &str = column(1);
    let pickup: &str = column(7);
    let taglia: String = column(6).to_uppercase();

    ParticipantDetails {
        nome: title_case(column(2)),
        cognome: title_case(column(3)),
        citta: column(4).to_string(),
        cellulare: column(5).to_string(),
        quota: quota.to_string(),
        taglia: if taglia.is_empty() {
            String::from(DEFAULT_TAGLIA)
        } else {
            taglia
        },
        pickup: pickup.to_string(),
        tappa_pullman: derive_bus_route(gruppo, quota, pickup),
        pranzo: quota.to_lowercase().contains("pranzo"),
        notte_hotel: false,
        ebike: false,
        note: String::new(),
        pagato: Money::ZERO,
    }
}
