// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BusRoute, CsvImportReport, Money, ParticipantDetails, derive_bus_route, parse_participant_csv,
    parse_participant_csv_report, title_case, tokenize_line,
};

const HEADER: &str = "Gruppo,Quota,Nome,Cognome,Citta,Cellulare,Taglia,Pickup";

#[test]
fn test_single_bus_row() {
    let raw: String = format!("{HEADER}\nBus,Quota pranzo,mario,rossi,Brescia,3331234567,l,Esine");

    let records: Vec<ParticipantDetails> = parse_participant_csv(&raw);
    assert_eq!(records.len(), 1);

    let record: &ParticipantDetails = &records[0];
    assert_eq!(record.nome, "Mario");
    assert_eq!(record.cognome, "Rossi");
    assert_eq!(record.citta, "Brescia");
    assert_eq!(record.cellulare, "3331234567");
    assert_eq!(record.quota, "Quota pranzo");
    assert_eq!(record.taglia, "L");
    assert_eq!(record.pickup, "Esine");
    assert!(record.pranzo);
    assert_eq!(record.tappa_pullman, BusRoute::EsineToPonteDiLegno);
    assert_eq!(record.tappa_pullman.as_str(), "esine - ponte di legno");
    assert_eq!(record.pagato, Money::ZERO);
    assert!(!record.notte_hotel);
    assert!(!record.ebike);
    assert_eq!(record.note, "");
}

#[test]
fn test_header_only_yields_nothing() {
    assert!(parse_participant_csv(HEADER).is_empty());
    assert!(parse_participant_csv("").is_empty());
    assert!(parse_participant_csv(&format!("\n  \n{HEADER}\n\n")).is_empty());
}

#[test]
fn test_first_line_is_always_header() {
    let raw: &str = "Bus,,luca,neri\nBus,,anna,verdi";

    let records: Vec<ParticipantDetails> = parse_participant_csv(raw);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].nome, "Anna");
}

#[test]
fn test_blank_lines_are_skipped() {
    let raw: String = format!("\n{HEADER}\n\n   \nBus,,anna,verdi\n\t\n");

    let report: CsvImportReport = parse_participant_csv_report(&raw);
    assert_eq!(report.data_rows, 1);
    assert_eq!(report.records.len(), 1);
}

#[test]
fn test_rows_without_names_are_dropped() {
    let raw: String = format!(
        "{HEADER}\n\
         Bus,,anna,verdi\n\
         Bus,,,bianchi\n\
         Bus,,paolo,\n\
         ,,giulia,neri\n\
         only-one-column"
    );

    let report: CsvImportReport = parse_participant_csv_report(&raw);
    assert_eq!(report.data_rows, 5);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.rejected_rows(), 3);
    assert_eq!(report.records[0].cognome, "Verdi");
    assert_eq!(report.records[1].cognome, "Neri");
}

#[test]
fn test_quoted_field_keeps_separator() {
    let raw: String = format!("{HEADER}\nBus,\"Rossi, Mario\",anna,verdi,Brescia");

    let records: Vec<ParticipantDetails> = parse_participant_csv(&raw);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].quota, "Rossi, Mario");
    assert_eq!(records[0].nome, "Anna");
    assert_eq!(records[0].citta, "Brescia");
}

#[test]
fn test_tokenizer_separators_and_trimming() {
    assert_eq!(tokenize_line("a;b\tc , d"), vec!["a", "b", "c", "d"]);
    assert_eq!(tokenize_line("a,"), vec!["a", ""]);
    assert_eq!(tokenize_line(""), vec![""]);
    assert_eq!(tokenize_line("\"x;y\"\t z "), vec!["x;y", "z"]);
}

#[test]
fn test_tokenizer_does_not_unescape_doubled_quotes() {
    assert_eq!(tokenize_line("\"say \"\"hi\"\"\",next"), vec!["say hi", "next"]);
}

#[test]
fn test_windows_line_endings() {
    let raw: &str = "Gruppo,Quota,Nome,Cognome\r\nBus,,anna,verdi\r\n";

    let records: Vec<ParticipantDetails> = parse_participant_csv(raw);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].cognome, "Verdi");
}

#[test]
fn test_taglia_defaults_and_uppercases() {
    let raw: String = format!("{HEADER}\nBus,,anna,verdi\nBus,,luca,neri,,,xl\nBus,,ugo,foschi,,,,");

    let records: Vec<ParticipantDetails> = parse_participant_csv(&raw);
    assert_eq!(records[0].taglia, "M");
    assert_eq!(records[1].taglia, "XL");
    assert_eq!(records[2].taglia, "M");
}

#[test]
fn test_bus_route_precedence() {
    assert_eq!(
        derive_bus_route("Bus domenica sera", "", "Esine"),
        BusRoute::SundayEveningReturn
    );
    assert_eq!(
        derive_bus_route("Pullman DOMENICA RITORNO", "", ""),
        BusRoute::SundayEveningReturn
    );
    assert_eq!(
        derive_bus_route("bus sabato sera", "", "rogno"),
        BusRoute::SaturdayEveningReturn
    );
    assert_eq!(
        derive_bus_route("Sabato ritorno", "", ""),
        BusRoute::SaturdayEveningReturn
    );
}

#[test]
fn test_bus_route_pickup_dispatch() {
    assert_eq!(
        derive_bus_route("BUS", "", "ESINE stazione"),
        BusRoute::EsineToPonteDiLegno
    );
    assert_eq!(
        derive_bus_route("pullman", "", "Rogno"),
        BusRoute::RognoToPonteDiLegno
    );
    assert_eq!(
        derive_bus_route("pullman", "Quota Rogno", ""),
        BusRoute::RognoToPonteDiLegno
    );
    assert_eq!(
        derive_bus_route("Bus", "", "Darfo"),
        BusRoute::PisogneToPonteDiLegno
    );
    assert_eq!(
        derive_bus_route("Gara", "Quota Rogno", "Esine"),
        BusRoute::NoRoute
    );
}

#[test]
fn test_title_case_single_split() {
    assert_eq!(title_case("mARIO"), "Mario");
    assert_eq!(title_case("de luca"), "De luca");
    assert_eq!(title_case("élodie"), "Élodie");
    assert_eq!(title_case(""), "");
}

#[test]
fn test_pranzo_is_case_insensitive() {
    let raw: String = format!("{HEADER}\nGara,QUOTA CON PRANZO,anna,verdi\nGara,Base,luca,neri");

    let records: Vec<ParticipantDetails> = parse_participant_csv(&raw);
    assert!(records[0].pranzo);
    assert!(!records[1].pranzo);
    assert_eq!(records[0].tappa_pullman, BusRoute::NoRoute);
}

#[test]
fn test_same_text_parses_identically() {
    let raw: String = format!("{HEADER}\nBus,,anna,verdi\nBus,,luca,neri");
    assert_eq!(parse_participant_csv(&raw), parse_participant_csv(&raw));
}
