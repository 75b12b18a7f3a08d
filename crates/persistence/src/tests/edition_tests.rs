// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_participant_details, create_test_persistence};
use crate::{Persistence, PersistenceError};
use epica_domain::{Edition, EditionFilter, EditionId};

#[test]
fn test_editions_listed_by_id() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for year in ["2025", "2023", "2024"] {
        persistence
            .upsert_edition(&Edition::new(year, &format!("Epica {year}")))
            .unwrap();
    }

    let ids: Vec<String> = persistence
        .list_editions()
        .unwrap()
        .into_iter()
        .map(|e| e.id.value().to_string())
        .collect();
    assert_eq!(ids, vec!["2023", "2024", "2025"]);
}

#[test]
fn test_upsert_replaces_existing_edition() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .upsert_edition(&Edition::new("2025", "Epica Camonica 2025"))
        .unwrap();

    let editions: Vec<Edition> = persistence.list_editions().unwrap();
    assert_eq!(editions.len(), 2);
    assert_eq!(editions[1].name, "Epica Camonica 2025");
}

#[test]
fn test_edition_exists() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(persistence.edition_exists(&EditionId::new("2024")).unwrap());
    assert!(!persistence.edition_exists(&EditionId::new("2030")).unwrap());
}

#[test]
fn test_delete_edition_keeps_records() {
    let mut persistence: Persistence = create_test_persistence();
    let edition_id: EditionId = EditionId::new("2024");
    persistence
        .create_participant(&edition_id, &create_test_participant_details("Anna", "Verdi"))
        .unwrap();

    persistence.delete_edition(&edition_id).unwrap();

    assert!(!persistence.edition_exists(&edition_id).unwrap());
    let orphaned = persistence
        .list_participants(&EditionFilter::Edition(edition_id))
        .unwrap();
    assert_eq!(orphaned.len(), 1);
}

#[test]
fn test_delete_missing_edition_fails() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<(), PersistenceError> =
        persistence.delete_edition(&EditionId::new("1999"));
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
