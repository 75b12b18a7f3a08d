// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_participant_details, create_test_persistence};
use crate::{Persistence, PersistenceError};
use epica_domain::{
    BusRoute, EditionFilter, EditionId, Money, Participant, ParticipantDetails, ParticipantPatch,
    RecordId,
};

#[test]
fn test_create_and_read_back_participant() {
    let mut persistence: Persistence = create_test_persistence();
    let details: ParticipantDetails = ParticipantDetails {
        citta: String::from("Brescia"),
        cellulare: String::from("3331234567"),
        quota: String::from("Quota pranzo"),
        taglia: String::from("L"),
        pickup: String::from("Esine"),
        tappa_pullman: BusRoute::EsineToPonteDiLegno,
        pranzo: true,
        notte_hotel: true,
        ebike: true,
        note: String::from("Vegetariano"),
        pagato: Money::from_cents(4550),
        ..create_test_participant_details("Mario", "Rossi")
    };

    let participant_id: RecordId = persistence
        .create_participant(&EditionId::new("2025"), &details)
        .unwrap();

    let stored: Participant = persistence
        .get_participant(&participant_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.edition_id, EditionId::new("2025"));
    assert_eq!(stored.details, details);
}

#[test]
fn test_participants_keep_registration_order() {
    let mut persistence: Persistence = create_test_persistence();
    let edition_id: EditionId = EditionId::new("2025");

    for (nome, cognome) in [("Zeno", "Alpi"), ("Anna", "Verdi"), ("Luca", "Neri")] {
        persistence
            .create_participant(&edition_id, &create_test_participant_details(nome, cognome))
            .unwrap();
    }

    let names: Vec<String> = persistence
        .list_participants(&EditionFilter::Edition(edition_id))
        .unwrap()
        .into_iter()
        .map(|p| p.details.nome)
        .collect();
    assert_eq!(names, vec!["Zeno", "Anna", "Luca"]);
}

#[test]
fn test_patch_updates_only_given_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let participant_id: RecordId = persistence
        .create_participant(
            &EditionId::new("2025"),
            &create_test_participant_details("Mario", "Rossi"),
        )
        .unwrap();

    let patch: ParticipantPatch = ParticipantPatch {
        ebike: Some(true),
        tappa_pullman: Some(BusRoute::SundayEveningReturn),
        pagato: Some(Money::from_cents(3000)),
        ..ParticipantPatch::default()
    };
    persistence
        .patch_participant(&participant_id, &patch)
        .unwrap();

    let stored: Participant = persistence
        .get_participant(&participant_id)
        .unwrap()
        .unwrap();
    assert!(stored.details.ebike);
    assert_eq!(stored.details.tappa_pullman, BusRoute::SundayEveningReturn);
    assert_eq!(stored.details.pagato, Money::from_cents(3000));
    assert_eq!(stored.details.nome, "Mario");
    assert_eq!(stored.details.taglia, "M");
}

#[test]
fn test_empty_patch_is_noop() {
    let mut persistence: Persistence = create_test_persistence();
    let details: ParticipantDetails = create_test_participant_details("Mario", "Rossi");
    let participant_id: RecordId = persistence
        .create_participant(&EditionId::new("2025"), &details)
        .unwrap();

    persistence
        .patch_participant(&participant_id, &ParticipantPatch::default())
        .unwrap();

    let stored: Participant = persistence
        .get_participant(&participant_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.details, details);
}

#[test]
fn test_patch_missing_participant_fails() {
    let mut persistence: Persistence = create_test_persistence();
    let missing: RecordId = RecordId::new("missing");
    let patch: ParticipantPatch = ParticipantPatch {
        note: Some(String::from("x")),
        ..ParticipantPatch::default()
    };

    assert!(matches!(
        persistence.patch_participant(&missing, &patch),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.patch_participant(&missing, &ParticipantPatch::default()),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_delete_participant() {
    let mut persistence: Persistence = create_test_persistence();
    let participant_id: RecordId = persistence
        .create_participant(
            &EditionId::new("2025"),
            &create_test_participant_details("Anna", "Verdi"),
        )
        .unwrap();

    persistence.delete_participant(&participant_id).unwrap();

    assert!(persistence.get_participant(&participant_id).unwrap().is_none());
    assert!(matches!(
        persistence.delete_participant(&participant_id),
        Err(PersistenceError::NotFound(_))
    ));
}
