// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use epica_domain::{Edition, EditionFilter};
use std::path::PathBuf;

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    first
        .upsert_edition(&Edition::new("2025", "Epica 2025"))
        .unwrap();

    assert_eq!(first.list_editions().unwrap().len(), 1);
    assert!(second.list_editions().unwrap().is_empty());
}

#[test]
fn test_new_database_is_empty() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let snapshot = persistence.load_snapshot().unwrap();
    assert!(snapshot.editions.is_empty());
    assert!(snapshot.transactions.is_empty());
    assert!(snapshot.participants.is_empty());
    assert!(
        persistence
            .list_participants(&EditionFilter::All)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_file_database_survives_reopen() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "epica_reopen_{}_{}.db",
        std::process::id(),
        crate::generate_record_id()
    ));

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .upsert_edition(&Edition::new("2025", "Epica 2025"))
            .unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let editions: Vec<Edition> = reopened.list_editions().unwrap();
    assert_eq!(editions, vec![Edition::new("2025", "Epica 2025")]);

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
