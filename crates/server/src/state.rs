// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared application state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use epica_api::NarrativeClient;
use epica_persistence::Persistence;
use tokio::sync::Mutex;

use crate::live::LiveEventBroadcaster;

/// Marks a long-running operation as in progress.
///
/// At most one guard exists at a time; it clears the flag when dropped.
#[derive(Debug, Default)]
pub struct BusyFlag {
    busy: AtomicBool,
}

impl BusyFlag {
    /// Marks the operation as started, or returns `None` if it already is.
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { flag: &self.busy })
    }
}

/// Clears its [`BusyFlag`] on drop.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Application state shared across handlers.
///
/// The store sits behind a single async mutex; every read and write
/// takes it for the duration of one API call.
#[derive(Clone)]
pub struct AppState {
    /// The record store.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Pushes collection snapshots to live subscribers.
    pub broadcaster: Arc<LiveEventBroadcaster>,
    /// Backend for stats commentary.
    pub narrative: Arc<dyn NarrativeClient>,
    /// Set while a CSV import is running.
    pub import_busy: Arc<BusyFlag>,
    /// Set while an analysis request is running.
    pub analysis_busy: Arc<BusyFlag>,
    /// Person recorded on transactions that name nobody.
    pub staff_member: String,
}

impl AppState {
    /// Creates the state around an opened store and a narrative backend.
    pub fn new(
        persistence: Persistence,
        narrative: Arc<dyn NarrativeClient>,
        staff_member: &str,
    ) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
            narrative,
            import_busy: Arc::new(BusyFlag::default()),
            analysis_busy: Arc::new(BusyFlag::default()),
            staff_member: staff_member.to_string(),
        }
    }
}
