//! Debounced persistence of editor changes.
//!
//! Editor keystrokes fire change events far more often than is useful to
//! persist. The persister compares each observed file tree against a
//! private baseline (the last snapshot confirmed written or loaded) and,
//! on a genuine change, arms a quiet-period timer. Further changes inside
//! the window cancel and re-arm it, so exactly one write reflects the
//! latest state of any burst.
//!
//! The baseline is replaced optimistically the moment a change is
//! observed; the detector can therefore never re-trigger on its own
//! just-observed state. Persistence is best-effort: a failed save is
//! logged and superseded by the next natural change event, and an
//! unfired timer is dropped on teardown rather than flushed.

use crate::router::{BackendRouter, ProjectSeed};
use siteforge_core::fileset::FileSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

struct PersisterState {
    /// Last file set confirmed written to or loaded from the backend.
    /// `None` until the first observation establishes it.
    baseline: Option<FileSet>,
    /// The armed quiet-period timer, if any.
    pending: Option<JoinHandle<()>>,
}

/// Coalesces bursts of file-tree changes into a single backend write
/// after a quiet period.
pub struct DebouncedPersister {
    router: Arc<BackendRouter>,
    quiet: Duration,
    state: Mutex<PersisterState>,
    saving: Arc<AtomicBool>,
}

impl DebouncedPersister {
    /// Creates a persister writing through the given router after
    /// `quiet` of silence.
    pub fn new(router: Arc<BackendRouter>, quiet: Duration) -> Self {
        Self {
            router,
            quiet,
            state: Mutex::new(PersisterState {
                baseline: None,
                pending: None,
            }),
            saving: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Feeds the current file tree to the change detector.
    ///
    /// The first observation only establishes the baseline. Afterwards,
    /// an observation that differs from the baseline replaces it and
    /// (re)arms the save timer. Returns whether a save was scheduled.
    pub fn observe(&self, current: &FileSet, seed: &ProjectSeed) -> bool {
        let mut state = self.state.lock().unwrap();
        match &state.baseline {
            None => {
                state.baseline = Some(current.clone());
                return false;
            }
            Some(baseline) if !current.differs_from(baseline) => return false,
            Some(_) => {}
        }

        state.baseline = Some(current.clone());
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
        self.saving.store(true, Ordering::SeqCst);

        let router = self.router.clone();
        let snapshot = current.clone();
        let seed = seed.clone();
        let quiet = self.quiet;
        let saving = self.saving.clone();
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            match router.save_files(&snapshot, &seed).await {
                Ok(()) => {
                    tracing::debug!(files = snapshot.len(), "auto-saved file tree");
                    saving.store(false, Ordering::SeqCst);
                }
                Err(err) => {
                    // Best-effort: the edit stays in memory and the next
                    // change event produces a fresh save attempt.
                    tracing::warn!(error = %err, "auto-save failed");
                }
            }
        }));
        true
    }

    /// Replaces the baseline with a snapshot that is already persisted
    /// (loaded from a backend, or written by the generation path) and
    /// drops any armed timer. Keeps AI-caused changes from being
    /// re-detected as user edits.
    pub fn mark_persisted(&self, snapshot: &FileSet) {
        let mut state = self.state.lock().unwrap();
        state.baseline = Some(snapshot.clone());
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
        self.saving.store(false, Ordering::SeqCst);
    }

    /// True while a save is armed or until one succeeds. Deliberately
    /// sticks on failure.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Cancels any armed timer. An unfired debounce is dropped; there is
    /// no flush-on-exit guarantee.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap();
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for DebouncedPersister {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(pending) = state.pending.take() {
                pending.abort();
            }
        }
    }
}
