//! Application layer for Siteforge.
//!
//! This crate implements the synchronization engine itself: backend
//! routing, change detection with debounced persistence, and the
//! generation orchestrators, coordinated behind the `SessionEngine`
//! facade.

pub mod engine;
pub mod orchestrator;
pub mod persister;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::SessionEngine;
pub use orchestrator::{GenerationOrchestrator, GenerationOutcome, SessionState};
pub use persister::DebouncedPersister;
pub use router::{BackendRouter, ProjectSeed};
