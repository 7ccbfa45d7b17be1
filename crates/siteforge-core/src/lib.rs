//! Core domain layer for Siteforge.
//!
//! This crate contains the domain models and store interfaces for the
//! workspace/project synchronization engine: the file tree being edited,
//! session identity and backend affinity, conversation messages, project
//! metadata, and the traits that decouple the engine from the concrete
//! AI service and persistence backends.

pub mod error;
pub mod fileset;
pub mod generation;
pub mod project;
pub mod session;
pub mod workspace;

// Re-export common error type
pub use error::SiteforgeError;
