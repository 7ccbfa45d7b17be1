//! Project domain module.
//!
//! - `model`: durable project records and the create/patch payloads
//! - `summary`: lossy title/description derivation from conversations
//! - `repository`: store trait for the Project backend

mod model;
mod repository;
mod summary;

pub use model::{NewProject, ProjectPatch, ProjectRecord};
pub use repository::ProjectStore;
pub use summary::{derive_description, derive_title, fold_description};
