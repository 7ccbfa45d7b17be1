//! Workspace domain module.
//!
//! - `model`: the stored workspace document (`WorkspaceSnapshot`)
//! - `repository`: store trait for the Workspace backend

mod model;
mod repository;

pub use model::WorkspaceSnapshot;
pub use repository::WorkspaceStore;
