//! AI generation domain module.
//!
//! - `model`: structured code-generation results (`CodeGeneration`)
//! - `service`: trait for the AI collaborator (`AiService`)

mod model;
mod service;

pub use model::CodeGeneration;
pub use service::AiService;
