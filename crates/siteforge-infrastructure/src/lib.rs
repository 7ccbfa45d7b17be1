//! Infrastructure layer for Siteforge.
//!
//! HTTP client implementations of the core store traits (AI service,
//! Workspace backend, Project backend), their wire DTOs, and engine
//! configuration loading.

pub mod config;
pub mod dto;
pub mod http;
pub mod http_ai_service;
pub mod http_project_store;
pub mod http_workspace_store;

pub use crate::config::EngineConfig;
pub use crate::http_ai_service::HttpAiService;
pub use crate::http_project_store::HttpProjectStore;
pub use crate::http_workspace_store::HttpWorkspaceStore;
