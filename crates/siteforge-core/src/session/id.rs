//! Session identity resolution.
//!
//! The routing layer hands the engine an opaque identifier. A reserved
//! literal prefix marks durable Project sessions; everything else is an
//! ephemeral Workspace session. Resolution happens exactly once and the
//! resulting tagged value is threaded through every subsequent store
//! call, so backend affinity can never diverge between call sites.

use serde::{Deserialize, Serialize};

/// Reserved prefix marking Project-backed sessions.
pub const PROJECT_PREFIX: &str = "project-";

/// A resolved session identity carrying backend affinity and the storage
/// identifier with the discriminating prefix already stripped.
///
/// Affinity is fixed for the session's lifetime; a `SessionId` is never
/// re-resolved or switched after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionId {
    /// Ephemeral collaborative session, keyed by a plain identifier.
    Workspace { storage_id: String },
    /// Durable user-owned session, keyed by a `project-`-prefixed identifier.
    Project { storage_id: String },
}

impl SessionId {
    /// Resolves a raw identifier into its backend affinity.
    pub fn resolve(raw_id: &str) -> Self {
        match raw_id.strip_prefix(PROJECT_PREFIX) {
            Some(stripped) => Self::Project {
                storage_id: stripped.to_string(),
            },
            None => Self::Workspace {
                storage_id: raw_id.to_string(),
            },
        }
    }

    /// The identifier to hand to the owning backend.
    pub fn storage_id(&self) -> &str {
        match self {
            Self::Workspace { storage_id } | Self::Project { storage_id } => storage_id,
        }
    }

    /// True for Project-backed sessions.
    pub fn is_project(&self) -> bool {
        matches!(self, Self::Project { .. })
    }

    /// Reconstructs the raw identifier as the routing layer supplied it.
    pub fn raw_id(&self) -> String {
        match self {
            Self::Workspace { storage_id } => storage_id.clone(),
            Self::Project { storage_id } => format!("{PROJECT_PREFIX}{storage_id}"),
        }
    }
}
