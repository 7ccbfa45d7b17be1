//! Canonical file tree model.
//!
//! A `FileSet` maps slash-rooted file paths to their text content. File
//! data arrives from several sources (persisted backends, AI generation
//! responses) in loosely structured shapes, so every external mapping is
//! passed through [`FileSet::normalize`] before it is used anywhere else.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Content of a single file in the tree.
///
/// The content is always a string. Structured payloads from external
/// sources are pretty-printed into a string during normalization, never
/// stored as nested data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// The file's text content.
    pub content: String,
}

impl FileRecord {
    /// Creates a record from any string-like content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// The complete named-file content tree being edited and previewed.
///
/// Keys are file paths, conventionally slash-rooted (`/App.js`). Order is
/// irrelevant; a `BTreeMap` keeps iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileSet {
    files: BTreeMap<String, FileRecord>,
}

impl FileSet {
    /// Creates an empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a normalized file set from a raw JSON mapping.
    ///
    /// Accepted entry shapes, per path:
    /// - a plain string: wrapped as `{ content: value }`
    /// - an object with a string `content` field: passed through
    /// - any other non-null value: pretty-printed into `content`
    /// - `null`: skipped
    ///
    /// Empty paths are skipped as well. Normalization is idempotent: the
    /// output of `normalize` re-serialized and normalized again yields the
    /// same file set.
    pub fn normalize(raw: &serde_json::Map<String, Value>) -> Self {
        let mut files = BTreeMap::new();
        for (path, value) in raw {
            if path.is_empty() {
                continue;
            }
            let content = match value {
                Value::Null => continue,
                Value::String(text) => text.clone(),
                Value::Object(fields) => match fields.get("content") {
                    Some(Value::String(text)) => text.clone(),
                    _ => pretty(value),
                },
                other => pretty(other),
            };
            files.insert(path.clone(), FileRecord { content });
        }
        Self { files }
    }

    /// Inserts or replaces a file.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), FileRecord::new(content));
    }

    /// Returns the record stored at `path`, if any.
    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    /// Returns true if a file exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of files in the tree.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the tree holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over `(path, record)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileRecord)> {
        self.files.iter()
    }

    /// Returns a new file set containing every entry of `self` with every
    /// entry of `overlay` written on top (overlay wins on key collision).
    ///
    /// Neither input is mutated. Used both to seed an empty workspace with
    /// the default scaffold and to apply AI-regenerated files over the
    /// current tree without discarding files the AI did not touch.
    pub fn merge(&self, overlay: &FileSet) -> FileSet {
        let mut files = self.files.clone();
        for (path, record) in &overlay.files {
            files.insert(path.clone(), record.clone());
        }
        FileSet { files }
    }

    /// Reports whether this tree differs from `baseline`.
    ///
    /// Any modification, addition, or deletion counts. Two records are
    /// equal iff their content strings are equal; no deeper structural
    /// comparison is needed.
    pub fn differs_from(&self, baseline: &FileSet) -> bool {
        let modified_or_added = self.files.iter().any(|(path, record)| {
            baseline
                .files
                .get(path)
                .map(|base| base.content != record.content)
                .unwrap_or(true)
        });
        let removed = baseline
            .files
            .keys()
            .any(|path| !self.files.contains_key(path));
        modified_or_added || removed
    }

    /// Flattens the tree into `(path, content)` pairs for downstream
    /// packaging, stripping the leading slash so consumers can write the
    /// entries to a filesystem-like target directly.
    pub fn export_entries(&self) -> Vec<(String, String)> {
        self.files
            .iter()
            .map(|(path, record)| {
                let clean = path.strip_prefix('/').unwrap_or(path);
                (clean.to_string(), record.content.clone())
            })
            .collect()
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
