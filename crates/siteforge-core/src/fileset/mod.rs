//! File tree domain module.
//!
//! - `model`: the `FileSet`/`FileRecord` tree with normalization, merging,
//!   and change detection
//! - `scaffold`: the default file set every editing session starts from

mod model;
mod scaffold;

pub use model::{FileRecord, FileSet};
pub use scaffold::default_scaffold;
