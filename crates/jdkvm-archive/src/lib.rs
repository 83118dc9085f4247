//! Archive extraction for JDK distributions.
//!
//! # Architecture
//!
//! - `format.rs` - Format detection from magic bytes
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `extract/` - Entry writing and per-format sources
//! - `report.rs` - Extraction summary

pub use error::{Error, Result};
pub use extract::{Extractor, extract_file, extract_from_reader};
pub use format::{ArchiveFormat, TarCompress, detect_format};
pub use options::ExtractOptions;
pub use report::{ArchiveReport, EntryKind};
pub use sanitize::{sanitize_path, sanitize_symlink_target};

mod error;
pub mod extract;
mod format;
mod options;
mod report;
mod sanitize;
