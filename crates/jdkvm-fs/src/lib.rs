//! Filesystem primitives behind the jdkvm version store.
//!
//! Every operation that changes what another process can observe goes through
//! one of these helpers:
//!
//! - [`atomic_write`] replaces a file by writing a sibling and renaming it.
//! - [`rename_dir`] moves a fully populated directory into place and refuses
//!   to clobber an existing destination.
//! - [`create_dir_link`], [`read_dir_link`], [`remove_dir_link`] manage the
//!   single directory indirection (symlink on Unix, junction on Windows).
//! - [`Workspace`] and [`ScratchFile`] remove transient data on drop, on
//!   success and error paths alike.

mod error;
mod primitives;
mod workspace;

pub use error::{Error, Result};
pub use primitives::{
    AtomicWriteOptions, RenameOptions, atomic_write, create_dir_link, is_dir_link, read_dir_link,
    remove_dir_link, rename_dir,
};
pub use workspace::{ScratchFile, Workspace};
