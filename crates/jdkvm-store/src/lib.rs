//! Installed-version store and active-version switch for jdkvm.
//!
//! - [`VersionStore`] owns `store_root/<name>` directories. A directory there
//!   is installed; installs are staged elsewhere and published by rename.
//! - [`ActiveLink`] owns the one link naming the active version.
//! - [`Lifecycle`] drives fetch, extract and publish, and keeps the cached
//!   current version consistent with the link.
//!
//! Two processes operating on the same store at once are not supported.

mod effects;
mod error;
mod lifecycle;
mod store;
mod switch;

pub use effects::{ArchiveExtractor, ArchiveFetcher};
pub use error::{BoxError, Error, Result, SwitchFailure, Warning};
pub use lifecycle::{InstallReport, InstalledEntry, Lifecycle, RemoveReport, Settings};
pub use store::{VersionStore, is_valid_name};
pub use switch::{ActiveLink, SwitchReport};
