//! Network side of jdkvm.
//!
//! [`Fetcher`] downloads distribution archives into the staging directory,
//! [`fetch_index`] retrieves the list of installable versions. Both accept
//! `file://` URLs so mirrors on local disk work without a server.

mod client;
mod error;
mod fetcher;
mod index;
mod tracker;

pub use client::ClientSetting;
pub use error::{Error, Result};
pub use fetcher::{Fetcher, archive_file_name};
pub use index::{JdkRelease, fetch_index, find_release};
pub use tracker::ProgressTracker;
