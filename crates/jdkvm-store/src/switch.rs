//! The single link that names the active version.
//!
//! The link either does not exist or points at one directory of the
//! [`VersionStore`]. Repointing is remove-then-create because junctions
//! cannot be swapped atomically, so a failure between the two steps leaves
//! no active version and is reported as such.

use std::path::{Path, PathBuf};

use jdkvm_fs::{create_dir_link, read_dir_link, remove_dir_link};
use jdkvm_platform::{EnvSync, RuntimeEnv};

use crate::error::{Error, Result, SwitchFailure, Warning};
use crate::store::VersionStore;

/// Outcome of a successful switch.
#[derive(Debug)]
pub struct SwitchReport {
    pub name: String,
    pub link: PathBuf,
    pub warnings: Vec<Warning>,
}

#[derive(Clone, Debug)]
pub struct ActiveLink {
    path: PathBuf,
}

impl ActiveLink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the version the link points at, or `None` when there is no link.
    ///
    /// A link whose target is not an installed version is reported as
    /// [`Error::SwitchCorrupt`] and left in place.
    pub fn resolve(&self, store: &VersionStore) -> Result<Option<String>> {
        let target = match read_dir_link(&self.path) {
            Ok(None) => return Ok(None),
            Ok(Some(target)) => target,
            Err(e) => return Err(self.corrupt(e.to_string())),
        };
        let target = match (target.is_relative(), self.path.parent()) {
            (true, Some(parent)) => parent.join(target),
            _ => target,
        };

        let name = target
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|name| store.is_installed(name))
            .filter(|name| same_dir(&target, &store.path(name)));
        match name {
            Some(name) => Ok(Some(name.to_string())),
            None => Err(self.corrupt(format!(
                "points to {}, which is not an installed version",
                target.display()
            ))),
        }
    }

    /// Point the link at `name` and publish the runtime location to `env`.
    pub fn activate(&self, store: &VersionStore, name: &str, env: &dyn EnvSync) -> Result<SwitchReport> {
        if !store.is_installed(name) {
            return Err(Error::NotInstalled {
                name: name.to_string(),
            });
        }

        if let Err(source) = remove_dir_link(&self.path) {
            return Err(Error::SwitchFailed(SwitchFailure::RemoveLink {
                link: self.path.clone(),
                source,
            }));
        }

        let target = store.path(name);
        let target = std::path::absolute(&target).unwrap_or(target);
        if let Err(source) = create_dir_link(&target, &self.path) {
            tracing::error!(link = %self.path.display(), "link removed but not recreated, no version is active");
            return Err(Error::SwitchFailed(SwitchFailure::CreateLink {
                link: self.path.clone(),
                target,
                source,
            }));
        }
        tracing::info!(name, link = %self.path.display(), "activated version");

        let mut warnings = Vec::new();
        if let Err(e) = env.sync_home(&RuntimeEnv::new(&self.path)) {
            tracing::warn!(error = %e, "failed to synchronize environment");
            warnings.push(Warning::EnvSyncFailed(e));
        }

        Ok(SwitchReport {
            name: name.to_string(),
            link: self.path.clone(),
            warnings,
        })
    }

    /// Remove the link if present. Returns whether a link was removed.
    pub fn deactivate(&self) -> Result<bool> {
        let removed = remove_dir_link(&self.path).map_err(|source| {
            Error::SwitchFailed(SwitchFailure::RemoveLink {
                link: self.path.clone(),
                source,
            })
        })?;
        if removed {
            tracing::info!(link = %self.path.display(), "deactivated");
        }
        Ok(removed)
    }

    fn corrupt(&self, reason: String) -> Error {
        Error::SwitchCorrupt {
            link: self.path.clone(),
            reason,
        }
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
