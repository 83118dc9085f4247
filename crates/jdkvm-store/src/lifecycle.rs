use std::path::{Path, PathBuf};

use jdkvm_fs::{ScratchFile, Workspace};
use jdkvm_platform::EnvSync;

use crate::effects::{ArchiveExtractor, ArchiveFetcher};
use crate::error::{BoxError, Error, Result, Warning};
use crate::store::{VersionStore, check_name};
use crate::switch::{ActiveLink, SwitchReport};

/// Locations and cached state handed in by whoever persists configuration.
#[derive(Clone, Debug)]
pub struct Settings {
    pub store_root: PathBuf,
    pub download_dir: PathBuf,
    pub java_home: PathBuf,
    pub current: Option<String>,
}

#[derive(Debug)]
pub struct InstallReport {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct RemoveReport {
    pub name: String,
    pub deactivated: bool,
    pub warnings: Vec<Warning>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstalledEntry {
    pub name: String,
    pub is_current: bool,
}

/// Sequences download, extraction and publish for installs, and keeps the
/// cached current version in step with the active link.
pub struct Lifecycle<F, X, E> {
    store: VersionStore,
    link: ActiveLink,
    download_dir: PathBuf,
    current: Option<String>,
    fetcher: F,
    extractor: X,
    env: E,
}

impl<F, X, E> Lifecycle<F, X, E>
where
    F: ArchiveFetcher,
    X: ArchiveExtractor,
    E: EnvSync,
{
    pub fn new(settings: &Settings, fetcher: F, extractor: X, env: E) -> Self {
        Self {
            store: VersionStore::new(&settings.store_root),
            link: ActiveLink::new(&settings.java_home),
            download_dir: settings.download_dir.clone(),
            current: settings.current.clone().filter(|c| !c.is_empty()),
            fetcher,
            extractor,
            env,
        }
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    pub fn link(&self) -> &ActiveLink {
        &self.link
    }

    /// Cached current version, to be persisted by the caller.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Download, unpack and publish `name`.
    ///
    /// Either the version ends up fully installed or the store is left as it
    /// was. Staging data under the download directory is removed on every exit.
    pub fn install(&mut self, name: &str, url: &str) -> Result<InstallReport> {
        check_name(name)?;
        if self.store.is_installed(name) {
            return Err(Error::AlreadyInstalled {
                name: name.to_string(),
            });
        }
        for dir in [self.download_dir.as_path(), self.store.root()] {
            std::fs::create_dir_all(dir).map_err(|e| Error::InstallFailed {
                name: name.to_string(),
                path: dir.to_path_buf(),
                source: jdkvm_fs::Error::Write {
                    path: dir.to_path_buf(),
                    source: e,
                },
            })?;
        }

        let archive = self
            .fetcher
            .fetch(&self.download_dir, name, url)
            .map_err(|e| Error::DownloadFailed {
                name: name.to_string(),
                url: url.to_string(),
                source: Box::new(e),
            })?;
        let archive = ScratchFile::new(archive);

        let extract_err = |source: BoxError| Error::ExtractFailed {
            name: name.to_string(),
            archive: archive.path().to_path_buf(),
            source,
        };
        // A stale `<name>_temp` that cannot be cleared fails the extract step.
        let workspace = Workspace::new(self.download_dir.join(format!("{name}_temp")))
            .map_err(|e| extract_err(Box::new(e)))?;
        self.extractor
            .extract(archive.path(), workspace.path())
            .map_err(|e| extract_err(Box::new(e)))?;
        let payload = workspace.payload_root().map_err(|e| extract_err(Box::new(e)))?;

        let path = self.store.publish(&payload, name)?;
        Ok(InstallReport {
            name: name.to_string(),
            path,
        })
    }

    /// Make `name` the active version.
    ///
    /// When the link was removed but could not be recreated the cached
    /// current version is cleared, since nothing is active.
    pub fn switch_to(&mut self, name: &str) -> Result<SwitchReport> {
        if !self.store.is_installed(name) {
            return Err(Error::NotInstalled {
                name: name.to_string(),
            });
        }
        match self.link.activate(&self.store, name, &self.env) {
            Ok(report) => {
                self.current = Some(name.to_string());
                Ok(report)
            }
            Err(e) => {
                if e.is_degraded() {
                    self.current = None;
                }
                Err(e)
            }
        }
    }

    /// Delete `name` from the store, deactivating it first when it is current.
    ///
    /// A failed deactivation is a warning: the version is removed anyway and
    /// the dangling link shows up through [`Lifecycle::resolve`].
    pub fn remove_version(&mut self, name: &str) -> Result<RemoveReport> {
        if !self.store.is_installed(name) {
            return Err(Error::NotInstalled {
                name: name.to_string(),
            });
        }

        let mut warnings = Vec::new();
        let mut deactivated = false;
        if self.current.as_deref() == Some(name) {
            match self.link.deactivate() {
                Ok(removed) => {
                    deactivated = removed;
                    self.current = None;
                }
                Err(e) => {
                    tracing::warn!(name, error = %e, "removing active version without deactivating");
                    warnings.push(Warning::DeactivateFailed(e));
                }
            }
        }

        self.store.remove(name)?;
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        Ok(RemoveReport {
            name: name.to_string(),
            deactivated,
            warnings,
        })
    }

    /// Installed versions flagged against the cached current version.
    pub fn list(&self) -> Vec<InstalledEntry> {
        self.store
            .list_installed()
            .into_iter()
            .map(|name| InstalledEntry {
                is_current: self.current.as_deref() == Some(name.as_str()),
                name,
            })
            .collect()
    }

    /// Read the active link. Used for consistency checks, not for listing.
    pub fn resolve(&self) -> Result<Option<String>> {
        self.link.resolve(&self.store)
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }
}
