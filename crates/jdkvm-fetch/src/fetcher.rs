use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use jdkvm_fs::ScratchFile;
use reqwest::Url;
use reqwest::blocking::Client;

use crate::client::ClientSetting;
use crate::error::{Error, Result};
use crate::tracker::ProgressTracker;

const ARCHIVE_EXTENSIONS: [&str; 4] = ["tar.gz", "tgz", "tar", "zip"];

const BUFFER_SIZE: usize = 64 * 1024;

/// Name of the archive file for `name` downloaded from `url`.
///
/// The extension follows the URL path so the file on disk matches its
/// content; unknown extensions fall back to `zip`.
pub fn archive_file_name(name: &str, url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_ascii_lowercase())
        .unwrap_or_else(|_| url.to_ascii_lowercase());
    let ext = ARCHIVE_EXTENSIONS
        .iter()
        .find(|ext| path.ends_with(&format!(".{ext}")))
        .copied()
        .unwrap_or("zip");
    format!("{name}.{ext}")
}

/// Downloads distribution archives.
pub struct Fetcher {
    client: Client,
    progress: bool,
}

impl Fetcher {
    pub fn new(setting: ClientSetting) -> Result<Self> {
        Ok(Self {
            client: setting.build()?,
            progress: false,
        })
    }

    /// Render a progress bar on stderr while downloading.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Download `url` into `dest_dir` as `<name>.<ext>` and return its path.
    ///
    /// The body is streamed into a `.part` sibling that is renamed into place
    /// once complete, so the final name never holds a truncated archive.
    pub fn fetch(&self, dest_dir: &Path, name: &str, url: &str) -> Result<PathBuf> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        std::fs::create_dir_all(dest_dir).map_err(|e| Error::Io {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;
        let dest = dest_dir.join(archive_file_name(name, url));
        let part = ScratchFile::new(dest.with_file_name(format!(
            "{}.part",
            dest.file_name().unwrap_or_default().to_string_lossy()
        )));

        tracing::info!(%url, dest = %dest.display(), "downloading");
        match parsed.scheme() {
            "file" => {
                let source = parsed.to_file_path().map_err(|()| Error::InvalidUrl {
                    url: url.to_string(),
                    reason: "not a local file path".into(),
                })?;
                let mut reader = File::open(&source).map_err(|e| Error::Io {
                    path: source.clone(),
                    source: e,
                })?;
                let len = reader.metadata().ok().map(|m| m.len());
                self.copy_body(&mut reader, len, part.path(), name)?;
            }
            "http" | "https" => {
                let response = self
                    .client
                    .get(parsed.clone())
                    .send()
                    .map_err(|source| Error::Request {
                        url: url.to_string(),
                        source,
                    })?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                let len = response.content_length();
                let mut response = response;
                self.copy_body(&mut response, len, part.path(), name)?;
            }
            other => {
                return Err(Error::InvalidUrl {
                    url: url.to_string(),
                    reason: format!("unsupported scheme `{other}`"),
                });
            }
        }

        std::fs::rename(part.path(), &dest).map_err(|e| Error::Io {
            path: dest.clone(),
            source: e,
        })?;
        tracing::debug!(dest = %dest.display(), "download complete");
        Ok(dest)
    }

    fn copy_body(
        &self,
        reader: &mut dyn Read,
        len: Option<u64>,
        path: &Path,
        name: &str,
    ) -> Result<u64> {
        let io_err = |e: io::Error| Error::Io {
            path: path.to_path_buf(),
            source: e,
        };
        let mut file = File::create(path).map_err(io_err)?;
        let tracker = if self.progress {
            ProgressTracker::new(len, name)
        } else {
            ProgressTracker::hidden()
        };

        let mut buf = vec![0u8; BUFFER_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(io_err(e)),
            };
            file.write_all(&buf[..n]).map_err(io_err)?;
            tracker.step(n as u64);
        }
        file.sync_all().map_err(io_err)?;

        let copied = tracker.position();
        tracker.finish();

        if let Some(expected) = len {
            if copied != expected {
                return Err(io_err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("received {copied} of {expected} bytes"),
                )));
            }
        }
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_file_name_from_url() {
        assert_eq!(
            archive_file_name("17", "https://example.com/openjdk-17_windows-x64_bin.zip"),
            "17.zip"
        );
        assert_eq!(
            archive_file_name("21", "https://example.com/jdk-21_linux-x64_bin.tar.gz"),
            "21.tar.gz"
        );
        assert_eq!(
            archive_file_name("11", "https://example.com/jdk-11.TGZ?token=abc"),
            "11.tgz"
        );
    }

    #[test]
    fn test_archive_file_name_defaults_to_zip() {
        assert_eq!(archive_file_name("8", "https://example.com/download?id=8"), "8.zip");
    }

    #[test]
    fn test_fetch_rejects_unknown_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(ClientSetting::default()).unwrap();
        let err = fetcher
            .fetch(dir.path(), "17", "ftp://example.com/jdk.zip")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_fetch_rejects_garbage_url() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(ClientSetting::default()).unwrap();
        let err = fetcher.fetch(dir.path(), "17", "not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }
}
