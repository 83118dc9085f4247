use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fetcher::Fetcher;

/// One installable distribution from the remote index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdkRelease {
    pub version: String,
    pub url: String,
}

/// Retrieve and parse the remote version index at `url`.
///
/// The index is a JSON array of `{ "version", "url" }` objects, kept in the
/// order the index lists them.
pub fn fetch_index(fetcher: &Fetcher, url: &str) -> Result<Vec<JdkRelease>> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let body = if parsed.scheme() == "file" {
        let path = parsed.to_file_path().map_err(|()| Error::InvalidUrl {
            url: url.to_string(),
            reason: "not a local file path".into(),
        })?;
        std::fs::read_to_string(&path).map_err(|e| Error::Io { path, source: e })?
    } else {
        let response = fetcher
            .client()
            .get(parsed)
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
        response.text().map_err(|source| Error::Request {
            url: url.to_string(),
            source,
        })?
    };

    let releases: Vec<JdkRelease> = serde_json::from_str(&body).map_err(|source| Error::Parse {
        url: url.to_string(),
        source,
    })?;
    tracing::debug!(%url, count = releases.len(), "fetched version index");
    Ok(releases)
}

/// Exact-match lookup of `version` in the index.
pub fn find_release<'a>(releases: &'a [JdkRelease], version: &str) -> Option<&'a JdkRelease> {
    releases.iter().find(|r| r.version == version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn releases() -> Vec<JdkRelease> {
        serde_json::from_str(
            r#"[
                {"version": "21", "url": "https://example.com/jdk-21.zip"},
                {"version": "17.0.2", "url": "https://example.com/jdk-17.0.2.zip"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_release_exact_match() {
        let releases = releases();
        let found = find_release(&releases, "17.0.2").unwrap();
        assert_eq!(found.url, "https://example.com/jdk-17.0.2.zip");
        assert!(find_release(&releases, "17").is_none());
    }

    #[test]
    fn test_index_preserves_order() {
        let versions: Vec<_> = releases().into_iter().map(|r| r.version).collect();
        assert_eq!(versions, ["21", "17.0.2"]);
    }
}
