//! Raw source documents: cached fetching and the two input parsers.

mod annotations;
mod emoji_test;

pub use annotations::*;
pub use emoji_test::*;

use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{BuildError, Result};

/// Fetches source documents once and serves them from disk afterwards.
///
/// Locations without an `http://` or `https://` scheme are read directly from
/// the filesystem and never cached.
pub struct SourceCache {
    dir: PathBuf,
    offline: bool,
    client: Option<reqwest::blocking::Client>,
}

impl SourceCache {
    /// Create a cache rooted at `dir`. With `offline` set, a cache miss on a
    /// remote source is an error instead of a download.
    pub fn new(dir: impl Into<PathBuf>, offline: bool) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let client = if offline {
            None
        } else {
            Some(
                reqwest::blocking::Client::builder()
                    .timeout(Duration::from_secs(120))
                    .build()
                    .map_err(|e| BuildError::Fetch {
                        url: String::new(),
                        reason: e.to_string(),
                    })?,
            )
        };

        Ok(Self {
            dir,
            offline,
            client,
        })
    }

    /// Cache file for a remote location.
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(hex::encode(Sha256::digest(url.as_bytes())))
    }

    /// Return the document at `location`.
    pub fn fetch(&self, location: &str) -> Result<String> {
        if !is_remote(location) {
            debug!(path = location, "Reading local source");
            return fs::read_to_string(location).map_err(|e| BuildError::Resource {
                path: PathBuf::from(location),
                message: e.to_string(),
            });
        }

        let cached = self.path_for(location);
        if cached.exists() {
            debug!(url = location, path = %cached.display(), "Source cache hit");
            return Ok(fs::read_to_string(&cached)?);
        }

        let client = match (&self.client, self.offline) {
            (Some(client), false) => client,
            _ => {
                return Err(BuildError::OfflineCacheMiss {
                    url: location.to_string(),
                })
            }
        };

        info!(url = location, "Downloading source");
        let fetch_err = |reason: String| BuildError::Fetch {
            url: location.to_string(),
            reason,
        };
        let response = client.get(location).send().map_err(|e| fetch_err(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {}", status.as_u16())));
        }
        let body = response.text().map_err(|e| fetch_err(e.to_string()))?;

        write_atomic(&self.dir, &cached, body.as_bytes())?;
        Ok(body)
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(bytes)?;
    temp_file.persist(path).map_err(|e| BuildError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SourceCache::new(dir.path(), true).unwrap();

        let a = cache.path_for("https://example.com/emoji-test.txt");
        let b = cache.path_for("https://example.com/emoji-test.txt");
        let c = cache.path_for("https://example.com/other.txt");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.file_name().unwrap().len(), 64);
    }

    #[test]
    fn test_offline_cache_hit_and_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SourceCache::new(dir.path(), true).unwrap();
        let url = "https://example.com/emoji-test.txt";

        assert!(matches!(
            cache.fetch(url),
            Err(BuildError::OfflineCacheMiss { .. })
        ));

        fs::write(cache.path_for(url), "# group: Flags\n").unwrap();
        assert_eq!(cache.fetch(url).unwrap(), "# group: Flags\n");
    }

    #[test]
    fn test_local_sources_bypass_cache() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("annotations.json");
        fs::write(&file, "{}").unwrap();

        let cache = SourceCache::new(dir.path().join("cache"), true).unwrap();
        assert_eq!(cache.fetch(file.to_str().unwrap()).unwrap(), "{}");

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            cache.fetch(missing.to_str().unwrap()),
            Err(BuildError::Resource { .. })
        ));
    }
}
