//! Remote image downloads.
//!
//! Fetches a URL with a single GET and writes the body to disk only when the
//! server answers `200 OK`. There is no retry.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use reelsite_core::config::DownloadConfig;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

/// Download errors.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure or unreadable body.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with something other than 200.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// Body could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for download operations.
pub type Result<T> = std::result::Result<T, DownloadError>;

/// HTTP downloader sharing one client across requests.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    /// Build a downloader from the download settings.
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(DownloadError::Client)?;
        Ok(Self { client })
    }

    /// GET `url` and write the body to `dest`. Returns the number of bytes written.
    pub async fn fetch_to(&self, url: &str, dest: &Path) -> Result<usize> {
        let request_err = |source| DownloadError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_err)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(request_err)?;
        fs::write(dest, &body).map_err(|source| DownloadError::Write {
            path: dest.to_path_buf(),
            source,
        })?;

        debug!(url, path = %dest.display(), bytes = body.len(), "downloaded");
        Ok(body.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downloader_builds_from_defaults() {
        assert!(Downloader::new(&DownloadConfig::default()).is_ok());
    }

    #[test]
    fn test_status_error_message() {
        let err = DownloadError::Status {
            url: "https://cdn.example/hero.jpg".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "https://cdn.example/hero.jpg returned HTTP 404 Not Found"
        );
    }

    #[tokio::test]
    async fn test_invalid_url_is_request_error() {
        let downloader = Downloader::new(&DownloadConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("hero.jpg");

        let result = downloader.fetch_to("not a url", &dest).await;
        assert!(matches!(result, Err(DownloadError::Request { .. })));
        assert!(!dest.exists());
    }
}
