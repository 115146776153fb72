//! # Material Download
//!
//! Saves a lesson's infographic sheet into the downloads directory as
//! `DersMateryali-<timestamp>.<ext>`.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info, warn};

#[derive(Debug)]
pub enum DownloadError {
    /// Request could not be sent or the body could not be read.
    Network(String),
    /// Server answered with a non-success status.
    Http { status: u16 },
    /// Writing the file failed.
    Io(std::io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Network(msg) => write!(f, "network error: {msg}"),
            DownloadError::Http { status } => write!(f, "server returned HTTP {status}"),
            DownloadError::Io(e) => write!(f, "could not save file: {e}"),
        }
    }
}

impl std::error::Error for DownloadError {}

impl From<std::io::Error> for DownloadError {
    fn from(e: std::io::Error) -> Self {
        DownloadError::Io(e)
    }
}

/// Downloads `url` into `dir` and returns the path written.
pub async fn fetch_material(
    client: &reqwest::Client,
    url: &str,
    dir: &Path,
) -> Result<PathBuf, DownloadError> {
    info!("Downloading material from {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DownloadError::Network(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        warn!("Material download failed: HTTP {}", status);
        return Err(DownloadError::Http { status });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .bytes()
        .await
        .map_err(|e| DownloadError::Network(e.to_string()))?;

    let ext = extension_for(url, content_type.as_deref());
    let file_name = format!("DersMateryali-{}.{}", Local::now().format("%Y%m%d-%H%M%S"), ext);
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, &bytes).await?;

    info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// File extension taken from the URL path, else the content type, else `bin`.
pub fn extension_for(url: &str, content_type: Option<&str>) -> String {
    let from_path = reqwest::Url::parse(url).ok().and_then(|u| {
        let last = u.path_segments()?.next_back()?.to_string();
        let (_, ext) = last.rsplit_once('.')?;
        let valid = !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric());
        valid.then(|| ext.to_ascii_lowercase())
    });
    if let Some(ext) = from_path {
        return ext;
    }

    let from_type = content_type.and_then(|ct| {
        let mime = ct.split(';').next()?.trim();
        match mime {
            "image/png" => Some("png"),
            "image/jpeg" => Some("jpg"),
            "image/webp" => Some("webp"),
            "application/pdf" => Some("pdf"),
            _ => None,
        }
    });
    debug!("No extension in {}, content type {:?}", url, content_type);
    from_type.unwrap_or("bin").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_url_path_ignores_query() {
        assert_eq!(
            extension_for("https://cdn.example.com/o/unnamed.png?alt=media&token=abc", None),
            "png"
        );
        assert_eq!(extension_for("https://example.com/Sheet.PDF", None), "pdf");
    }

    #[test]
    fn test_extension_falls_back_to_content_type() {
        assert_eq!(
            extension_for("https://example.com/download", Some("image/jpeg; charset=binary")),
            "jpg"
        );
        assert_eq!(extension_for("https://example.com/download", None), "bin");
        assert_eq!(extension_for("not a url", Some("text/plain")), "bin");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            DownloadError::Http { status: 404 }.to_string(),
            "server returned HTTP 404"
        );
    }
}
