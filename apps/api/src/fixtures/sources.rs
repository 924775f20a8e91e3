//! Prioritized JSON document sources with a single fallback combinator.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("all {attempts} sources failed; last error: {last}")]
    Exhausted { attempts: usize, last: String },

    #[error("no sources configured")]
    Empty,
}

/// Something that can produce a JSON document.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Value, SourceError>;
}

/// A document together with where it came from.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub document: Value,
    pub source: String,
}

/// Tries each source in order and returns the first document that loads.
pub async fn fetch_first_available(sources: &[Box<dyn DataSource>]) -> Result<Loaded, SourceError> {
    let mut last = None;
    for source in sources {
        match source.fetch().await {
            Ok(document) => {
                debug!("Source {} answered", source.describe());
                return Ok(Loaded {
                    document,
                    source: source.describe(),
                });
            }
            Err(e) => {
                warn!("Source {} unavailable: {e}", source.describe());
                last = Some(e);
            }
        }
    }
    match last {
        Some(e) => Err(SourceError::Exhausted {
            attempts: sources.len(),
            last: e.to_string(),
        }),
        None => Err(SourceError::Empty),
    }
}

pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            // Builder only fails on TLS backend init; fall back to defaults then.
            client: Client::builder()
                .timeout(HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        Ok(response.json::<Value>().await?)
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// A document compiled into the binary; the last resort of every chain.
pub struct EmbeddedSource {
    name: &'static str,
    body: &'static str,
}

impl EmbeddedSource {
    pub fn new(name: &'static str, body: &'static str) -> Self {
        Self { name, body }
    }
}

#[async_trait]
impl DataSource for EmbeddedSource {
    fn describe(&self) -> String {
        format!("embedded:{}", self.name)
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        Ok(serde_json::from_str(self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_first_source_wins() {
        let chain: Vec<Box<dyn DataSource>> = vec![
            Box::new(EmbeddedSource::new("a", r#"{"from": "a"}"#)),
            Box::new(EmbeddedSource::new("b", r#"{"from": "b"}"#)),
        ];
        let loaded = fetch_first_available(&chain).await.unwrap();
        assert_eq!(loaded.document["from"], "a");
        assert_eq!(loaded.source, "embedded:a");
    }

    #[tokio::test]
    async fn test_falls_through_missing_file_and_bad_json() {
        let chain: Vec<Box<dyn DataSource>> = vec![
            Box::new(FileSource::new("/definitely/not/here.json")),
            Box::new(EmbeddedSource::new("broken", "{ not json")),
            Box::new(EmbeddedSource::new("good", r#"{"ok": true}"#)),
        ];
        let loaded = fetch_first_available(&chain).await.unwrap();
        assert_eq!(loaded.source, "embedded:good");
    }

    #[tokio::test]
    async fn test_file_source_reads_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"workers": []}}"#).unwrap();
        let chain: Vec<Box<dyn DataSource>> = vec![
            Box::new(FileSource::new(file.path())),
            Box::new(EmbeddedSource::new("fallback", r#"{"workers": [1]}"#)),
        ];
        let loaded = fetch_first_available(&chain).await.unwrap();
        assert_eq!(loaded.document["workers"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_reports_attempts() {
        let chain: Vec<Box<dyn DataSource>> = vec![
            Box::new(FileSource::new("/nope/a.json")),
            Box::new(FileSource::new("/nope/b.json")),
        ];
        let err = fetch_first_available(&chain).await.unwrap_err();
        assert!(matches!(err, SourceError::Exhausted { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let err = fetch_first_available(&[]).await.unwrap_err();
        assert!(matches!(err, SourceError::Empty));
    }
}
