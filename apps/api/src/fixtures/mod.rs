//! Read-only fixture data, loaded once at startup and shared behind `Arc`.

pub mod sources;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::Config;
use crate::models::learner::RawLearner;
use crate::models::raw::RawCompany;
use sources::{fetch_first_available, DataSource, EmbeddedSource, FileSource, HttpSource};

const EMBEDDED_COMPANY: &str = include_str!("../../data/company-mock.json");
const EMBEDDED_LEARNER: &str = include_str!("../../data/learner-mock.json");

/// Source of the raw company and learner documents. Injected into the app state
/// so handlers and stores never reach for process globals.
pub trait DataProvider: Send + Sync {
    fn company_data(&self) -> &RawCompany;
    fn learner_data(&self) -> &RawLearner;
}

/// Immutable in-memory fixtures.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    company: Arc<RawCompany>,
    learner: Arc<RawLearner>,
}

impl FixtureProvider {
    pub fn new(company: RawCompany, learner: RawLearner) -> Self {
        Self {
            company: Arc::new(company),
            learner: Arc::new(learner),
        }
    }

    /// Fixtures compiled into the binary.
    #[cfg(test)]
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(
            serde_json::from_str(EMBEDDED_COMPANY).context("embedded company fixture")?,
            serde_json::from_str(EMBEDDED_LEARNER).context("embedded learner fixture")?,
        ))
    }

    /// Loads each document from the first source that answers: the configured
    /// URL, then the file on disk, then the embedded copy.
    pub async fn load(config: &Config) -> Result<Self> {
        let company: RawCompany = load_document(
            "company",
            config.company_data_url.as_deref(),
            &config.company_data_path,
            EMBEDDED_COMPANY,
        )
        .await?;
        let learner: RawLearner = load_document(
            "learner",
            config.learner_data_url.as_deref(),
            &config.learner_data_path,
            EMBEDDED_LEARNER,
        )
        .await?;

        info!(
            "Fixtures loaded: {} workers for {}",
            company.workers.len(),
            company.company_name.as_deref().unwrap_or("unnamed company")
        );
        Ok(Self::new(company, learner))
    }
}

impl DataProvider for FixtureProvider {
    fn company_data(&self) -> &RawCompany {
        &self.company
    }

    fn learner_data(&self) -> &RawLearner {
        &self.learner
    }
}

async fn load_document<T: DeserializeOwned>(
    label: &'static str,
    url: Option<&str>,
    path: &str,
    embedded: &'static str,
) -> Result<T> {
    let mut chain: Vec<Box<dyn DataSource>> = Vec::new();
    if let Some(url) = url {
        chain.push(Box::new(HttpSource::new(url)));
    }
    chain.push(Box::new(FileSource::new(path)));
    chain.push(Box::new(EmbeddedSource::new(label, embedded)));

    let loaded = fetch_first_available(&chain)
        .await
        .with_context(|| format!("no usable {label} fixture source"))?;
    info!("Loaded {label} fixture from {}", loaded.source);

    serde_json::from_value(loaded.document)
        .with_context(|| format!("{label} fixture from {} has an unexpected layout", loaded.source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fixtures_parse() {
        let provider = FixtureProvider::embedded().unwrap();
        assert!(!provider.company_data().workers.is_empty());
        assert_eq!(
            provider.company_data().company_name.as_deref(),
            Some("Acme Learning Corp")
        );
        assert!(!provider.learner_data().learning_path.modules.is_empty());
    }

    #[test]
    fn test_embedded_workers_normalize_with_unique_ids() {
        let provider = FixtureProvider::embedded().unwrap();
        let raw = &provider.company_data().workers;
        let workers = crate::normalizer::normalize_company(raw);
        assert_eq!(workers.len(), raw.len());
    }
}
