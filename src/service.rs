//! Shared application service for URL verdict evaluation.

use std::fs;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;

use crate::client::{HttpClassifierClient, UrlClassifier};
use crate::config::PhishScoutConfig;
use crate::report::{BatchReport, Tone, VerdictReport};

/// Core runtime service for classification requests.
///
/// The gate guarantees that at most one classification request is in flight
/// at a time; its guard is released on every exit path.
#[derive(Clone)]
pub struct PhishScoutService {
    classifier: Arc<dyn UrlClassifier>,
    gate: Arc<Mutex<()>>,
}

impl PhishScoutService {
    /// Creates a service using layered config and the HTTP classifier client.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading or HTTP client construction fails.
    pub fn new() -> anyhow::Result<Self> {
        let config = PhishScoutConfig::load()?;
        let classifier = HttpClassifierClient::new(&config)?;
        Ok(Self::from_classifier(Arc::new(classifier)))
    }

    #[cfg(test)]
    pub fn with_classifier(classifier: Arc<dyn UrlClassifier>) -> Self {
        Self::from_classifier(classifier)
    }

    fn from_classifier(classifier: Arc<dyn UrlClassifier>) -> Self {
        Self {
            classifier,
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.classifier.endpoint()
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    /// Classifies one URL and maps the outcome to its presentation state.
    ///
    /// Every failure (transport, non-success status, parse) lands in the same
    /// uniform error report; the distinction only reaches the log.
    pub async fn check_url(&self, url: &str) -> VerdictReport {
        let _in_flight = self.gate.lock().await;

        tracing::info!(url, "classifying");
        match self.classifier.classify(url).await {
            Ok(response) => VerdictReport::from_response(url, &response),
            Err(err) => {
                tracing::warn!(url, error = %err, "classification failed");
                VerdictReport::failure(url, self.classifier.endpoint())
            }
        }
    }

    /// Classifies a list of URLs sequentially through the gate.
    ///
    /// A per-URL failure is recorded as that URL's error report and never
    /// aborts the rest of the batch.
    pub async fn check_batch(&self, urls: &[String]) -> BatchReport {
        let mut entries = Vec::with_capacity(urls.len());
        let mut flagged = 0usize;
        let mut failed = 0usize;

        for url in urls {
            let report = self.check_url(url).await;
            if report.is_failure() {
                failed = failed.saturating_add(1);
            } else if report.tone != Tone::Good {
                flagged = flagged.saturating_add(1);
            }
            entries.push(report);
        }

        BatchReport {
            total: entries.len(),
            flagged,
            failed,
            entries,
        }
    }
}

/// Reads a URL list file: one URL per line, blank lines and `#` comments
/// skipped.
///
/// # Errors
///
/// Returns an error when the file cannot be read or lists no URLs.
pub fn read_url_list(path: &str) -> anyhow::Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read url list at {path}"))?;

    let urls = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect::<Vec<_>>();

    if urls.is_empty() {
        anyhow::bail!("url list at {path} contains no urls");
    }

    Ok(urls)
}

#[cfg(test)]
#[path = "tests/service.rs"]
mod tests;
