//! High-level API for the Hubmon library.
//!
//! This module provides a simplified, user-friendly interface over the
//! client, registry, collector, and metrics modules. It's the recommended
//! entry point for most users: configure targets once, then call
//! [`Exporter::scrape`] per collection cycle.
//!
//! # Examples
//!
//! ```no_run
//! use libhubmon::Exporter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exporter = Exporter::builder()
//!         .organisations(vec!["myorg".to_string()])
//!         .images(vec!["library/nginx".to_string()])
//!         .build()?;
//!
//!     let text = exporter.scrape().await?;
//!     print!("{}", text);
//!     Ok(())
//! }
//! ```

use crate::client::{Client, ClientConfig, DEFAULT_BASE_URL};
use crate::collector::Collector;
use crate::error::{HubmonError, Result};
use crate::metrics::{MetricFamilies, Sample, DEFAULT_NAMESPACE};
use crate::registry::HubRegistry;

/// High-level exporter tying the collection pipeline to the exposition
/// layer.
///
/// Construction happens once at startup; the exporter itself is immutable
/// and every [`scrape`](Exporter::scrape) is an independent cycle with no
/// state carried between cycles.
#[derive(Debug)]
pub struct Exporter {
    /// Concurrent sample collection over the configured targets.
    collector: Collector,
    /// Immutable metric family descriptors.
    families: MetricFamilies,
}

impl Exporter {
    /// Creates a builder for configuring an exporter.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::Exporter;
    ///
    /// let exporter = Exporter::builder()
    ///     .images(vec!["library/nginx".to_string()])
    ///     .timeout_seconds(10)
    ///     .retries(5)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    /// Runs one complete scrape cycle and renders the snapshot as
    /// Prometheus text exposition.
    ///
    /// Per-target failures have already been absorbed (logged, zero
    /// samples) by the time this returns; only an exposition-layer failure
    /// surfaces as an error.
    pub async fn scrape(&self) -> Result<String> {
        let samples = self.collector.collect().await;
        self.families.render(&samples)
    }

    /// Runs one collection cycle and returns the raw samples without
    /// rendering them.
    pub async fn collect(&self) -> Vec<Sample> {
        self.collector.collect().await
    }

    /// Returns the metric family descriptors.
    pub fn families(&self) -> &MetricFamilies {
        &self.families
    }
}

/// Builder for [`Exporter`].
#[derive(Debug, Clone)]
pub struct ExporterBuilder {
    organisations: Vec<String>,
    images: Vec<String>,
    base_url: String,
    namespace: String,
    timeout_seconds: u64,
    retries: u32,
}

impl Default for ExporterBuilder {
    fn default() -> Self {
        Self {
            organisations: Vec::new(),
            images: Vec::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout_seconds: ClientConfig::default().timeout_seconds,
            retries: ClientConfig::default().retries,
        }
    }
}

impl ExporterBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the organisation slugs to monitor.
    pub fn organisations(mut self, organisations: Vec<String>) -> Self {
        self.organisations = organisations;
        self
    }

    /// Sets the image slugs to monitor.
    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Sets the base API URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the metric namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the per-request timeout in seconds.
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the fetch attempts per URL.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Validates the configuration and builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no non-empty target is configured
    /// or the retry count is zero, and a validation error when the base URL
    /// cannot be normalised.
    pub fn build(self) -> Result<Exporter> {
        let has_target = self
            .organisations
            .iter()
            .chain(self.images.iter())
            .any(|slug| !slug.trim().is_empty());
        if !has_target {
            return Err(HubmonError::config("no organisations or images provided"));
        }

        let config = ClientConfig::new()
            .with_timeout(self.timeout_seconds)
            .with_retries(self.retries);
        let client = Client::with_config(&self.base_url, config)?;
        let registry = HubRegistry::new(client);

        tracing::info!(
            organisations = ?self.organisations,
            images = ?self.images,
            base_url = %self.base_url,
            "exporter configured"
        );

        Ok(Exporter {
            collector: Collector::new(registry, self.organisations, self.images),
            families: MetricFamilies::new(self.namespace)?,
        })
    }
}
