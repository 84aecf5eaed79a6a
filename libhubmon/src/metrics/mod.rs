//! Metric descriptors and text exposition.
//!
//! The four metric families published per image are process-wide constants:
//! their names, help strings, and `{image, user}` label schema are fixed at
//! startup inside an immutable [`MetricFamilies`] value and never mutated
//! afterwards. Rendering builds a fresh `prometheus::Registry` for every
//! scrape, so no metric state survives between scrapes.

use crate::error::{HubmonError, Result};
use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::HashSet;


/// Default namespace prefixed to every metric family name.
pub const DEFAULT_NAMESPACE: &str = "docker_hub_image";

/// Whether a metric family is exposed as a gauge or a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Gauge,
    Counter,
}

/// The four metric families emitted per valid image record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Star count (gauge)
    Stars,
    /// Automated-build flag, 1.0 or 0.0 (gauge)
    IsAutomated,
    /// Total pulls (counter)
    PullsTotal,
    /// Last update time, seconds since epoch (gauge)
    LastUpdated,
}

impl Metric {
    /// Family name without the namespace prefix.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::IsAutomated => "is_automated",
            Self::PullsTotal => "pulls_total",
            Self::LastUpdated => "last_updated",
        }
    }

    /// Help string registered for the family.
    pub fn help(&self) -> &'static str {
        match self {
            Self::Stars => "Docker image star count.",
            Self::IsAutomated => "Whether the Docker image is an automated build.",
            Self::PullsTotal => "Docker image pulls total.",
            Self::LastUpdated => "Docker image last updated, in seconds since the epoch.",
        }
    }

    /// Exposition kind of the family.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::PullsTotal => ValueKind::Counter,
            _ => ValueKind::Gauge,
        }
    }
}

/// One emitted metric observation.
///
/// Samples are transient: produced by a collector task, consumed by
/// [`MetricFamilies::render`] within the same scrape, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Which family the observation belongs to
    pub metric: Metric,
    /// Observed value
    pub value: f64,
    /// `image` label value
    pub image: String,
    /// `user` label value
    pub user: String,
}

impl Sample {
    /// Creates a new sample.
    pub fn new(metric: Metric, value: f64, image: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            metric,
            value,
            image: image.into(),
            user: user.into(),
        }
    }
}

/// Immutable descriptor configuration for the exposed metric families.
///
/// # Examples
///
/// ```
/// use libhubmon::metrics::{Metric, MetricFamilies};
///
/// let families = MetricFamilies::new("docker_hub_image").unwrap();
/// assert_eq!(families.name(Metric::Stars), "docker_hub_image_stars");
/// ```
#[derive(Debug, Clone)]
pub struct MetricFamilies {
    /// Namespace prefixed to every family name.
    namespace: String,
}

impl Default for MetricFamilies {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl MetricFamilies {
    /// Creates the descriptor set under the given namespace.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the namespace is empty.
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        if namespace.trim().is_empty() {
            return Err(HubmonError::validation("Metric namespace cannot be empty"));
        }
        Ok(Self { namespace })
    }

    /// Returns the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Full family name for a metric, namespace included.
    pub fn name(&self, metric: Metric) -> String {
        format!("{}_{}", self.namespace, metric.suffix())
    }

    fn opts(&self, metric: Metric) -> Opts {
        Opts::new(metric.suffix(), metric.help()).namespace(self.namespace.clone())
    }

    fn registration_error(e: prometheus::Error) -> HubmonError {
        HubmonError::validation_with_source("Failed to register metric family", e)
    }

    /// Renders a sample snapshot into the Prometheus text exposition format.
    ///
    /// A fresh registry is built per call, so the output reflects exactly
    /// the samples passed in. The sink deduplicates by label set: gauges
    /// overwrite idempotently, and a repeated `{image, user}` pair is
    /// skipped for the pulls counter so an image reachable through both an
    /// organisation listing and a direct target is not double-counted.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::metrics::{Metric, MetricFamilies, Sample};
    ///
    /// let families = MetricFamilies::default();
    /// let samples = vec![Sample::new(Metric::Stars, 5.0, "nginx", "library")];
    /// let text = families.render(&samples).unwrap();
    /// assert!(text.contains(r#"docker_hub_image_stars{image="nginx",user="library"} 5"#));
    /// ```
    pub fn render(&self, samples: &[Sample]) -> Result<String> {
        let registry = Registry::new();
        let label_names = ["image", "user"];

        let stars = GaugeVec::new(self.opts(Metric::Stars), &label_names)
            .map_err(Self::registration_error)?;
        let is_automated = GaugeVec::new(self.opts(Metric::IsAutomated), &label_names)
            .map_err(Self::registration_error)?;
        let pulls = CounterVec::new(self.opts(Metric::PullsTotal), &label_names)
            .map_err(Self::registration_error)?;
        let last_updated = GaugeVec::new(self.opts(Metric::LastUpdated), &label_names)
            .map_err(Self::registration_error)?;

        registry
            .register(Box::new(stars.clone()))
            .and_then(|_| registry.register(Box::new(is_automated.clone())))
            .and_then(|_| registry.register(Box::new(pulls.clone())))
            .and_then(|_| registry.register(Box::new(last_updated.clone())))
            .map_err(Self::registration_error)?;

        let mut counted: HashSet<(String, String)> = HashSet::new();
        for sample in samples {
            let labels = [sample.image.as_str(), sample.user.as_str()];
            match sample.metric {
                Metric::Stars => stars.with_label_values(&labels).set(sample.value),
                Metric::IsAutomated => is_automated.with_label_values(&labels).set(sample.value),
                Metric::PullsTotal => {
                    if counted.insert((sample.image.clone(), sample.user.clone())) {
                        pulls.with_label_values(&labels).inc_by(sample.value);
                    }
                }
                Metric::LastUpdated => last_updated.with_label_values(&labels).set(sample.value),
            }
        }

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .map_err(|e| HubmonError::validation_with_source("Failed to encode metrics", e))?;

        String::from_utf8(buffer).map_err(|e| {
            HubmonError::validation_with_source("Metrics exposition is not valid UTF-8", e)
        })
    }
}
