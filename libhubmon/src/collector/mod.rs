//! Concurrent sample collection.
//!
//! One scrape spawns one task per configured target: organisation tasks walk
//! the paginated listing, image tasks fetch a single record. Every task
//! streams its samples into a shared channel and any failure is confined to
//! the task that hit it. [`Collector::collect`] joins every task before
//! draining the channel, so the snapshot it returns is always complete --
//! never partially populated from still-running tasks.

use crate::hub::ImageResult;
use crate::metrics::{Metric, Sample};
use crate::registry::HubRegistry;
use tokio::sync::mpsc;
use tokio::task::JoinSet;


/// Collects metric samples for a fixed set of targets.
///
/// Targets are immutable configuration, set once at construction. Duplicate
/// and empty slugs are tolerated: empties are skipped, duplicates produce
/// duplicate samples (the exposition sink decides what to do with those).
#[derive(Debug, Clone)]
pub struct Collector {
    /// Typed registry API shared by all tasks.
    registry: HubRegistry,
    /// Organisation slugs to walk.
    organisations: Vec<String>,
    /// Image slugs to fetch directly.
    images: Vec<String>,
}

impl Collector {
    /// Creates a collector over the given targets.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::client::Client;
    /// use libhubmon::collector::Collector;
    /// use libhubmon::registry::HubRegistry;
    ///
    /// let client = Client::new("https://hub.docker.com/v2/repositories").unwrap();
    /// let registry = HubRegistry::new(client);
    /// let collector = Collector::new(
    ///     registry,
    ///     vec!["myorg".to_string()],
    ///     vec!["library/nginx".to_string()],
    /// );
    /// assert_eq!(collector.target_count(), 2);
    /// ```
    pub fn new(registry: HubRegistry, organisations: Vec<String>, images: Vec<String>) -> Self {
        Self {
            registry,
            organisations,
            images,
        }
    }

    /// Number of configured targets, empty slugs included.
    pub fn target_count(&self) -> usize {
        self.organisations.len() + self.images.len()
    }

    /// Runs one scrape cycle and returns the complete sample snapshot.
    ///
    /// All targets are fetched concurrently; pages within one organisation
    /// are fetched serially, preserving page order. A failing target is
    /// logged and contributes zero samples without affecting its siblings,
    /// so this call is infallible. It returns only after every spawned task
    /// has finished.
    pub async fn collect(&self) -> Vec<Sample> {
        tracing::debug!(
            organisations = self.organisations.len(),
            images = self.images.len(),
            "collecting metrics"
        );

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for slug in &self.organisations {
            let slug = slug.trim().to_string();
            if slug.is_empty() {
                continue;
            }
            let registry = self.registry.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                match registry.fetch_organisation(&slug).await {
                    Ok(pages) => {
                        for page in pages {
                            for record in &page.results {
                                emit_samples(record, &tx);
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(target = %slug, error = %e, "organisation scrape failed");
                    }
                }
            });
        }

        for slug in &self.images {
            let slug = slug.trim().to_string();
            if slug.is_empty() {
                continue;
            }
            let registry = self.registry.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                match registry.fetch_image(&slug).await {
                    Ok(record) => emit_samples(&record, &tx),
                    Err(e) => {
                        tracing::warn!(target = %slug, error = %e, "image scrape failed");
                    }
                }
            });
        }

        // The tasks hold the remaining senders; dropping ours lets the
        // drain below terminate once the last task is done.
        drop(tx);

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "collector task panicked");
            }
        }

        let mut samples = Vec::new();
        while let Some(sample) = rx.recv().await {
            samples.push(sample);
        }
        samples
    }
}

/// Emits the four samples for a record, in fixed order, skipping records
/// without a name or owner.
fn emit_samples(record: &ImageResult, tx: &mpsc::UnboundedSender<Sample>) {
    if !record.is_valid() {
        tracing::debug!(name = %record.name, user = %record.user, "dropping incomplete image record");
        return;
    }

    let is_automated = if record.is_automated { 1.0 } else { 0.0 };

    let samples = [
        Sample::new(Metric::Stars, record.star_count, &record.name, &record.user),
        Sample::new(Metric::IsAutomated, is_automated, &record.name, &record.user),
        Sample::new(
            Metric::PullsTotal,
            record.pull_count as f64,
            &record.name,
            &record.user,
        ),
        Sample::new(
            Metric::LastUpdated,
            record.last_updated_seconds(),
            &record.name,
            &record.user,
        ),
    ];

    for sample in samples {
        // The receiver outlives the tasks; a failed send only means the
        // scrape was abandoned.
        let _ = tx.send(sample);
    }
}
