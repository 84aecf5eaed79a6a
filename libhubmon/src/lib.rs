//! Hubmon - Docker Hub Metrics Exporter Library
//!
//! Hubmon polls the Docker Hub repositories API for image metadata and
//! republishes selected fields as a Prometheus metrics snapshot.
//!
//! # Quick Start
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
//!     // One scrape cycle: concurrent collection, complete snapshot,
//!     // Prometheus text exposition.
//!     let text = exporter.scrape().await?;
//!     print!("{}", text);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - **Concurrent collection**: one task per target, joined before the
//!   snapshot is published
//! - **Bounded pagination**: organisation listings are walked page by page
//!   with a hard cap
//! - **Retry on transport failure**: configurable attempt count per fetch
//! - **Failure isolation**: a failing target costs only its own samples
//!
//! # Main Types
//!
//! - [`Exporter`] - Main entry point, one scrape per call
//! - [`ExporterBuilder`] - Builder for targets, timeout, retries, namespace
//! - [`Sample`] - One emitted metric observation
//! - [`MetricFamilies`] - Immutable metric descriptors + text rendering
//! - [`HubmonError`] - Error type for all operations
//!
//! # Architecture
//!
//! Hubmon is organized into modules:
//!
//! - **High-level API** ([`exporter`]) - Recommended for most users
//! - **Low-level modules** - Available for advanced use cases (hidden from
//!   docs)
//!
//! For most use cases, you should use the [`Exporter`] struct. The
//! low-level modules are available if you need fine-grained control, but
//! are not shown in the documentation by default.

#![warn(clippy::all)]

/// Returns the libhubmon crate version.
///
/// This is useful for version reporting in CLI tools and debugging.
///
/// # Examples
///
/// ```
/// let version = libhubmon::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API (main entry point)
mod exporter;
pub use exporter::{Exporter, ExporterBuilder};

// Re-export commonly used types for convenience
pub use client::{Client, ClientConfig};
pub use collector::Collector;
pub use error::{HubmonError, Result};
pub use hub::{ImageResult, OrganisationPage};
pub use metrics::{Metric, MetricFamilies, Sample, ValueKind};
pub use registry::HubRegistry;

// Low-level implementation modules (hidden from docs but still public)
// These are available for advanced users who need fine-grained control
#[doc(hidden)]
pub mod client;
#[doc(hidden)]
pub mod collector;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod hub;
#[doc(hidden)]
pub mod metrics;
#[doc(hidden)]
pub mod registry;
