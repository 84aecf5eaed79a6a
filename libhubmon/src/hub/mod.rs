//! Docker Hub API data structures.
//!
//! Typed representations of the JSON bodies returned by the repositories
//! API, with decoding from raw response bytes. Decoding is pure: no network
//! or retry logic lives here, and a decode failure is terminal for the
//! response that produced it.

use crate::error::{HubmonError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// Metadata for a single image repository.
///
/// Every field defaults when absent so that partial or foreign JSON objects
/// (for example the `{"detail": ...}` body of an API error) decode into a
/// record that the validity filter then drops, rather than failing the
/// whole response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ImageResult {
    /// Image name (e.g., "nginx")
    #[serde(default)]
    pub name: String,
    /// Owning user or organisation (e.g., "library")
    #[serde(default)]
    pub user: String,
    /// Star count as reported by the API
    #[serde(default)]
    pub star_count: f64,
    /// Whether the image is an automated build
    #[serde(default)]
    pub is_automated: bool,
    /// Total pull count; may be very large
    #[serde(default)]
    pub pull_count: u64,
    /// Source-reported last update time; may be absent or null
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ImageResult {
    /// Parses a single image record from raw response bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::hub::ImageResult;
    ///
    /// let body = br#"{"name":"nginx","user":"library","star_count":100,"pull_count":5}"#;
    /// let image = ImageResult::from_bytes(body).unwrap();
    /// assert_eq!(image.name, "nginx");
    /// assert_eq!(image.pull_count, 5);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HubmonError::Decode`] wrapping the underlying parse error
    /// when the bytes are not a JSON object of the expected shape.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| HubmonError::decode_with_source("Failed to decode image record", e))
    }

    /// Returns true when the record carries both an image name and an owner.
    ///
    /// Records failing this check are dropped silently by the collector;
    /// they are malformed or partial upstream data, not a domain error.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.user.is_empty()
    }

    /// Last-updated time as seconds since the Unix epoch, `0.0` when absent.
    pub fn last_updated_seconds(&self) -> f64 {
        self.last_updated
            .map(|t| t.timestamp_micros() as f64 / 1e6)
            .unwrap_or(0.0)
    }
}

/// One page of an organisation listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrganisationPage {
    /// Total number of images in the organisation
    #[serde(default)]
    pub count: u64,
    /// URL of the next page, absent or null on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Image records on this page
    #[serde(default)]
    pub results: Vec<ImageResult>,
}

impl OrganisationPage {
    /// Parses one listing page from raw response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HubmonError::Decode`] wrapping the underlying parse error
    /// when the bytes are not a JSON object of the expected shape.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| HubmonError::decode_with_source("Failed to decode organisation page", e))
    }

    /// Returns the next-page URL when one is present and non-empty.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|n| !n.is_empty())
    }
}
