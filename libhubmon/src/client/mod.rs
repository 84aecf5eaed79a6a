//! HTTP client for registry API communication.
//!
//! This module provides a thin HTTP client built on reqwest for fetching
//! metadata from the Docker Hub v2 repositories API. It owns the per-request
//! timeout and the retry-on-transport-failure policy; everything above it
//! (pagination, decoding) treats a fetch as a single bytes-or-error call.

use crate::error::{HubmonError, Result};
use reqwest::Client as ReqwestClient;
use std::time::Duration;


/// Default base URL of the Docker Hub repositories API.
pub const DEFAULT_BASE_URL: &str = "https://hub.docker.com/v2/repositories";

/// Configuration for the HTTP client.
///
/// This struct allows customization of HTTP client behavior such as timeouts
/// and retry attempts. Use the builder pattern to configure:
///
/// # Examples
///
/// ```
/// use libhubmon::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_timeout(10)
///     .with_retries(5);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 5)
    pub timeout_seconds: u64,
    /// Fetch attempts per URL before giving up, minimum 1 (default: 3)
    pub retries: u32,
    /// Maximum idle connections per host (default: 10)
    pub max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            retries: 3,
            max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    ///
    /// Default values:
    /// - timeout: 5 seconds
    /// - retries: 3 attempts
    /// - max_idle_per_host: 10 connections
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::client::ClientConfig;
    ///
    /// let config = ClientConfig::new();
    /// assert_eq!(config.timeout_seconds, 5);
    /// assert_eq!(config.retries, 3);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::client::ClientConfig;
    ///
    /// let config = ClientConfig::new().with_timeout(10);
    /// assert_eq!(config.timeout_seconds, 10);
    /// ```
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the number of fetch attempts per URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::client::ClientConfig;
    ///
    /// let config = ClientConfig::new().with_retries(5);
    /// assert_eq!(config.retries, 5);
    /// ```
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }
}

/// HTTP client for registry API fetches.
///
/// Handles connection pooling, per-request timeouts, and the retry loop for
/// transport-level failures. A non-2xx status is not a fetch failure at this
/// layer: the body is returned as-is and surfaces to the caller as a decode
/// or validity failure.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    /// Base API URL (e.g., "https://hub.docker.com/v2/repositories")
    base_url: String,
    /// Fetch attempts per URL, at least 1
    retries: u32,
}

impl Client {
    /// Creates a new client for the specified base API URL with default
    /// configuration.
    ///
    /// For custom configuration, use [`Client::with_config`].
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::client::Client;
    ///
    /// let client = Client::new("https://hub.docker.com/v2/repositories").unwrap();
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Creates a new client for the specified base API URL with custom
    /// configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the repositories API
    /// * `config` - Client configuration (timeout, retries, pooling)
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::client::{Client, ClientConfig};
    ///
    /// let config = ClientConfig::new().with_timeout(10).with_retries(5);
    /// let client = Client::with_config("https://hub.docker.com/v2/repositories", config).unwrap();
    /// ```
    pub fn with_config(base_url: &str, config: ClientConfig) -> Result<Self> {
        // Validate and normalize the base URL
        let normalized_url = Self::normalize_url(base_url)?;

        if config.retries == 0 {
            return Err(HubmonError::config("retries must be at least 1"));
        }

        // Build the HTTP client with the provided configuration
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| HubmonError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            base_url: normalized_url,
            retries: config.retries,
        })
    }

    /// Normalizes a base URL by ensuring it has a scheme and removing trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        // Check if URL is empty
        if url.is_empty() {
            return Err(HubmonError::validation("Base URL cannot be empty"));
        }

        // Add default scheme if missing; the hosted API is TLS-only
        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("https://{}", url)
        } else {
            url.to_string()
        };

        // Remove trailing slashes
        let url = url.trim_end_matches('/');

        Ok(url.to_string())
    }

    /// Returns the base API URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured number of fetch attempts.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Fetches a URL and returns the raw response body.
    ///
    /// Issues a GET request against `url`. On a transport-level error
    /// (connection failure, timeout) the attempt is retried immediately, up
    /// to the configured attempt count; the last transport error is carried
    /// in the [`HubmonError::ExhaustedRetries`] returned when every attempt
    /// fails. A response with a non-2xx status is not retried: its body is
    /// returned and the caller surfaces the problem as a decode or validity
    /// failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use libhubmon::client::Client;
    ///
    /// # async fn example() -> libhubmon::error::Result<()> {
    /// let client = Client::new("https://hub.docker.com/v2/repositories")?;
    /// let body = client.fetch("https://hub.docker.com/v2/repositories/library/nginx").await?;
    /// println!("{} bytes", body.len());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Every attempt fails at the transport level (`ExhaustedRetries`)
    /// - The response body cannot be read after a successful exchange (`Network`)
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut last_error: Option<reqwest::Error> = None;

        for attempt in 1..=self.retries {
            if attempt == 1 {
                tracing::debug!(url, "fetching");
            } else {
                tracing::warn!(url, attempt, "retrying fetch after transport error");
            }

            match self.http_client.get(url).send().await {
                Ok(response) => {
                    // Read the full body so the connection is released on
                    // every exit path.
                    let body = response.bytes().await.map_err(|e| {
                        HubmonError::network_with_source(
                            format!("Failed to read response body from {}", url),
                            e,
                        )
                    })?;

                    return Ok(body.to_vec());
                }
                Err(e) => {
                    tracing::debug!(url, attempt, error = %e, "fetch attempt failed");
                    last_error = Some(e);
                }
            }
        }

        // Attempts exhausted without a response. Even if no error was
        // captured this must be an explicit failure, never a silent empty
        // success.
        Err(HubmonError::exhausted_retries(
            url,
            self.retries,
            last_error.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        ))
    }
}
