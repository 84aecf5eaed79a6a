//! Error types for Hubmon
//!
//! This module provides comprehensive error handling for all Hubmon
//! operations. All errors implement the standard Error trait and provide
//! context-rich error messages.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for Hubmon operations
#[derive(Error, Debug)]
pub enum HubmonError {
    /// Transport-level errors (connection, timeout, DNS) for a single attempt
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Every fetch attempt against a URL failed or produced no response
    #[error("Exhausted {attempts} fetch attempts for {url}")]
    ExhaustedRetries {
        url: String,
        attempts: u32,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An organisation listing page reported zero images
    #[error("No images found for url: {url}")]
    NoResults { url: String },

    /// Malformed response body (terminal, never retried)
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors (empty URL, bad namespace, etc.)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (no targets, invalid retry count)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for Hubmon operations
pub type Result<T> = std::result::Result<T, HubmonError>;

impl HubmonError {
    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::error::HubmonError;
    ///
    /// let err = HubmonError::network("connection refused");
    /// assert!(matches!(err, HubmonError::Network { .. }));
    /// ```
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::error::HubmonError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
    /// let err = HubmonError::network_with_source("failed to connect", io_err);
    /// assert!(matches!(err, HubmonError::Network { .. }));
    /// ```
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new exhausted-retries error.
    ///
    /// Used when every fetch attempt against a URL failed. The last
    /// transport error, if one was captured, is carried as the source.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::error::HubmonError;
    ///
    /// let err = HubmonError::exhausted_retries("https://hub.docker.com/v2/repositories/a", 3, None);
    /// assert!(matches!(err, HubmonError::ExhaustedRetries { attempts: 3, .. }));
    /// ```
    pub fn exhausted_retries<S: Into<String>>(
        url: S,
        attempts: u32,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ExhaustedRetries {
            url: url.into(),
            attempts,
            source,
        }
    }

    /// Creates a new no-results error naming the listing URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::error::HubmonError;
    ///
    /// let err = HubmonError::no_results("https://hub.docker.com/v2/repositories/ghost");
    /// assert!(err.to_string().contains("ghost"));
    /// ```
    pub fn no_results<S: Into<String>>(url: S) -> Self {
        Self::NoResults { url: url.into() }
    }

    /// Creates a new decode error.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new decode error wrapping the underlying parse failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::error::HubmonError;
    ///
    /// let parse_err = serde_json::from_slice::<serde_json::Value>(b"not json").unwrap_err();
    /// let err = HubmonError::decode_with_source("failed to decode image record", parse_err);
    /// assert!(matches!(err, HubmonError::Decode { .. }));
    /// ```
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::error::HubmonError;
    ///
    /// let err = HubmonError::validation("base URL cannot be empty");
    /// assert!(matches!(err, HubmonError::Validation { .. }));
    /// ```
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new validation error with a source error.
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::error::HubmonError;
    ///
    /// let err = HubmonError::config("no organisations or images provided");
    /// assert!(matches!(err, HubmonError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
