use super::*;
use std::error::Error;

#[test]
fn test_network_error_connection_refused() {
    let err = HubmonError::Network {
        message: "connection refused".to_string(),
        source: None,
    };

    assert!(matches!(err, HubmonError::Network { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_network_error_with_source_preserves_chain() {
    let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "request timed out");
    let err = HubmonError::network_with_source("fetch failed", io_err);

    assert!(err.source().is_some());
    assert!(err.source().unwrap().to_string().contains("timed out"));
}

#[test]
fn test_exhausted_retries_error_message() {
    let err = HubmonError::exhausted_retries("https://hub.docker.com/v2/repositories/a", 3, None);

    assert!(matches!(
        err,
        HubmonError::ExhaustedRetries { attempts: 3, .. }
    ));
    assert!(err.to_string().contains("3"));
    assert!(
        err.to_string()
            .contains("https://hub.docker.com/v2/repositories/a")
    );
}

#[test]
fn test_exhausted_retries_carries_last_transport_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
    let err = HubmonError::exhausted_retries("http://localhost:9", 2, Some(Box::new(io_err)));

    assert!(err.source().is_some());
    assert!(err.source().unwrap().to_string().contains("reset"));
}

#[test]
fn test_no_results_error_names_url() {
    let err = HubmonError::no_results("https://hub.docker.com/v2/repositories/ghost");

    assert!(matches!(err, HubmonError::NoResults { .. }));
    assert!(err.to_string().contains("No images found"));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_decode_error_wraps_parse_failure() {
    let parse_err = serde_json::from_slice::<serde_json::Value>(b"{oops").unwrap_err();
    let err = HubmonError::decode_with_source("failed to decode organisation page", parse_err);

    assert!(matches!(err, HubmonError::Decode { .. }));
    assert!(err.to_string().contains("organisation page"));
    // The original parse error detail must survive for diagnostics.
    assert!(err.source().is_some());
}

#[test]
fn test_validation_error() {
    let err = HubmonError::validation("base URL cannot be empty");

    assert!(matches!(err, HubmonError::Validation { .. }));
    assert!(err.to_string().contains("base URL"));
}

#[test]
fn test_config_error() {
    let err = HubmonError::config("no organisations or images provided");

    assert!(matches!(err, HubmonError::Config { .. }));
    assert!(err.to_string().contains("no organisations or images"));
}

#[test]
fn test_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HubmonError>();
}
