use super::*;

#[test]
fn test_version_string_names_both_crates() {
    let version = get_version_string();
    assert!(version.starts_with("hubmon "));
    assert!(version.contains("\nlibhubmon "));
}

#[test]
fn test_version_string_carries_crate_version() {
    assert!(get_version_string().contains(env!("CARGO_PKG_VERSION")));
}
