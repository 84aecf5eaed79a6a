/// Get the version string for hubmon and libhubmon
pub fn get_version_string() -> String {
    format!(
        "hubmon {}\nlibhubmon {}",
        env!("CARGO_PKG_VERSION"),
        libhubmon::version()
    )
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
