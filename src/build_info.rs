/// Short git commit of the build, stamped by build.rs when available.
pub fn build_sha() -> Option<&'static str> {
    option_env!("STUDYOS_BUILD_SHA")
}

/// Version string shown in the menu banner and dashboard footer.
pub fn version_label() -> String {
    match build_sha() {
        Some(sha) => format!("v{} ({sha})", env!("CARGO_PKG_VERSION")),
        None => format!("v{}", env!("CARGO_PKG_VERSION")),
    }
}
