use std::process::Command;

/// Stamp the short commit hash into `STUDYOS_BUILD_SHA` so the dashboard
/// footer and menu banner can show which build is running.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let sha = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|sha| !sha.is_empty());

    if let Some(sha) = sha {
        println!("cargo:rustc-env=STUDYOS_BUILD_SHA={sha}");
    }
}
