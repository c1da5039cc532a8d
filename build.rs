//! Build script for batch-manager
//!
//! Exposes build metadata (`BUILD_TIME`, `GIT_HASH`, `RUST_VERSION`) to the crate
//! so the binaries can report which build they are.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let build_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    emit("BUILD_TIME", build_time.to_string());

    // docs.rs builds have neither git metadata nor a stable rustc to ask
    let docs_rs = std::env::var_os("DOCS_RS").is_some();
    let git_hash = if docs_rs {
        Some("docs-rs-build".to_string())
    } else {
        command_output("git", &["rev-parse", "--short", "HEAD"])
    };
    let rust_version = if docs_rs {
        Some("stable".to_string())
    } else {
        command_output("rustc", &["--version"])
    };
    emit("GIT_HASH", git_hash.unwrap_or_else(|| "unknown".to_string()));
    emit("RUST_VERSION", rust_version.unwrap_or_else(|| "unknown".to_string()));

    for path in [".git/HEAD", ".git/refs/heads/", "Cargo.toml", "static/index.html"] {
        println!("cargo:rerun-if-changed={}", path);
    }
}

fn emit(key: &str, value: String) {
    println!("cargo:rustc-env={}={}", key, value);
}

/// Trimmed stdout of a successful command
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}
