// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use debmod::VERSION_FILE;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a registry tree with one module and the given versions.
///
/// Each version gets its own directory named after the raw string, holding
/// a `version.txt` with that string as content.
///
/// Returns the TempDir holding the registry root - keep it alive to
/// prevent cleanup.
pub fn registry_with_versions(module: &str, versions: &[&str]) -> TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("modules").join(module)).unwrap();

    for version in versions {
        add_version(root.path(), module, version, version);
    }

    root
}

/// Register one version directory under an existing registry root.
pub fn add_version(root: &Path, module: &str, dir_name: &str, contents: &str) {
    let version_dir = root.join("modules").join(module).join(dir_name);
    fs::create_dir_all(&version_dir).unwrap();
    fs::write(version_dir.join(VERSION_FILE), contents).unwrap();
}

/// Install a tracing subscriber honoring RUST_LOG; safe to call from every
/// test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
