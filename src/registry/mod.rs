// src/registry/mod.rs

//! Filesystem registry resolution
//!
//! A registry stores one directory per module under `modules/`, one
//! subdirectory per registered version, each holding a `version.txt` with
//! the raw Debian version string:
//!
//! ```text
//! <root>/modules/<module>/<version-dir>/version.txt
//! ```
//!
//! Resolution picks the highest registered version satisfying a
//! constraint. A module missing from the registry is a routine absence
//! handled by falling back to the live package index; a module directory
//! that exists with no versions is a data-integrity fault.

use crate::apt::{AptCache, PackageIndex};
use crate::error::{Error, Result};
use crate::module;
use crate::version::DebianVersion;
use crate::version::spec::VersionSpec;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Version descriptor file inside each version directory
pub const VERSION_FILE: &str = "version.txt";

/// A filesystem-backed module registry
#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
}

impl Registry {
    /// Open a registry rooted at the given directory. Nothing is touched
    /// until a lookup walks the tree.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the registered versions of a module
    fn module_path(&self, module_name: &str) -> PathBuf {
        self.root.join("modules").join(module_name)
    }

    /// Resolve the highest registered version of a package that satisfies
    /// the constraint.
    ///
    /// Returns `Ok(None)` when the module is not registered or no
    /// registered version satisfies the constraint; callers fall back to
    /// the live package index in either case. A module directory that
    /// exists but contains no versions fails with
    /// [`Error::EmptyRegistryEntry`].
    pub fn resolve(&self, name: &str, arch: &str, version_spec: &str) -> Result<Option<String>> {
        let module_name = module::module_name(name, arch);
        let module_path = self.module_path(&module_name);

        if !module_path.exists() {
            info!(
                "module {} not found in local registry, expected path {} does not exist",
                module_name,
                module_path.display()
            );
            return Ok(None);
        }

        let raw_versions = read_versions(&module_path)?;
        if raw_versions.is_empty() {
            return Err(Error::EmptyRegistryEntry {
                module: module_name,
            });
        }

        let mut candidates = raw_versions
            .into_iter()
            .map(|raw| DebianVersion::parse(&raw).map(|parsed| (raw, parsed)))
            .collect::<Result<Vec<_>>>()?;
        candidates.sort_by(|a, b| b.1.compare(&a.1));

        let spec = VersionSpec::parse(version_spec)?;
        for (raw, parsed) in candidates {
            if spec.satisfies(&parsed) {
                debug!(
                    "found version {} for module {}",
                    parsed.semantic_version(),
                    module_name
                );
                return Ok(Some(raw));
            }
        }

        Ok(None)
    }

    /// Resolve a package version, falling back to the live package index
    /// when the registry yields nothing.
    ///
    /// The constraint is not re-applied to the fallback result: whatever
    /// version the index reports is returned as-is.
    pub fn package_version(
        &self,
        index: &dyn PackageIndex,
        name: &str,
        arch: &str,
        version_spec: &str,
    ) -> Result<String> {
        match self.resolve(name, arch, version_spec)? {
            Some(version) => Ok(version),
            None => index.installed_version(name, arch),
        }
    }
}

/// Read the raw version string of every version directory under a module.
///
/// Files other than directories are skipped; a version directory without
/// its descriptor file surfaces as [`Error::Io`].
fn read_versions(module_path: &Path) -> Result<Vec<String>> {
    let mut versions = Vec::new();
    for entry in fs::read_dir(module_path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            versions.push(fs::read_to_string(entry.path().join(VERSION_FILE))?);
        }
    }

    Ok(versions)
}

/// Resolve a package version against a registry, falling back to the
/// system package index via `apt-cache` for unregistered modules.
pub fn package_version(
    registry_root: impl AsRef<Path>,
    name: &str,
    arch: &str,
    version_spec: &str,
) -> Result<String> {
    Registry::new(registry_root.as_ref()).package_version(&AptCache, name, arch, version_spec)
}
