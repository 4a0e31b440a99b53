// src/apt.rs

//! Live package index lookup via apt-cache
//!
//! When a module is not registered, the resolver asks the system package
//! database for the version it knows. The query is a single
//! `apt-cache show <name>:<arch>` invocation whose output is RFC 822-style
//! `Key: value` text; the `Version` attribute is extracted from it.

use crate::error::{Error, Result};
use std::process::Command;
use tracing::debug;

/// Version attribute as listed by `apt-cache show`
pub const VERSION_ATTRIBUTE: &str = "Version";

/// A live package database that can report the known version of a package
pub trait PackageIndex {
    /// Raw version string of the package as known to the index
    fn installed_version(&self, name: &str, arch: &str) -> Result<String>;
}

/// [`PackageIndex`] backed by the system apt cache
#[derive(Debug, Clone, Copy, Default)]
pub struct AptCache;

impl PackageIndex for AptCache {
    fn installed_version(&self, name: &str, arch: &str) -> Result<String> {
        if name.is_empty() || arch.is_empty() {
            return Err(Error::ExternalLookup {
                reason: "both name and arch need to be provided".to_string(),
            });
        }

        let package = format!("{name}:{arch}");
        debug!("querying apt-cache for {}", package);

        let output = Command::new("apt-cache")
            .args(["show", &package])
            .output()
            .map_err(|e| Error::ExternalLookup {
                reason: format!("failed to invoke apt-cache: {e}"),
            })?;

        if !output.status.success() {
            return Err(Error::ExternalLookup {
                reason: format!(
                    "apt-cache show {} exited with {}: {}",
                    package,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let package_info = String::from_utf8_lossy(&output.stdout);
        extract_attribute(&package_info, VERSION_ATTRIBUTE, true)
    }
}

/// Extract an attribute value from `apt-cache show` or `dpkg-deb` style
/// `Key: value` output.
///
/// The first line starting with the attribute name wins; leading
/// whitespace on a line is ignored and the value is the text following
/// `"<attribute>: "`. A missing attribute fails with
/// [`Error::AttributeNotFound`] when `must_exist` is set and yields an
/// empty string otherwise.
pub fn extract_attribute(package_info: &str, attribute: &str, must_exist: bool) -> Result<String> {
    let prefix_len = attribute.len() + ": ".len();

    for line in package_info.lines() {
        let line = line.trim_start();
        if line.starts_with(attribute) {
            return Ok(line.get(prefix_len..).unwrap_or("").to_string());
        }
    }

    if must_exist {
        Err(Error::AttributeNotFound {
            attribute: attribute.to_string(),
        })
    } else {
        Ok(String::new())
    }
}
