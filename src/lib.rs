// src/lib.rs

//! Debian package version resolution for build-module registries
//!
//! Resolves a registry-legal module identity (name + version) for a Debian
//! package dependency so a build-module registry can reference system
//! packages deterministically:
//!
//! - Identifier normalization into the restricted module-name grammar
//! - Debian version parsing (`[epoch:]upstream-version[-revision]`)
//! - Epoch-then-upstream version ordering
//! - Constraint evaluation over `>=1.0,<2.0` style AND-lists
//! - Best-match resolution against a filesystem registry, with a live
//!   `apt-cache` fallback for unregistered modules
//!
//! The ordering is intentionally coarse: only the leading numeric part of
//! the upstream version participates, so `~`/`+` suffixes and packaging
//! revisions never tie-break. See [`version::DebianVersion`] for details.

pub mod apt;
mod error;
pub mod module;
pub mod registry;
pub mod version;

pub use apt::{AptCache, PackageIndex, VERSION_ATTRIBUTE, extract_attribute};
pub use error::{Error, Result};
pub use module::{Module, module_name, module_version};
pub use registry::{Registry, VERSION_FILE, package_version};
pub use version::spec::{ConstraintOp, SpecEntry, VersionSpec};
pub use version::{DebianVersion, compare_version_strings, compatibility_level};
