// src/module.rs

//! Registry-legal module identifiers for Debian packages
//!
//! Module names must contain only lowercase letters, digits, dots, hyphens
//! and underscores, begin with a lowercase letter and end with a lowercase
//! letter or digit. Debian package names additionally allow `+` and may
//! begin with a digit, so those two cases are rewritten; everything else a
//! Debian name may legally contain already fits the module grammar.

/// Build a registry-legal module name from a package name and architecture.
///
/// The architecture is appended to the name because two Debian packages may
/// share a name across architectures while a module has no arch attribute
/// of its own. `+` becomes the literal `plus` and a leading digit gets a
/// `package_` prefix.
///
/// Examples:
/// - `module_name("zlib1g", "amd64")` → `"zlib1g_amd64"`
/// - `module_name("1pkg+x", "amd64")` → `"package_1pkgplusx_amd64"`
pub fn module_name(name: &str, arch: &str) -> String {
    let module_name = format!("{name}_{arch}").replace('+', "plus");

    if module_name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("package_{module_name}")
    } else {
        module_name
    }
}

/// Strip the version characters the module grammar does not allow.
///
/// Drops the epoch prefix (everything up to the last `:`) and everything
/// from the first `+` or `~` on. Pure string transform, never fails.
pub fn module_version(version: &str) -> String {
    let version = version.rsplit(':').next().unwrap_or(version);
    let version = version.split('+').next().unwrap_or(version);
    let version = version.split('~').next().unwrap_or(version);

    version.to_string()
}

/// A Debian package pinned to one architecture and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub arch: String,
    pub version: String,
}

impl Module {
    pub fn new(
        name: impl Into<String>,
        arch: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            arch: arch.into(),
            version: version.into(),
        }
    }

    /// Registry-legal module name for this package
    pub fn module_name(&self) -> String {
        module_name(&self.name, &self.arch)
    }

    /// Registry-legal module version for this package
    pub fn module_version(&self) -> String {
        module_version(&self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_module_name_appends_arch() {
        assert_eq!(module_name("zlib1g", "amd64"), "zlib1g_amd64");
    }

    #[test]
    fn test_module_name_escapes_plus_and_leading_digit() {
        assert_eq!(module_name("1pkg+x", "amd64"), "package_1pkgplusx_amd64");
        assert_eq!(module_name("g++", "arm64"), "gplusplus_arm64");
        assert_eq!(module_name("7zip", "amd64"), "package_7zip_amd64");
    }

    #[test]
    fn test_module_name_matches_identifier_grammar() {
        let grammar = Regex::new(r"^[a-z][a-z0-9._-]*[a-z0-9]$").unwrap();
        for (name, arch) in [
            ("zlib1g", "amd64"),
            ("1pkg+x", "amd64"),
            ("g++", "arm64"),
            ("libstdc++6", "i386"),
            ("9base", "amd64"),
        ] {
            let module_name = module_name(name, arch);
            assert!(
                grammar.is_match(&module_name),
                "{module_name} violates the module name grammar"
            );
        }
    }

    #[test]
    fn test_module_version_drops_epoch_and_suffixes() {
        assert_eq!(module_version("1:2.3+git~abc-1"), "2.3");
        assert_eq!(module_version("2.3.4-5"), "2.3.4-5");
        assert_eq!(module_version("1.0~rc1"), "1.0");
        assert_eq!(module_version("1.0+dfsg-3"), "1.0");
    }

    #[test]
    fn test_module_accessors() {
        let module = Module::new("1pkg+x", "amd64", "1:2.3+git~abc-1");
        assert_eq!(module.module_name(), "package_1pkgplusx_amd64");
        assert_eq!(module.module_version(), "2.3");
    }
}
