// src/version/spec.rs

//! Version constraint parsing and matching
//!
//! A constraint is a comma-separated AND-list of clauses such as
//! `>=1.0,<2.0`. Each clause pairs a comparison operator with a Debian
//! version; a candidate must satisfy every clause.

use crate::error::{Error, Result};
use crate::version::DebianVersion;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Comparison operator of a single constraint clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl ConstraintOp {
    /// Parse an operator prefix.
    ///
    /// Debian control files spell strict comparisons `>>` and `<<`; a bare
    /// `=` or no operator at all means an exact match. Surrounding
    /// whitespace is ignored.
    fn parse(op: &str) -> Option<Self> {
        match op.trim() {
            "" | "=" | "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">" | ">>" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "<" | "<<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            _ => None,
        }
    }

    fn accepts(self, ord: Ordering) -> bool {
        match self {
            Self::Eq => ord == Ordering::Equal,
            Self::Ne => ord != Ordering::Equal,
            Self::Gt => ord == Ordering::Greater,
            Self::Ge => ord != Ordering::Less,
            Self::Lt => ord == Ordering::Less,
            Self::Le => ord != Ordering::Greater,
        }
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        };
        write!(f, "{op}")
    }
}

/// One clause of a version constraint
#[derive(Debug, Clone)]
pub struct SpecEntry {
    op: ConstraintOp,
    version: DebianVersion,
}

impl SpecEntry {
    pub fn op(&self) -> ConstraintOp {
        self.op
    }

    pub fn version(&self) -> &DebianVersion {
        &self.version
    }

    fn matches(&self, candidate: &DebianVersion) -> bool {
        self.op.accepts(candidate.compare(&self.version))
    }
}

impl fmt::Display for SpecEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version.semantic_version())
    }
}

/// A parsed version constraint; every clause must hold
#[derive(Debug, Clone, Default)]
pub struct VersionSpec {
    entries: Vec<SpecEntry>,
}

impl VersionSpec {
    /// Parse a comma-separated constraint string.
    ///
    /// Each clause splits at its first digit into an operator prefix and a
    /// version suffix. A clause without a digit or with an unknown
    /// operator fails with [`Error::MalformedSpec`]. An empty string is
    /// the empty constraint, satisfied by every version.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.is_empty() {
            return Ok(Self::default());
        }

        let mut entries = Vec::new();
        for clause in spec.split(',') {
            let digit = clause
                .find(|c: char| c.is_ascii_digit())
                .ok_or_else(|| Error::MalformedSpec {
                    clause: clause.to_string(),
                })?;
            let (op, version) = clause.split_at(digit);
            let op = ConstraintOp::parse(op).ok_or_else(|| Error::MalformedSpec {
                clause: clause.to_string(),
            })?;

            entries.push(SpecEntry {
                op,
                version: DebianVersion::parse(version)?,
            });
        }

        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SpecEntry] {
        &self.entries
    }

    /// Check a candidate version against every clause, stopping at the
    /// first one it fails.
    pub fn satisfies(&self, version: &DebianVersion) -> bool {
        self.entries.iter().all(|entry| {
            let satisfied = entry.matches(version);
            debug!(
                "checking if package version {} satisfies specification {}: {}",
                version, entry, satisfied
            );
            satisfied
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(raw: &str) -> DebianVersion {
        DebianVersion::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_range() {
        let spec = VersionSpec::parse(">=1.0,<2.0").unwrap();
        assert_eq!(spec.entries().len(), 2);
        assert_eq!(spec.entries()[0].op(), ConstraintOp::Ge);
        assert_eq!(spec.entries()[1].op(), ConstraintOp::Lt);
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = VersionSpec::parse("").unwrap();
        assert!(spec.is_empty());
        assert!(spec.satisfies(&version("99.9")));
    }

    #[test]
    fn test_range_satisfaction() {
        let spec = VersionSpec::parse(">=1.0,<2.0").unwrap();
        assert!(spec.satisfies(&version("1.5")));
        assert!(spec.satisfies(&version("1.0")));
        assert!(!spec.satisfies(&version("2.5")));
        assert!(!spec.satisfies(&version("0.9")));
    }

    #[test]
    fn test_clause_without_digit_is_malformed() {
        assert!(matches!(
            VersionSpec::parse("latest"),
            Err(Error::MalformedSpec { .. })
        ));
        assert!(matches!(
            VersionSpec::parse(">=1.0,newest"),
            Err(Error::MalformedSpec { .. })
        ));
    }

    #[test]
    fn test_unknown_operator_is_malformed() {
        assert!(matches!(
            VersionSpec::parse("~=1.0"),
            Err(Error::MalformedSpec { .. })
        ));
    }

    #[test]
    fn test_debian_operator_spellings() {
        let strictly_newer = VersionSpec::parse(">>2.0").unwrap();
        assert!(strictly_newer.satisfies(&version("2.1")));
        assert!(!strictly_newer.satisfies(&version("2.0")));

        let strictly_older = VersionSpec::parse("<<2.0").unwrap();
        assert!(strictly_older.satisfies(&version("1.9")));
        assert!(!strictly_older.satisfies(&version("2.0")));
    }

    #[test]
    fn test_bare_version_means_exact_match() {
        let spec = VersionSpec::parse("1.5").unwrap();
        assert!(spec.satisfies(&version("1.5")));
        assert!(spec.satisfies(&version("1.5.0")));
        assert!(!spec.satisfies(&version("1.6")));

        let spec = VersionSpec::parse("=1.5").unwrap();
        assert!(spec.satisfies(&version("1.5")));
    }

    #[test]
    fn test_not_equal() {
        let spec = VersionSpec::parse("!=1.5").unwrap();
        assert!(spec.satisfies(&version("1.6")));
        assert!(!spec.satisfies(&version("1.5")));
    }

    #[test]
    fn test_operator_with_spaces() {
        let spec = VersionSpec::parse(">= 1.0").unwrap();
        assert!(spec.satisfies(&version("1.0")));
    }

    #[test]
    fn test_clause_version_may_carry_an_epoch() {
        // the clause splits at its first digit, so the epoch digits lead
        let spec = VersionSpec::parse(">=1:1.0").unwrap();
        assert_eq!(spec.entries()[0].version().epoch(), Some(1));
        assert!(spec.satisfies(&version("2:0.5")));
        assert!(!spec.satisfies(&version("0:2.0")));
    }
}
