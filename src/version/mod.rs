// src/version/mod.rs

//! Debian version parsing and comparison
//!
//! This module parses `[epoch:]upstream-version[-revision]` strings into a
//! structured form and provides the epoch-then-upstream ordering used to
//! pick the best candidate from a registry. Only the leading numeric part
//! of the upstream version takes part in ordering; `~`, `+` and revision
//! suffixes are truncated away up front, so the ordering is coarser than
//! full dpkg comparison by design.

pub mod spec;

use crate::error::{Error, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Leading `N:` epoch prefix
static EPOCH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+):").unwrap());

/// First character that cannot be part of a dotted numeric version
static UPSTREAM_CUT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9.]").unwrap());

/// A parsed Debian version with epoch and truncated upstream components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebianVersion {
    original: String,
    epoch: Option<u64>,
    upstream: String,
}

impl DebianVersion {
    /// Parse a raw Debian version string.
    ///
    /// Format: [epoch:]upstream-version[-revision]
    /// Examples:
    /// - "1.2.3" → epoch=None, upstream="1.2.3"
    /// - "2:1.2.3-4" → epoch=2, upstream="1.2.3"
    /// - "1.0~rc1+dfsg-2" → epoch=None, upstream="1.0"
    ///
    /// An epoch is present only when the string starts with digits
    /// immediately followed by `:`; any other prefix is treated as part of
    /// the upstream version, not as an error. The upstream part keeps only
    /// its leading run of digits and dots, with trailing dots stripped.
    /// Empty input is the one grammar violation this parser can detect.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::MalformedVersion {
                input: raw.to_string(),
            });
        }

        let (epoch, rest) = match EPOCH.captures(raw) {
            Some(caps) => match caps[1].parse::<u64>() {
                Ok(epoch) => (Some(epoch), &raw[caps.get(0).unwrap().end()..]),
                // a digit run too large for an epoch behaves like a
                // non-numeric prefix: no epoch
                Err(_) => (None, raw),
            },
            None => (None, raw),
        };

        // truncation keeps the left part at each step
        let mut middle = rest;
        for separator in ['~', '+', '-'] {
            if let Some(pos) = middle.find(separator) {
                middle = &middle[..pos];
            }
        }

        let upstream = UPSTREAM_CUT
            .split(middle)
            .next()
            .unwrap_or("")
            .trim_end_matches('.')
            .to_string();

        Ok(Self {
            original: raw.to_string(),
            epoch,
            upstream,
        })
    }

    /// Raw input string as given to [`DebianVersion::parse`]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Epoch, when the version carries a valid `N:` prefix
    pub fn epoch(&self) -> Option<u64> {
        self.epoch
    }

    /// Truncated numeric upstream portion
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// Coarse display and grouping key: epoch digits (empty when absent)
    /// followed by the upstream. Not usable for ordering; use
    /// [`DebianVersion::compare`].
    pub fn semantic_version(&self) -> String {
        match self.epoch {
            Some(epoch) => format!("{epoch}{}", self.upstream),
            None => self.upstream.clone(),
        }
    }

    /// Compatibility level: epoch digits followed by the upstream major
    /// component. Two versions share a compatibility level when their
    /// epoch and major version are equal.
    pub fn compatibility_level(&self) -> String {
        let major = self.upstream.split('.').next().unwrap_or("");
        match self.epoch {
            Some(epoch) => format!("{epoch}{major}"),
            None => major.to_string(),
        }
    }

    /// Compare two Debian versions.
    ///
    /// The epoch decides first, but only when both versions carry one: a
    /// higher epoch always wins regardless of upstream content. When
    /// either side lacks an epoch the upstream components decide. Both
    /// upstreams are read as dotted numeric sequences and compared
    /// component-wise left to right, with missing trailing components
    /// counting as zero, so "1.2" and "1.2.0" compare equal.
    ///
    /// The relation is a total preorder, not a total order: structurally
    /// distinct versions such as "1.0" and "1.00" compare equal. That is
    /// why ordering is exposed as an explicit method rather than `Ord`.
    pub fn compare(&self, other: &DebianVersion) -> Ordering {
        if let (Some(a), Some(b)) = (self.epoch, other.epoch) {
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        let ours = components(&self.upstream);
        let theirs = components(&other.upstream);
        for i in 0..ours.len().max(theirs.len()) {
            let a = ours.get(i).copied().unwrap_or(0);
            let b = theirs.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        Ordering::Equal
    }
}

impl fmt::Display for DebianVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Numeric values of a dotted upstream string, one per component.
///
/// Components are runs of digits by construction; an empty component
/// counts as zero and oversized runs saturate instead of failing. An empty
/// upstream yields no components and therefore compares as all zeros.
fn components(upstream: &str) -> Vec<u64> {
    if upstream.is_empty() {
        return Vec::new();
    }

    upstream
        .split('.')
        .map(|part| {
            part.bytes().fold(0u64, |acc, digit| {
                acc.saturating_mul(10)
                    .saturating_add(u64::from(digit - b'0'))
            })
        })
        .collect()
}

/// Compare two raw Debian version strings.
///
/// Returns `Ordering::Greater` when `version_1` sorts above `version_2`.
pub fn compare_version_strings(version_1: &str, version_2: &str) -> Result<Ordering> {
    let version_1 = DebianVersion::parse(version_1)?;
    let version_2 = DebianVersion::parse(version_2)?;

    Ok(version_1.compare(&version_2))
}

/// Compatibility level for a raw Debian version string
pub fn compatibility_level(version: &str) -> Result<String> {
    Ok(DebianVersion::parse(version)?.compatibility_level())
}
