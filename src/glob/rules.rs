//! Compiled exclusion rule set

use super::{compile, rooted};
use crate::types::{MirrorError, Result};
use globset::{GlobSet, GlobSetBuilder};
use std::path::Path;

/// An immutable, validated list of exclusion globs
///
/// Matching is a logical OR over all rules. An empty set excludes nothing.
#[derive(Debug, Clone)]
pub struct RuleSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl RuleSet {
    /// Compile every rule up front
    ///
    /// Fails on the first absolute or syntactically invalid expression, so a
    /// bad rule is reported before any filesystem access happens.
    pub fn new<I, S>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::new();

        for rule in rules {
            let rule = rule.as_ref();
            builder.add(compile(rule)?);
            patterns.push(rule.to_string());
        }

        let set = builder.build().map_err(|e| MirrorError::InvalidPattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        })?;

        Ok(Self { patterns, set })
    }

    /// A set with no rules
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The source expressions, in insertion order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check a root-relative path string against the set
    pub fn matches_str(&self, relative_path: &str) -> bool {
        !self.is_empty() && self.set.is_match(rooted(relative_path))
    }

    /// Check a root-relative path against the set
    ///
    /// The path is matched as-is rather than through a lossy string, so a
    /// file name that is not valid UTF-8 keeps its real bytes on Unix.
    pub fn is_excluded(&self, relative_path: &Path) -> bool {
        !self.is_empty() && self.set.is_match(Path::new("/").join(relative_path))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::empty()
    }
}
