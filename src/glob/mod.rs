//! Glob matching of root-relative paths
//!
//! Expressions use `*` for "anything within one path segment" and `**` for
//! "zero or more whole segments". Both the path and the expression are
//! rooted with a single leading `/` before matching, so `*.txt` only hits
//! files directly under the root while `**/*.txt` hits them at any depth.

mod rules;

pub use rules::RuleSet;

use crate::types::{MirrorError, Result};
use globset::{Glob, GlobBuilder};
use std::path::Path;

/// Check one relative path against one glob expression
///
/// An absent expression matches everything. An absolute expression is
/// rejected: rules are scoped to the copy root and may not escape it.
pub fn matches(relative_path: &str, expression: Option<&str>) -> Result<bool> {
    let Some(expression) = expression else {
        return Ok(true);
    };
    let glob = compile(expression)?;
    Ok(glob.compile_matcher().is_match(rooted(relative_path)))
}

/// Check one relative path against every expression in `rules`
///
/// Returns `true` if at least one rule matches. An empty rule list matches
/// nothing, which is the opposite default of [`matches`] with no expression.
pub fn match_any<S: AsRef<str>>(relative_path: &str, rules: &[S]) -> Result<bool> {
    if rules.is_empty() {
        return Ok(false);
    }
    let set = RuleSet::new(rules)?;
    Ok(set.matches_str(relative_path))
}

/// Compile a relative glob expression into a rooted matcher
pub(crate) fn compile(expression: &str) -> Result<Glob> {
    if is_absolute_expression(expression) {
        return Err(MirrorError::invalid_argument(
            "glob expression must be relative to the copy root, got",
            expression,
        ));
    }

    GlobBuilder::new(&rooted(expression))
        .literal_separator(true)
        .build()
        .map_err(|e| MirrorError::InvalidPattern {
            pattern: expression.to_string(),
            reason: e.kind().to_string(),
        })
}

/// Prefix `value` with exactly one `/`, normalizing platform separators
pub(crate) fn rooted(value: &str) -> String {
    let normalized = if cfg!(windows) {
        value.replace('\\', "/")
    } else {
        value.to_string()
    };
    format!("/{}", normalized.trim_start_matches('/'))
}

fn is_absolute_expression(expression: &str) -> bool {
    if expression.starts_with('/') || expression.starts_with('\\') {
        return true;
    }

    // `C:`, `C:/` and `C:\` are roots on every platform; `c:foo` is a name
    let bytes = expression.as_bytes();
    if bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes.get(2), None | Some(b'/') | Some(b'\\'))
    {
        return true;
    }

    Path::new(expression).has_root()
}
