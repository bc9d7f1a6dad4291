//! Version extraction from file content

use crate::error::AuditError;
use crate::search::types::VersionMatch;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// "ecs", then "version", then a `MAJOR.MINOR.PATCH` number in ASCII digits.
/// Anything that isn't a letter or digit may sit between the three parts.
pub const DEFAULT_VERSION_PATTERN: &str =
    r"(?i)ecs[\W_]*version[\W_]*([0-9]+\.[0-9]+\.[0-9]+)";

static DEFAULT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_VERSION_PATTERN).unwrap_or_else(|e| panic!("default pattern is valid: {e}"))
});

/// How many versions to report per file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Only the first mention in the file
    #[default]
    First,
    /// Every non-overlapping mention, in file order
    All,
}

/// Extracts version strings with a single-capture regex
#[derive(Debug, Clone)]
pub struct VersionExtractor {
    regex: Regex,
    policy: MatchPolicy,
}

impl Default for VersionExtractor {
    fn default() -> Self {
        Self {
            regex: DEFAULT_REGEX.clone(),
            policy: MatchPolicy::First,
        }
    }
}

impl VersionExtractor {
    #[must_use]
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Use a custom regex; capture group 1 is reported as the version
    ///
    /// # Errors
    /// Returns `InvalidRegex` if the pattern doesn't compile or has no
    /// capture group.
    pub fn with_pattern(pattern: &str, policy: MatchPolicy) -> Result<Self, AuditError> {
        let regex = Regex::new(pattern).map_err(|e| AuditError::InvalidRegex {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(AuditError::InvalidRegex {
                pattern: pattern.to_string(),
                reason: "pattern needs a capture group for the version".to_string(),
            });
        }

        Ok(Self { regex, policy })
    }

    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Extract versions from `content`, attributing them to `path`
    #[must_use]
    pub fn extract(&self, content: &str, path: &Path) -> Vec<VersionMatch> {
        let to_match = |caps: regex::Captures<'_>| {
            caps.get(1).map(|m| VersionMatch {
                version: m.as_str().to_string(),
                path: path.to_path_buf(),
            })
        };

        match self.policy {
            // A custom regex may leave group 1 unset on some matches
            MatchPolicy::First => self
                .regex
                .captures_iter(content)
                .find_map(to_match)
                .into_iter()
                .collect(),
            MatchPolicy::All => self.regex.captures_iter(content).filter_map(to_match).collect(),
        }
    }
}
