use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{CfmlLintError, Result};
use crate::path_utils::match_path;

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// One include or exclude pattern.
///
/// Matching precedence, first hit wins:
/// 1. exact equality
/// 2. a trailing `/` marks a directory prefix
/// 3. a pattern without `*` or `?` is also a directory prefix
/// 4. glob: `**` crosses `/`, `*` and `?` do not
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    glob: Option<GlobMatcher>,
}

fn is_under(path: &str, dir: &str) -> bool {
    path == dir
        || path
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl PathPattern {
    /// # Errors
    /// Returns `InvalidPattern` if the glob cannot be compiled.
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = if pattern.contains(['*', '?']) {
            let matcher = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| CfmlLintError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source: e,
                })?
                .compile_matcher();
            Some(matcher)
        } else {
            None
        };
        Ok(Self {
            raw: pattern.to_string(),
            glob,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a `/`-separated path string.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        if path == self.raw {
            return true;
        }
        if let Some(dir) = self.raw.strip_suffix('/')
            && is_under(path, dir)
        {
            return true;
        }
        if self.glob.is_none() && is_under(path, &self.raw) {
            return true;
        }
        self.glob.as_ref().is_some_and(|g| g.is_match(path))
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<PathPattern>> {
    patterns.iter().map(|p| PathPattern::new(p)).collect()
}

/// Include/exclude filter evaluated on paths relative to a base directory.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    includes: Vec<PathPattern>,
    excludes: Vec<PathPattern>,
    base_dir: PathBuf,
}

impl PatternFilter {
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn new(includes: &[String], excludes: &[String], base_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            includes: compile_all(includes)?,
            excludes: compile_all(excludes)?,
            base_dir: base_dir.into(),
        })
    }

    #[must_use]
    pub fn is_included(&self, relative: &str) -> bool {
        self.includes.iter().any(|p| p.matches(relative))
    }

    #[must_use]
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.excludes.iter().any(|p| p.matches(relative))
    }
}

impl FileFilter for PatternFilter {
    fn should_include(&self, path: &Path) -> bool {
        let relative = match_path(path, &self.base_dir);
        self.is_included(&relative) && !self.is_excluded(&relative)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
