mod filter;

pub use filter::{FileFilter, PathPattern, PatternFilter};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CfmlLintError, Result};

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths.
    ///
    /// # Errors
    /// Returns an error if the root does not exist.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .filter(|p| self.filter.should_include(p))
            .collect();
        files.sort();
        files
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(CfmlLintError::FileRead {
                path: root.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
            });
        }
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }
        let files = self.scan_impl(root);
        tracing::info!("Found {} files under {}", files.len(), root.display());
        Ok(files)
    }
}

/// Walks `root` and keeps regular files matching an include and no exclude pattern,
/// both evaluated relative to `base_dir`.
///
/// # Errors
/// Returns an error if a pattern is invalid or `root` does not exist.
pub fn select_files(
    root: &Path,
    includes: &[String],
    excludes: &[String],
    base_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let filter = PatternFilter::new(includes, excludes, base_dir)?;
    DirectoryScanner::new(filter).scan(root)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
