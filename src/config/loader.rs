use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{CfmlLintError, Result};

use super::Config;

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Searches the usual locations, starting at `search_dir`, and loads the first hit.
    /// Falls back to the built-in defaults when nothing is found.
    ///
    /// # Errors
    /// Returns an error if a found document cannot be parsed.
    fn load(&self, search_dir: Option<&Path>) -> Result<Config>;

    /// Loads a specific document, falling back to the defaults when it is absent or
    /// unreadable.
    ///
    /// # Errors
    /// Returns an error if the document exists but is malformed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

pub const LOCAL_CONFIG_NAME: &str = "cfml-lint.json";
const USER_CONFIG_NAME: &str = "config.json";

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Platform-specific configuration directory for cfml-lint
    /// (`~/.config/cfml-lint` on Linux).
    fn config_dir(&self) -> Option<PathBuf>;

    /// Canonicalize a path to its absolute, normalized form.
    ///
    /// # Errors
    /// Returns an error if the path cannot be canonicalized (e.g., file doesn't exist).
    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cfml-lint")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf> {
        dunce::canonicalize(path)
    }
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `cfml-lint.json` in the search directory (usually the input directory)
/// 2. `cfml-lint.json` in the current directory
/// 3. `config.json` in the platform user config directory
/// 4. The built-in defaults
#[derive(Debug, Default)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn candidate_paths(&self, search_dir: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(dir) = search_dir {
            candidates.push(dir.join(LOCAL_CONFIG_NAME));
        }
        if let Ok(cwd) = self.fs.current_dir() {
            candidates.push(cwd.join(LOCAL_CONFIG_NAME));
        }
        if let Some(dir) = self.fs.config_dir() {
            candidates.push(dir.join(USER_CONFIG_NAME));
        }
        candidates
    }

    fn current_base_dir(&self) -> PathBuf {
        let cwd = self.fs.current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.fs.canonicalize(&cwd).unwrap_or(cwd)
    }

    /// The built-in defaults, based at the current directory.
    #[must_use]
    pub fn defaults(&self) -> Config {
        Config::layered(Value::Object(serde_json::Map::new()), self.current_base_dir())
    }

    fn base_dir_of(&self, path: &Path) -> PathBuf {
        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent.to_path_buf(),
            None => self.fs.current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        self.fs.canonicalize(&parent).unwrap_or(parent)
    }
}

/// Parses a settings document, choosing TOML or JSON by extension.
///
/// # Errors
/// Returns `ConfigParse` when the content is not valid for its format.
pub fn parse_document(path: &Path, content: &str) -> Result<Value> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let to_error = |message: String| CfmlLintError::ConfigParse {
        path: path.to_path_buf(),
        message,
    };

    let document: Value = if is_toml {
        let table: toml::Table = toml::from_str(content).map_err(|e| to_error(e.to_string()))?;
        serde_json::to_value(table).map_err(|e| to_error(e.to_string()))?
    } else {
        serde_json::from_str(content).map_err(|e| to_error(e.to_string()))?
    };

    if !document.is_object() {
        return Err(to_error("top-level value must be an object".to_string()));
    }
    Ok(document)
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self, search_dir: Option<&Path>) -> Result<Config> {
        for candidate in self.candidate_paths(search_dir) {
            if self.fs.exists(&candidate) {
                return self.load_from_path(&candidate);
            }
        }
        tracing::warn!("No configuration file found, using defaults");
        Ok(self.defaults())
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        if !self.fs.exists(path) {
            tracing::warn!(
                "Configuration file not found: {}, using defaults",
                path.display()
            );
            return Ok(self.defaults());
        }

        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    "Cannot read configuration {}: {e}, using defaults",
                    path.display()
                );
                return Ok(self.defaults());
            }
        };

        let document = parse_document(path, &content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(Config::layered(document, self.base_dir_of(path)).with_source(path))
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
