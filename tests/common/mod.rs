#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the cfml-lint binary.
#[macro_export]
macro_rules! cfml_lint {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("cfml-lint"))
    };
}

pub const CLEAN_COMPONENT: &str = "component {\n\n    public void function init() {\n        return;\n    }\n}\n";

pub const MESSY_PAGE: &str = "<cfset greeting = \"hi\">   \r\n\r\n\r\n\r\n<cfoutput>#greeting#</cfoutput>\r\n";

/// A temporary project directory.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Writes `content` to `relative_path`, creating parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a `cfml-lint.json` settings document at the project root.
    pub fn create_config(&self, json: &str) {
        self.create_file("cfml-lint.json", json);
    }
}
