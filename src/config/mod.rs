mod defaults;
mod loader;
mod model;
mod rule_sets;
mod validation;

pub use defaults::{
    DEFAULT_EXCLUDES, DEFAULT_INCLUDES, KNOWN_INDENT_TYPES, KNOWN_PARSERS, default_document,
    merge_documents,
};
pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem,
    parse_document,
};
pub use model::Config;
pub use rule_sets::{AVAILABLE_RULE_SETS, builtin_overlay};
pub use validation::ConfigIssue;
