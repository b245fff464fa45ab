use serde_json::{Value, json};

pub const DEFAULT_PRIMARY_PARSER: &str = "boxlang";
pub const DEFAULT_FALLBACK_PARSER: &str = "regex";
pub const DEFAULT_PARSER_TIMEOUT_MS: i64 = 30_000;
pub const DEFAULT_MAX_FILE_SIZE: i64 = 10 * 1024 * 1024;
pub const DEFAULT_ENCODING: &str = "UTF-8";
pub const DEFAULT_MAX_THREADS: i32 = 4;
pub const DEFAULT_CACHE_DIRECTORY: &str = ".lucee-toolbox-cache";
pub const DEFAULT_INDENT_SIZE: i32 = 4;
pub const DEFAULT_INDENT_TYPE: &str = "spaces";
pub const DEFAULT_MAX_EMPTY_LINES: i32 = 1;
pub const DEFAULT_MAX_FUNCTION_LENGTH: i32 = 50;
pub const DEFAULT_MAX_LINE_LENGTH: i32 = 120;
pub const DEFAULT_MAX_FILE_LENGTH: i32 = 1000;
pub const DEFAULT_INTERFACE_PREFIX: &str = "I";
pub const DEFAULT_ABSTRACT_SUFFIX: &str = "Abstract";
pub const DEFAULT_CURLY_BRACE_STYLE: &str = "same-line";

pub const DEFAULT_INCLUDES: &[&str] = &["**/*.cfm", "**/*.cfc", "**/*.cfml"];
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/node_modules/**",
    "**/target/**",
    "**/build/**",
    "**/.git/**",
];

/// Parser identifiers accepted for `parser.primary` and `parser.fallback`.
pub const KNOWN_PARSERS: &[&str] = &["boxlang", "lucee", "regex"];

/// Values accepted for `linting.rules.whitespace.indentType`.
pub const KNOWN_INDENT_TYPES: &[&str] = &["spaces", "tabs"];

/// The embedded settings document every loaded configuration is layered over.
#[must_use]
pub fn default_document() -> Value {
    json!({
        "parser": {
            "primary": DEFAULT_PRIMARY_PARSER,
            "fallback": DEFAULT_FALLBACK_PARSER,
            "timeout": DEFAULT_PARSER_TIMEOUT_MS,
            "maxFileSize": DEFAULT_MAX_FILE_SIZE,
            "encoding": DEFAULT_ENCODING
        },
        "performance": {
            "parallelProcessing": true,
            "maxThreads": DEFAULT_MAX_THREADS,
            "enableCaching": true,
            "cacheDirectory": DEFAULT_CACHE_DIRECTORY
        },
        "linting": {
            "enabled": true,
            "severity": {
                "error": ["SECURITY_VIOLATION", "SYNTAX_ERROR"],
                "warning": ["NAMING_CONVENTION", "BEST_PRACTICE"],
                "info": ["STYLE_GUIDE", "DOCUMENTATION"]
            },
            "disabledRules": [],
            "rules": {
                "naming": {
                    "componentCase": "PascalCase",
                    "functionCase": "camelCase",
                    "variableCase": "camelCase",
                    "constantCase": "UPPER_CASE",
                    "fileCase": "camelCase",
                    "cfcFileCase": "PascalCase",
                    "cfmFileCase": "camelCase",
                    "interfacePrefix": DEFAULT_INTERFACE_PREFIX,
                    "abstractSuffix": DEFAULT_ABSTRACT_SUFFIX,
                    "baseSuffix": "Base"
                },
                "whitespace": {
                    "indentSize": DEFAULT_INDENT_SIZE,
                    "indentType": DEFAULT_INDENT_TYPE,
                    "trimTrailingWhitespace": true,
                    "insertFinalNewline": true,
                    "maxEmptyLines": DEFAULT_MAX_EMPTY_LINES
                },
                "codeStructure": {
                    "requireCurlyBraces": true,
                    "curlyBraceStyle": DEFAULT_CURLY_BRACE_STYLE,
                    "maxFunctionLength": DEFAULT_MAX_FUNCTION_LENGTH,
                    "maxLineLength": DEFAULT_MAX_LINE_LENGTH,
                    "maxFileLength": DEFAULT_MAX_FILE_LENGTH,
                    "requireInit": true,
                    "requireReturnTypes": true,
                    "requireArgumentTypes": true,
                    "useAccessors": true
                },
                "bestPractices": {
                    "useVarScoping": true,
                    "avoidEvaluate": true,
                    "preferDoubleQuotes": true
                },
                "security": {
                    "checkSqlInjection": true,
                    "checkXss": true
                }
            }
        },
        "formatting": {
            "enabled": true,
            "indentation": {
                "type": DEFAULT_INDENT_TYPE,
                "size": DEFAULT_INDENT_SIZE
            },
            "braces": {
                "style": DEFAULT_CURLY_BRACE_STYLE
            },
            "wrapping": {
                "maxLineLength": DEFAULT_MAX_LINE_LENGTH
            }
        },
        "includes": DEFAULT_INCLUDES,
        "excludes": DEFAULT_EXCLUDES,
        "customRules": {}
    })
}

/// Deep-merges `overlay` into `base`. Objects merge per key; anything else is replaced.
#[must_use]
pub fn merge_documents(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => merge_documents(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}
