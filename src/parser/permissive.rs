use std::path::Path;

use super::{PERMISSIVE_TAG, ParseError, ParseResult, Parser};

/// Accepts any content. Rules then work on the raw text alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveParser;

impl PermissiveParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Parser for PermissiveParser {
    fn parser_type(&self) -> &'static str {
        PERMISSIVE_TAG
    }

    fn can_parse(&self, _content: &str) -> bool {
        true
    }

    fn parse(&self, content: &str, path: &Path) -> Result<ParseResult, ParseError> {
        Ok(ParseResult::new(path, content, true))
    }
}
