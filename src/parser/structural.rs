use std::path::Path;

use crate::result::Severity;

use super::{
    CommentKind, LineIndex, ParseComment, ParseError, ParseIssue, ParseResult, Parser, Span,
    STRUCTURAL_TAG,
};

const SCRIPT_EXTENSIONS: &[&str] = &["cfc", "bx", "bxs", "cfs"];

/// Delimiter-balancing scanner.
///
/// Script files are scanned whole. Tag files only have their `<cfscript>` blocks
/// scanned, plus their markup comments collected. Brackets inside strings and comments
/// are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralParser;

impl StructuralParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn is_script_source(content: &str, path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    SCRIPT_EXTENSIONS.contains(&ext.as_str()) && !content.trim_start().starts_with('<')
}

impl Parser for StructuralParser {
    fn parser_type(&self) -> &'static str {
        STRUCTURAL_TAG
    }

    fn can_parse(&self, content: &str) -> bool {
        !content.contains('\0')
    }

    fn parse(&self, content: &str, path: &Path) -> Result<ParseResult, ParseError> {
        if let Some(offset) = content.find('\0') {
            let (line, column) = LineIndex::new(content).position(offset);
            return Err(ParseError::new(
                path.display().to_string(),
                line,
                column,
                "Binary content cannot be parsed",
            ));
        }

        let mut scan = Scan::new(content);
        if is_script_source(content, path) {
            scan.script(0, content.len());
        } else {
            scan.markup();
        }

        Ok(ParseResult::new(path, content, true)
            .with_issues(scan.issues)
            .with_comments(scan.comments))
    }
}

struct Scan<'a> {
    content: &'a str,
    lower: String,
    index: LineIndex<'a>,
    issues: Vec<ParseIssue>,
    comments: Vec<ParseComment>,
}

impl<'a> Scan<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            lower: content.to_ascii_lowercase(),
            index: LineIndex::new(content),
            issues: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn error(&mut self, offset: usize, message: String) {
        let (line, column) = self.index.position(offset);
        self.issues.push(
            ParseIssue::new(message, Severity::Error, line, column).with_rule("SYNTAX_ERROR"),
        );
    }

    fn span(&self, start: usize, end: usize) -> Span {
        let (start_line, start_column) = self.index.position(start);
        let (end_line, end_column) = self.index.position(end);
        Span {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Records a comment opened at `start` and returns the offset just past it.
    fn comment(&mut self, start: usize, open: &str, close: &str, kind: CommentKind) -> usize {
        let body_start = start + open.len();
        let Some(rel) = self.content[body_start..].find(close) else {
            self.error(start, format!("Unterminated comment starting with '{open}'"));
            return self.content.len();
        };
        let end = body_start + rel + close.len();
        self.comments.push(ParseComment {
            text: self.content[body_start..body_start + rel].to_string(),
            kind,
            span: self.span(start, end),
        });
        end
    }

    fn markup(&mut self) {
        let mut pos = 0;
        while pos < self.content.len() {
            let comment = self.lower[pos..].find("<!--").map(|i| pos + i);
            let script = self.lower[pos..].find("<cfscript").map(|i| pos + i);
            pos = match (comment, script) {
                (Some(c), Some(s)) if c < s => self.markup_comment(c),
                (Some(c), None) => self.markup_comment(c),
                (_, Some(s)) => self.script_block(s),
                (None, None) => break,
            };
        }
    }

    fn markup_comment(&mut self, start: usize) -> usize {
        if self.content[start..].starts_with("<!---") {
            self.comment(start, "<!---", "--->", CommentKind::Cfml)
        } else {
            self.comment(start, "<!--", "-->", CommentKind::Html)
        }
    }

    fn script_block(&mut self, start: usize) -> usize {
        let Some(gt) = self.content[start..].find('>').map(|i| start + i + 1) else {
            self.error(start, "Unclosed <cfscript> tag".to_string());
            return self.content.len();
        };
        match self.lower[gt..].find("</cfscript").map(|i| gt + i) {
            Some(close) => {
                self.script(gt, close);
                self.content[close..]
                    .find('>')
                    .map_or(self.content.len(), |i| close + i + 1)
            }
            None => {
                self.error(start, "Missing closing </cfscript> tag".to_string());
                self.script(gt, self.content.len());
                self.content.len()
            }
        }
    }

    /// Scans `start..end` as script, balancing brackets.
    fn script(&mut self, start: usize, end: usize) {
        let bytes = self.content.as_bytes();
        let mut stack: Vec<(u8, usize)> = Vec::new();
        let mut pos = start;
        while pos < end {
            pos = match bytes[pos] {
                b'/' if bytes.get(pos + 1) == Some(&b'/') => self.line_comment(pos, end),
                b'/' if bytes.get(pos + 1) == Some(&b'*') => self.block_comment(pos),
                b'<' if self.content[pos..].starts_with("<!---") => {
                    self.comment(pos, "<!---", "--->", CommentKind::Cfml)
                }
                quote @ (b'"' | b'\'') => self.string(pos, end, quote),
                open @ (b'{' | b'(' | b'[') => {
                    stack.push((open, pos));
                    pos + 1
                }
                close @ (b'}' | b')' | b']') => {
                    self.close(&mut stack, close, pos);
                    pos + 1
                }
                _ => pos + 1,
            };
        }
        for (open, offset) in stack {
            self.error(offset, format!("Unclosed '{}'", char::from(open)));
        }
    }

    fn line_comment(&mut self, start: usize, end: usize) -> usize {
        let stop = self.content[start..end]
            .find('\n')
            .map_or(end, |i| start + i);
        self.comments.push(ParseComment {
            text: self.content[start + 2..stop].trim_end_matches('\r').to_string(),
            kind: CommentKind::SingleLine,
            span: self.span(start, stop),
        });
        stop
    }

    fn block_comment(&mut self, start: usize) -> usize {
        let rest = &self.content[start..];
        if rest.starts_with("/**") && !rest.starts_with("/**/") {
            self.comment(start, "/**", "*/", CommentKind::Doc)
        } else {
            self.comment(start, "/*", "*/", CommentKind::MultiLine)
        }
    }

    /// Skips a quoted literal. A doubled quote is an escaped quote.
    fn string(&mut self, start: usize, end: usize, quote: u8) -> usize {
        let bytes = self.content.as_bytes();
        let mut pos = start + 1;
        while pos < end {
            if bytes[pos] == quote {
                if bytes.get(pos + 1) == Some(&quote) && pos + 1 < end {
                    pos += 2;
                    continue;
                }
                return pos + 1;
            }
            pos += 1;
        }
        self.error(start, "Unterminated string literal".to_string());
        end
    }

    fn close(&mut self, stack: &mut Vec<(u8, usize)>, close: u8, offset: usize) {
        let Some(&(open, open_offset)) = stack.last() else {
            self.error(offset, format!("Unexpected '{}'", char::from(close)));
            return;
        };
        stack.pop();
        if closer_of(open) != close {
            let (line, _) = self.index.position(open_offset);
            self.error(
                offset,
                format!(
                    "Mismatched '{}' (expected '{}' to close '{}' from line {line})",
                    char::from(close),
                    char::from(closer_of(open)),
                    char::from(open)
                ),
            );
        }
    }
}

const fn closer_of(open: u8) -> u8 {
    match open {
        b'{' => b'}',
        b'(' => b')',
        _ => b']',
    }
}

#[cfg(test)]
#[path = "structural_tests.rs"]
mod tests;
