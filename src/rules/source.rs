use std::ops::Range;

use regex::Regex;

/// A script-syntax function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub access: Option<String>,
    pub return_type: Option<String>,
    pub params: Vec<Param>,
    /// Offset of the first token of the declaration.
    pub start: usize,
    pub name_offset: usize,
    /// Offsets strictly between the body braces; `None` for bodiless declarations.
    pub body: Option<Range<usize>>,
}

impl FunctionDecl {
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub type_name: Option<String>,
    pub required: bool,
    pub offset: usize,
}

/// Words that may sit between the access modifier and `function` without being a type.
const MODIFIERS: &[&str] = &["abstract", "final", "static", "public", "private", "package", "remote"];

/// Extracts function declarations from masked source.
pub struct FunctionScanner {
    pattern: Regex,
}

impl Default for FunctionScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionScanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"(?im)(?:^|[\s;{}])(?:(public|private|package|remote)\s+)?(?:(static)\s+)?(?:([a-zA-Z_][a-zA-Z0-9_.]*)\s+)?function\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
            )
            .expect("Invalid regex"),
        }
    }

    /// Scans `masked`, which must be the output of [`mask_comments_and_strings`].
    #[must_use]
    pub fn scan(&self, masked: &str) -> Vec<FunctionDecl> {
        self.pattern
            .captures_iter(masked)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(4)?;
                let text = whole.as_str();
                let leading = text.len()
                    - text
                        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ';' | '{' | '}'))
                        .len();
                let return_type = caps
                    .get(3)
                    .map(|m| m.as_str())
                    .filter(|t| !MODIFIERS.iter().any(|m| t.eq_ignore_ascii_case(m)));
                let paren = whole.end() - 1;
                let (params, body) = Self::params_and_body(masked, paren);
                Some(FunctionDecl {
                    name: name.as_str().to_string(),
                    access: caps.get(1).map(|m| m.as_str().to_lowercase()),
                    return_type: return_type.map(str::to_string),
                    params,
                    start: whole.start() + leading,
                    name_offset: name.start(),
                    body,
                })
            })
            .collect()
    }

    fn params_and_body(masked: &str, paren: usize) -> (Vec<Param>, Option<Range<usize>>) {
        let Some(close) = matching_close(masked, paren) else {
            return (parse_params(masked, paren + 1, masked.len()), None);
        };
        let params = parse_params(masked, paren + 1, close);
        let rest = &masked[close + 1..];
        let body = rest
            .find(['{', ';'])
            .map(|i| close + 1 + i)
            .filter(|&i| masked.as_bytes()[i] == b'{')
            .map(|open| open + 1..matching_close(masked, open).unwrap_or(masked.len()));
        (params, body)
    }
}

/// Offset of the bracket closing the one at `open`.
#[must_use]
pub fn matching_close(masked: &str, open: usize) -> Option<usize> {
    let bytes = masked.as_bytes();
    let (open_byte, close_byte) = match bytes.get(open)? {
        b'(' => (b'(', b')'),
        b'[' => (b'[', b']'),
        b'{' => (b'{', b'}'),
        _ => return None,
    };
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if b == open_byte {
            depth += 1;
        } else if b == close_byte {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

fn parse_params(masked: &str, start: usize, end: usize) -> Vec<Param> {
    let bytes = masked.as_bytes();
    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut piece_start = start;
    let pieces = bytes[start..end].iter().copied().chain(std::iter::once(b','));
    for (rel, b) in pieces.enumerate() {
        let i = start + rel;
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b',' if depth <= 0 => {
                if let Some(param) = parse_param(&masked[piece_start..i], piece_start) {
                    params.push(param);
                }
                piece_start = i + 1;
            }
            _ => {}
        }
    }
    params
}

fn parse_param(piece: &str, offset: usize) -> Option<Param> {
    let declaration = piece.split('=').next().unwrap_or("");
    let mut tokens: Vec<&str> = declaration.split_whitespace().collect();
    let required = tokens
        .first()
        .is_some_and(|t| t.eq_ignore_ascii_case("required"));
    if required {
        tokens.remove(0);
    }
    let name = *tokens.last()?;
    let leading = piece.len() - piece.trim_start().len();
    Some(Param {
        name: name.to_string(),
        type_name: (tokens.len() >= 2).then(|| tokens[tokens.len() - 2].to_string()),
        required,
        offset: offset + leading,
    })
}

/// Blanks comment text and string contents with spaces.
///
/// Byte offsets and newlines are preserved, and string delimiters are kept, so
/// positions found in the result are valid in the original.
#[must_use]
pub fn mask_comments_and_strings(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut out = bytes.to_vec();
    let mut i = 0;
    while i < bytes.len() {
        i = match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = find_from(content, i, "\n").unwrap_or(bytes.len());
                blank(&mut out, i, end);
                end
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = find_from(content, i + 2, "*/").map_or(bytes.len(), |e| e + 2);
                blank(&mut out, i, end);
                end
            }
            b'<' if content[i..].starts_with("<!---") => {
                let end = find_from(content, i + 5, "--->").map_or(bytes.len(), |e| e + 4);
                blank(&mut out, i, end);
                end
            }
            quote @ (b'"' | b'\'') => {
                let end = string_end(bytes, i + 1, quote);
                blank(&mut out, i + 1, end);
                if bytes.get(end) == Some(&quote) { end + 1 } else { end }
            }
            _ => i + 1,
        };
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn find_from(content: &str, from: usize, needle: &str) -> Option<usize> {
    content.get(from..)?.find(needle).map(|i| from + i)
}

/// Offset of the closing quote, or of the newline or end that cuts the literal short.
fn string_end(bytes: &[u8], mut pos: usize, quote: u8) -> usize {
    while pos < bytes.len() {
        match bytes[pos] {
            b'\n' => return pos,
            b if b == quote => {
                if bytes.get(pos + 1) == Some(&quote) {
                    pos += 2;
                    continue;
                }
                return pos;
            }
            _ => pos += 1,
        }
    }
    pos
}

fn blank(out: &mut [u8], from: usize, to: usize) {
    for b in out.iter_mut().take(to).skip(from) {
        if *b != b'\n' {
            *b = b' ';
        }
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
