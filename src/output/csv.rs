use std::fmt::Write;

use crate::error::Result;
use crate::result::ToolboxResult;

use super::OutputFormatter;

const HEADER: &str = "file,line,column,severity,rule,message";

/// One row per violation, RFC 4180 quoting.
pub struct CsvFormatter;

/// Quotes a field containing a comma, quote or line break, doubling inner quotes.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl OutputFormatter for CsvFormatter {
    fn format(&self, result: &ToolboxResult) -> Result<String> {
        let mut out = String::from(HEADER);
        out.push_str("\r\n");
        for v in result.violations() {
            write!(
                out,
                "{},{},{},{},{},{}\r\n",
                field(&v.file_path),
                v.line,
                v.column,
                v.severity,
                field(&v.rule_id),
                field(&v.message)
            )
            .ok();
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
