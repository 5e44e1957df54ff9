use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_ARGUMENT_COUNT: &str = "B-ERR-CALL-001";
pub const ERR_ARGUMENT_SHAPE: &str = "B-ERR-CALL-002";
pub const ERR_PROPERTY_KIND: &str = "B-ERR-PROPS-001";
pub const ERR_BLOCK_UNRESOLVED: &str = "B-ERR-BLOCK-001";
pub const ERR_PRAGMA: &str = "B-ERR-PRAGMA-001";
pub const ERR_PARSE: &str = "B-ERR-PARSE-001";

fn get_guarantee(code: &str) -> &'static str {
    match code {
        ERR_ARGUMENT_COUNT => "BEM() takes exactly one descriptor argument.",
        ERR_ARGUMENT_SHAPE => "A BEM() descriptor is an object literal.",
        ERR_PROPERTY_KIND => {
            "Descriptor props hold only plain key/value pairs (or spreads in permissive mode)."
        }
        ERR_BLOCK_UNRESOLVED => "Every element resolves a block name, explicit or inherited.",
        ERR_PRAGMA => "The pragma option is a dotted identifier path.",
        ERR_PARSE => "Input sources parse before any rewriting begins.",
        _ => "Unknown invariant.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REWRITE ERROR
// The first hard failure aborts the whole pass; there is no partial success.
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteError {
    pub code: String,
    pub message: String,
    pub guarantee: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl RewriteError {
    pub fn new(code: &str, message: &str, file: &str, line: u32, column: u32) -> Self {
        RewriteError {
            code: code.to_string(),
            message: message.to_string(),
            guarantee: get_guarantee(code).to_string(),
            file: file.to_string(),
            line,
            column,
        }
    }

    /// Build an error whose position is resolved from a byte offset into the
    /// source text.
    pub fn at_offset(code: &str, message: &str, file: &str, source: &str, offset: u32) -> Self {
        let (line, column) = source_position(source, offset);
        Self::new(code, message, file, line, column)
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}:{}:{})",
            self.code, self.message, self.file, self.line, self.column
        )
    }
}

impl std::error::Error for RewriteError {}

/// 1-based line/column of a byte offset in `source`.
pub(crate) fn source_position(source: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(source.len());
    let mut line = 1u32;
    let mut column = 1u32;
    for (idx, ch) in source.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_position_first_line() {
        assert_eq!(source_position("BEM({})", 4), (1, 5));
    }

    #[test]
    fn test_source_position_later_line() {
        let src = "const a = 1;\nBEM({});\n";
        let offset = src.find("BEM").unwrap() as u32;
        assert_eq!(source_position(src, offset), (2, 1));
    }

    #[test]
    fn test_source_position_past_end_clamps() {
        assert_eq!(source_position("x", 999), (1, 2));
    }

    #[test]
    fn test_error_display_carries_code_and_location() {
        let err = RewriteError::new(ERR_ARGUMENT_COUNT, "should be only one argument", "a.js", 3, 7);
        let text = err.to_string();
        assert!(text.contains("B-ERR-CALL-001"));
        assert!(text.contains("a.js:3:7"));
    }
}
