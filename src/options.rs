use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{RewriteError, ERR_PRAGMA};

// ═══════════════════════════════════════════════════════════════════════════════
// PLUGIN OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Options a host passes for one transform pass.
///
/// `pragma` names the element factory every rewritten call invokes, as a
/// dotted identifier path. `strict` collapses the two historical behavioral
/// variants into one switch: strict fails on a missing block, a non-object
/// argument, and spread props; permissive degrades or skips instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BemOptions {
    pub pragma: String,
    pub strict: bool,
}

impl Default for BemOptions {
    fn default() -> Self {
        BemOptions {
            pragma: "React.createElement".to_string(),
            strict: false,
        }
    }
}

lazy_static! {
    static ref IDENT_PATH: Regex =
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// TARGET CALLEE
// Resolved once per pass; rebuilt as fresh nodes at every emit site.
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct TargetCallee {
    segments: Vec<String>,
}

impl TargetCallee {
    pub fn parse(pragma: &str, file: &str) -> Result<Self, RewriteError> {
        if !IDENT_PATH.is_match(pragma) {
            let message = format!("Invalid pragma {:?}: expected a dotted identifier path", pragma);
            return Err(RewriteError::new(ERR_PRAGMA, &message, file, 1, 1));
        }
        Ok(TargetCallee {
            segments: pragma.split('.').map(str::to_string).collect(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}
