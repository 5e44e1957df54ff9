use oxc_allocator::Allocator;
use oxc_ast_visit::VisitMut;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::SourceType;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{RewriteError, ERR_PARSE};
use crate::lowerer::BemLowerer;
use crate::options::BemOptions;

// ═══════════════════════════════════════════════════════════════════════════════
// PASS DRIVER
// parse → rewrite → print, one tree end-to-end
// ═══════════════════════════════════════════════════════════════════════════════

/// Transforms one source file, rewriting every `BEM(...)` call.
///
/// The whole pass either succeeds or is aborted at the first hard failure
/// in visitation order; a partially rewritten tree is never returned.
pub fn transform(source: &str, file_path: &str, options: &BemOptions) -> Result<String, RewriteError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true).with_jsx(true);

    let mut ret = Parser::new(&allocator, source, source_type).parse();
    if let Some(error) = ret.errors.first() {
        let message = format!("Invalid source syntax: {}", error);
        return Err(RewriteError::new(ERR_PARSE, &message, file_path, 1, 1));
    }

    let mut lowerer = BemLowerer::from_options(&allocator, source, file_path, options)?;
    lowerer.visit_program(&mut ret.program);
    if let Some(error) = lowerer.take_error() {
        return Err(error);
    }

    Ok(Codegen::new().build(&ret.program).code)
}

// ═══════════════════════════════════════════════════════════════════════════════
// BATCH TRANSFORMS
// Independent trees share nothing; files fan out across rayon workers.
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub path: String,
    pub source: String,
}

/// Transforms many independent files in parallel. Results come back in
/// input order; each file fails or succeeds on its own.
pub fn transform_many(
    files: &[SourceFile],
    options: &BemOptions,
) -> Vec<Result<String, RewriteError>> {
    files
        .par_iter()
        .map(|file| transform(&file.source, &file.path, options))
        .collect()
}
