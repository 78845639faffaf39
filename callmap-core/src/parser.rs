//! JavaScript parser using SWC
//!
//! Global invariants enforced:
//! - Deterministic parsing order
//! - Formatting, comments, and whitespace must not affect results

use crate::error::ParseError;
use swc_common::{sync::Lrc, FileName, SourceFile, SourceMap, Spanned};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax};

/// Plain ECMAScript syntax
///
/// - No JSX (a `.js` file containing JSX fails to parse)
/// - No TypeScript
/// - No experimental decorators
fn ecmascript_syntax() -> Syntax {
    Syntax::Es(swc_ecma_parser::EsSyntax {
        jsx: false,
        decorators: false,
        ..Default::default()
    })
}

/// Parse JavaScript source code into an AST module
///
/// The source is parsed with the module goal and the newest language version
/// SWC knows. Errors the parser recovers from internally (strict-mode
/// violations and the like) are still reported as failures, so a file either
/// parses cleanly or contributes nothing.
pub fn parse_source(
    src: &str,
    source_map: &Lrc<SourceMap>,
    filename: &str,
) -> Result<Module, ParseError> {
    let source_file: Lrc<SourceFile> = source_map.new_source_file(
        FileName::Custom(filename.into()).into(),
        src.to_string(),
    );

    let input = StringInput::from(&*source_file);
    let lexer = Lexer::new(ecmascript_syntax(), EsVersion::EsNext, input, None);
    let mut parser = Parser::new_from(lexer);

    let to_parse_error = |e: swc_ecma_parser::error::Error| {
        let span = e.span();
        let line = if span.is_dummy() {
            0
        } else {
            source_map.lookup_char_pos(span.lo).line as u32
        };
        ParseError {
            file: filename.to_string(),
            line,
            message: e.kind().msg().to_string(),
        }
    };

    let module = parser.parse_module().map_err(to_parse_error)?;

    if let Some(recovered) = parser.take_errors().into_iter().next() {
        return Err(to_parse_error(recovered));
    }

    Ok(module)
}
