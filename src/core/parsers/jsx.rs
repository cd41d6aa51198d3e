use std::sync::Arc;

use swc_common::{BytePos, FileName, GLOBALS, Globals, SourceFile, SourceMap, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax, error::Error as ParserError};

use crate::core::error::CodemodError;

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub source_file: Arc<SourceFile>,
}

impl ParsedSource {
    /// The text the parser saw. Offsets from [`Self::offset`] index into it.
    pub fn text(&self) -> &str {
        &self.source_file.src
    }

    /// Byte offset of `pos` into [`Self::text`].
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.source_file.start_pos.0) as usize
    }

    /// 1-based line of `pos`.
    pub fn line(&self, pos: BytePos) -> usize {
        self.source_map.lookup_char_pos(pos).line
    }
}

/// Parse JSX/TSX source code into an AST.
///
/// Recoverable parser errors count as failures too: a file is only rewritten
/// when it parsed cleanly.
pub fn parse_source(code: String, file_path: &str) -> Result<ParsedSource, CodemodError> {
    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|err| parse_error(&source_map, file_path, &err))?;
        if let Some(err) = parser.take_errors().first() {
            return Err(parse_error(&source_map, file_path, err));
        }

        Ok(ParsedSource {
            module,
            source_map: source_map.clone(),
            source_file,
        })
    })
}

fn parse_error(source_map: &SourceMap, file_path: &str, err: &ParserError) -> CodemodError {
    CodemodError::Parse {
        path: file_path.to_string(),
        line: source_map.lookup_char_pos(err.span().lo).line,
        message: err.kind().msg().to_string(),
    }
}
