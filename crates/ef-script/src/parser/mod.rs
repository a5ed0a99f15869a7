//! Hand-written recursive descent parser for scripts.
//!
//! - `stream`: token stream with lookahead and positions
//! - `stmt`: statements and blocks
//! - `expr`: expressions using Pratt parsing

mod expr;
mod stmt;
mod stream;

use logos::Logos;

use crate::ast::Program;
use crate::error::{ScriptError, ScriptResult};
use crate::lexer::Token;
use stream::{Spanned, TokenStream};

/// Lex and parse a whole script.
pub fn parse_program(source: &str) -> ScriptResult<Program> {
    let tokens = tokenize(source)?;
    let end = locate(source, source.len());
    let mut stream = TokenStream::new(&tokens, end);
    let stmts = stmt::parse_statements(&mut stream, false)?;
    Ok(Program { stmts })
}

fn tokenize(source: &str) -> ScriptResult<Vec<Spanned>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let (line, column) = locate(source, lexer.span().start);
        match result {
            Ok(token) => tokens.push(Spanned {
                token,
                line,
                column,
            }),
            Err(()) => {
                return Err(ScriptError::Lex {
                    line,
                    column,
                    text: lexer.slice().to_string(),
                });
            }
        }
    }
    Ok(tokens)
}

/// 1-based line and column of a byte offset.
fn locate(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
