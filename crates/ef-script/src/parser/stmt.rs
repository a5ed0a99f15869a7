//! Statement and block parsing.

use super::TokenStream;
use super::expr::parse_expr;
use crate::ast::{Stmt, StmtKind};
use crate::error::ParseError;
use crate::lexer::Token;

/// Parse statements until end of input, or until the closing `}` when
/// `in_block` is set (the brace is consumed).
pub(super) fn parse_statements(
    stream: &mut TokenStream,
    in_block: bool,
) -> Result<Vec<Stmt>, ParseError> {
    let mut stmts = Vec::new();
    loop {
        stream.skip_separators();
        match stream.peek() {
            None if in_block => return Err(stream.unexpected("'}'")),
            None => break,
            Some(Token::RBrace) if in_block => {
                stream.advance();
                break;
            }
            _ => {}
        }

        stmts.push(parse_stmt(stream)?);

        match stream.peek() {
            None => {}
            Some(t) if t.is_separator() => {}
            Some(Token::RBrace) if in_block => {}
            Some(_) => return Err(stream.unexpected("end of statement")),
        }
    }
    Ok(stmts)
}

fn parse_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let line = stream.line();
    let kind = match stream.peek() {
        Some(Token::For) => parse_for(stream)?,
        Some(Token::Ident(name)) => {
            stream.advance();
            parse_assignment(stream, name.clone())?
        }
        _ => return Err(stream.unexpected("a statement")),
    };
    Ok(Stmt { kind, line })
}

fn parse_assignment(stream: &mut TokenStream, name: String) -> Result<StmtKind, ParseError> {
    match stream.peek() {
        Some(Token::Assign) => {
            stream.advance();
            let value = parse_expr(stream)?;
            Ok(StmtKind::Assign { name, value })
        }
        Some(Token::LBracket) => {
            stream.advance();
            stream.skip_newlines();
            let index = parse_expr(stream)?;
            stream.skip_newlines();
            stream.expect(&Token::RBracket, "']'")?;
            stream.expect(&Token::Assign, "'='")?;
            let value = parse_expr(stream)?;
            Ok(StmtKind::AssignIndex { name, index, value })
        }
        _ => Err(stream.unexpected(&format!("'=' or '[' after '{name}'"))),
    }
}

/// `for var in start..end { body }`
fn parse_for(stream: &mut TokenStream) -> Result<StmtKind, ParseError> {
    stream.expect(&Token::For, "'for'")?;
    let var = match stream.advance() {
        Some(Token::Ident(name)) => name.clone(),
        _ => return Err(stream.error("expected loop variable after 'for'")),
    };
    stream.expect(&Token::In, "'in'")?;
    let start = parse_expr(stream)?;
    stream.expect(&Token::DotDot, "'..'")?;
    let end = parse_expr(stream)?;
    stream.skip_newlines();
    stream.expect(&Token::LBrace, "'{'")?;
    stream.enter()?;
    let body = parse_statements(stream, true)?;
    stream.leave(1);
    Ok(StmtKind::For {
        var,
        start,
        end,
        body,
    })
}
