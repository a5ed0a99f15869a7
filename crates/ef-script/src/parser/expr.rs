//! Expression parser using Pratt parsing (precedence climbing).

use super::TokenStream;
use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::lexer::Token;

/// Binding power of unary minus: tighter than `*`, looser than `^`.
const NEG_PREC: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

/// (precedence, associativity, op); higher precedence binds tighter.
fn binary_op_info(token: &Token) -> Option<(u8, Assoc, BinaryOp)> {
    match token {
        Token::Plus => Some((10, Assoc::Left, BinaryOp::Add)),
        Token::Minus => Some((10, Assoc::Left, BinaryOp::Sub)),
        Token::Star => Some((20, Assoc::Left, BinaryOp::Mul)),
        Token::Slash => Some((20, Assoc::Left, BinaryOp::Div)),
        Token::Caret => Some((40, Assoc::Right, BinaryOp::Pow)),
        _ => None,
    }
}

pub(super) fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    parse_pratt(stream, 0)
}

/// Every recursion and every left fold opens a nesting level, so the
/// depth of the returned tree stays bounded.
fn parse_pratt(stream: &mut TokenStream, min_prec: u8) -> Result<Expr, ParseError> {
    stream.enter()?;
    let mut levels = 1;
    let mut left = parse_prefix(stream)?;

    while let Some((prec, assoc, op)) = stream.peek().and_then(binary_op_info) {
        if prec < min_prec {
            break;
        }
        stream.advance();
        stream.enter()?;
        levels += 1;

        let next_prec = if assoc == Assoc::Left { prec + 1 } else { prec };
        let right = parse_pratt(stream, next_prec)?;
        left = Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }

    stream.leave(levels);
    Ok(left)
}

fn parse_prefix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    if matches!(stream.peek(), Some(Token::Minus)) {
        stream.advance();
        let operand = parse_pratt(stream, NEG_PREC)?;
        return Ok(Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        });
    }
    parse_postfix(stream)
}

/// Atom followed by any number of `[index]` suffixes.
fn parse_postfix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let mut expr = parse_atom(stream)?;
    let mut levels = 0;
    while matches!(stream.peek(), Some(Token::LBracket)) {
        stream.advance();
        stream.enter()?;
        levels += 1;
        stream.skip_newlines();
        let index = parse_expr(stream)?;
        stream.skip_newlines();
        stream.expect(&Token::RBracket, "']'")?;
        expr = Expr::Index {
            target: Box::new(expr),
            index: Box::new(index),
        };
    }
    stream.leave(levels);
    Ok(expr)
}

fn parse_atom(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    match stream.peek() {
        Some(Token::Number(v)) => {
            stream.advance();
            Ok(Expr::Number(*v))
        }
        Some(Token::Str(s)) => {
            stream.advance();
            Ok(Expr::Str(s.clone()))
        }
        Some(Token::Ident(name)) => {
            stream.advance();
            if matches!(stream.peek(), Some(Token::LParen)) {
                let args = parse_list(stream, &Token::LParen, &Token::RParen, "')'")?;
                Ok(Expr::Call {
                    name: name.clone(),
                    args,
                })
            } else {
                Ok(Expr::Var(name.clone()))
            }
        }
        Some(Token::LParen) => {
            stream.advance();
            stream.skip_newlines();
            let inner = parse_expr(stream)?;
            stream.skip_newlines();
            stream.expect(&Token::RParen, "')'")?;
            Ok(inner)
        }
        Some(Token::LBracket) => {
            let items = parse_list(stream, &Token::LBracket, &Token::RBracket, "']'")?;
            Ok(Expr::Array(items))
        }
        _ => Err(stream.unexpected("an expression")),
    }
}

/// Comma-separated expressions between `open` and `close`; newlines
/// inside the delimiters are ignored.
fn parse_list(
    stream: &mut TokenStream,
    open: &Token,
    close: &Token,
    close_name: &str,
) -> Result<Vec<Expr>, ParseError> {
    stream.expect(open, "opening delimiter")?;
    let mut items = Vec::new();
    stream.skip_newlines();
    if stream.check(close) {
        stream.advance();
        return Ok(items);
    }
    loop {
        stream.skip_newlines();
        items.push(parse_expr(stream)?);
        stream.skip_newlines();
        if stream.check(&Token::Comma) {
            stream.advance();
            continue;
        }
        stream.expect(close, close_name)?;
        return Ok(items);
    }
}
