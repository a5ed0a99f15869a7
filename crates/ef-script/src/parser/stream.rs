//! Token stream wrapper for the hand-written parser.

use crate::error::ParseError;
use crate::lexer::Token;

/// A token with its 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Deepest nesting of expressions and `for` blocks a script may use.
pub const MAX_NESTING: usize = 256;

/// Token stream with lookahead and position tracking.
pub struct TokenStream<'src> {
    tokens: &'src [Spanned],
    pos: usize,
    end: (usize, usize),
    depth: usize,
}

impl<'src> TokenStream<'src> {
    /// `end` is the position reported for errors at end of input.
    pub fn new(tokens: &'src [Spanned], end: (usize, usize)) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&'src Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<&'src Token> {
        let token = self.tokens.get(self.pos).map(|s| &s.token);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the expected token.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Consume `expected` or fail with a message naming `what`.
    pub fn expect(&mut self, expected: &Token, what: &str) -> Result<(), ParseError> {
        if self.check(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Open one nesting level; fails past [`MAX_NESTING`].
    pub fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(format!("nesting deeper than {MAX_NESTING} levels")));
        }
        self.depth += 1;
        Ok(())
    }

    /// Close `levels` nesting levels opened with [`enter`](Self::enter).
    pub fn leave(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Line of the current token (or of end of input).
    pub fn line(&self) -> usize {
        self.position().0
    }

    fn position(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .map_or(self.end, |s| (s.line, s.column))
    }

    pub fn skip_newlines(&mut self) {
        while matches!(self.peek(), Some(Token::Newline)) {
            self.pos += 1;
        }
    }

    pub fn skip_separators(&mut self) {
        while self.peek().is_some_and(Token::is_separator) {
            self.pos += 1;
        }
    }

    pub fn error(&self, message: impl Into<String>) -> ParseError {
        let (line, column) = self.position();
        ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    /// "expected X, found Y" at the current token.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let found = match self.peek() {
            Some(token) => describe(token),
            None => "end of input".to_string(),
        };
        self.error(format!("expected {expected}, found {found}"))
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("'{name}'"),
        Token::Number(v) => format!("number {v}"),
        Token::Str(s) => format!("string \"{s}\""),
        Token::Newline => "end of line".to_string(),
        other => format!("{other:?}"),
    }
}
