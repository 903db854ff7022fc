//! The lexer: turns a byte source into a stream of [`Token`]s.
//!
//! One function, [`Lexer::next_token`], is the whole public surface. It
//! skips whitespace, then classifies the input by its first non-space byte
//! exactly as `spec.md` §4.1 tabulates: letter → identifier/keyword, digit
//! → integer/real, `'`/`"` → character/string literal, `=`/`!`/`<`/`>` →
//! one- or two-byte operators, `~` → assignment alias, a fixed set of
//! single-byte punctuation, anything else → a lexical error.

use compilateur_util::{CompileError, CompileResult, Position};

use crate::cursor::CharSource;
use crate::token::{Token, TokenKind};

/// Produces one [`Token`] at a time from a byte slice.
///
/// # Examples
///
/// ```
/// use compilateur_lex::lexer::Lexer;
/// use compilateur_lex::token::TokenKind;
///
/// let mut lexer = Lexer::new(b"DEBUT x");
/// assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Debut);
/// assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
/// assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'a> {
    source: CharSource<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source: CharSource::new(source),
        }
    }

    /// Returns the next token, or a [`CompileError::Lexical`] if the input
    /// at the current position cannot start any valid token.
    pub fn next_token(&mut self) -> CompileResult<Token> {
        let first = loop {
            match self.source.bump() {
                None => return Ok(Token::eof(self.source.position())),
                Some(b) if is_ascii_space(b) => continue,
                Some(b) => break b,
            }
        };
        let start = self.source.position();

        if first.is_ascii_alphabetic() {
            return Ok(self.lex_identifier(first, start));
        }
        if first.is_ascii_digit() {
            return Ok(self.lex_number(first, start));
        }
        match first {
            b'\'' => self.lex_char_literal(start),
            b'"' => self.lex_string_literal(start),
            b'=' => Ok(self.lex_one_or_two(b'=', TokenKind::Eq, "==", TokenKind::Assign, "=", start)),
            b'!' => self.lex_bang(start),
            b'<' => Ok(self.lex_one_or_two(b'=', TokenKind::Le, "<=", TokenKind::Lt, "<", start)),
            b'>' => Ok(self.lex_one_or_two(b'=', TokenKind::Ge, ">=", TokenKind::Gt, ">", start)),
            b'~' => Ok(Token::new(TokenKind::Assign, "~", start)),
            b'[' => Ok(Token::new(TokenKind::LBracket, "[", start)),
            b']' => Ok(Token::new(TokenKind::RBracket, "]", start)),
            b'(' => Ok(Token::new(TokenKind::LParen, "(", start)),
            b')' => Ok(Token::new(TokenKind::RParen, ")", start)),
            b'+' => Ok(Token::new(TokenKind::Plus, "+", start)),
            b'-' => Ok(Token::new(TokenKind::Minus, "-", start)),
            b'*' => Ok(Token::new(TokenKind::Star, "*", start)),
            b'/' => Ok(Token::new(TokenKind::Slash, "/", start)),
            b',' => Ok(Token::new(TokenKind::Comma, ",", start)),
            other => Err(CompileError::lexical(
                start,
                "Caractere inconnu",
                (other as char).to_string(),
            )),
        }
    }

    fn lex_identifier(&mut self, first: u8, start: Position) -> Token {
        let mut text = String::new();
        text.push(first as char);
        loop {
            match self.source.bump() {
                Some(b) if b.is_ascii_alphanumeric() => text.push(b as char),
                Some(b) => {
                    self.source.unread(b);
                    break;
                }
                None => break,
            }
        }
        let kind = TokenKind::keyword_from_text(&text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, start)
    }

    fn lex_number(&mut self, first: u8, start: Position) -> Token {
        let mut text = String::new();
        text.push(first as char);
        let mut is_real = false;
        loop {
            match self.source.bump() {
                Some(b) if b.is_ascii_digit() => text.push(b as char),
                Some(b'.') if !is_real => {
                    is_real = true;
                    text.push('.');
                }
                Some(b) => {
                    self.source.unread(b);
                    break;
                }
                None => break,
            }
        }
        let kind = if is_real { TokenKind::RealLit } else { TokenKind::IntLit };
        Token::new(kind, text, start)
    }

    fn lex_char_literal(&mut self, start: Position) -> CompileResult<Token> {
        let inner = self
            .source
            .bump()
            .ok_or_else(|| CompileError::lexical(start, "Caractere litteral mal forme", "'"))?;
        match self.source.bump() {
            Some(b'\'') => Ok(Token::new(TokenKind::CharLit, (inner as char).to_string(), start)),
            _ => Err(CompileError::lexical(
                start,
                "Caractere litteral mal forme",
                (inner as char).to_string(),
            )),
        }
    }

    fn lex_string_literal(&mut self, start: Position) -> CompileResult<Token> {
        let mut text = String::new();
        loop {
            match self.source.bump() {
                Some(b'"') => return Ok(Token::new(TokenKind::StringLit, text, start)),
                Some(b) => text.push(b as char),
                None => return Err(CompileError::lexical(start, "Chaine non terminee", text)),
            }
        }
    }

    fn lex_bang(&mut self, start: Position) -> CompileResult<Token> {
        match self.source.bump() {
            Some(b'=') => Ok(Token::new(TokenKind::NotEq, "!=", start)),
            Some(b) => {
                self.source.unread(b);
                Err(CompileError::lexical(start, "'!' non suivi de '='", "!"))
            }
            None => Err(CompileError::lexical(start, "'!' non suivi de '='", "!")),
        }
    }

    /// Consumes a trailing `expected` byte to produce `two`, otherwise
    /// leaves the cursor where it was and produces `one`.
    fn lex_one_or_two(
        &mut self,
        expected: u8,
        two_kind: TokenKind,
        two_text: &str,
        one_kind: TokenKind,
        one_text: &str,
        start: Position,
    ) -> Token {
        match self.source.bump() {
            Some(b) if b == expected => Token::new(two_kind, two_text, start),
            Some(b) => {
                self.source.unread(b);
                Token::new(one_kind, one_text, start)
            }
            None => Token::new(one_kind, one_text, start),
        }
    }
}

fn is_ascii_space(b: u8) -> bool {
    b.is_ascii_whitespace()
}
