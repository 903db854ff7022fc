//! compilateur-lex - Lexical analysis for the source language.
//!
//! A single-pass, hand-written scanner: no table, no generator, one
//! function per token category. The source alphabet is 7-bit ASCII
//! (digits, letters, a fixed operator/punctuation set, and whitespace),
//! so the whole thing runs over raw bytes rather than `char`s.
//!
//! TOKEN CATEGORIES
//! ----------------
//! - Keywords: the 21 reserved French-keyword words (`DEBUT`, `FONCTION`,
//!   `TANTQUE`, ...), matched by exact case-sensitive spelling after an
//!   identifier has been scanned — there is no separate keyword table
//!   walked character-by-character.
//! - Identifiers: `[A-Za-z][A-Za-z0-9]*`, truncated (not rejected) past
//!   [`token::MAX_TOKEN_TEXT_LEN`] bytes.
//! - Literals: integers, reals (exactly one internal `.`), single-byte
//!   character literals (`'a'`), and string literals (`"..."`, no escape
//!   processing).
//! - Operators/punctuation: `= == != < > <= >= + - * / [ ] ( ) ,` and the
//!   `~` assignment alias.
//!
//! There is no comment syntax, no string escaping, and no recovery: the
//! first byte that cannot start a valid token is a lexical error that
//! aborts the whole compilation (see `compilateur_util::CompileError`).

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind, MAX_TOKEN_TEXT_LEN};
