//! Compiler diagnostics.
//!
//! The reference compiler has exactly three failure modes — lexical,
//! syntactic, semantic — and aborts on the first one it hits. There is no
//! accumulation, no recovery, and no warnings. [`CompileError`] models that
//! directly instead of building out a generic multi-severity diagnostic
//! engine: every variant already carries everything its message needs.

use thiserror::Error;

use crate::Position;

/// The three diagnostic kinds the compiler can report, each fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A malformed token: an unterminated string or character literal, an
    /// unrecognized character, or a `!` not followed by `=`.
    #[error("ERREUR LEXICALE [{position}] {message} -> '{token_text}'")]
    Lexical {
        position: Position,
        message: String,
        token_text: String,
    },

    /// A token appeared where the grammar did not expect it.
    #[error("ERREUR SYNTAXIQUE [{position}] {message} -> '{token_text}'")]
    Syntax {
        position: Position,
        message: String,
        token_text: String,
    },

    /// A name resolution or type-compatibility rule was violated.
    #[error("ERREUR SEMANTIQUE [{position}] {message} -> '{token_text}'")]
    Semantic {
        position: Position,
        message: String,
        token_text: String,
    },
}

impl CompileError {
    pub fn lexical(position: Position, message: impl Into<String>, token_text: impl Into<String>) -> Self {
        CompileError::Lexical {
            position,
            message: message.into(),
            token_text: token_text.into(),
        }
    }

    pub fn syntax(position: Position, message: impl Into<String>, token_text: impl Into<String>) -> Self {
        CompileError::Syntax {
            position,
            message: message.into(),
            token_text: token_text.into(),
        }
    }

    pub fn semantic(position: Position, message: impl Into<String>, token_text: impl Into<String>) -> Self {
        CompileError::Semantic {
            position,
            message: message.into(),
            token_text: token_text.into(),
        }
    }
}

/// Result alias used throughout the lexer and parser.
pub type CompileResult<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_message_matches_the_required_format() {
        let err = CompileError::lexical(Position::new(3, 7), "Caractere inconnu", "@");
        assert_eq!(err.to_string(), "ERREUR LEXICALE [3:7] Caractere inconnu -> '@'");
    }

    #[test]
    fn syntax_message_matches_the_required_format() {
        let err = CompileError::syntax(Position::new(1, 1), "Token inattendu", "DEBUT");
        assert_eq!(err.to_string(), "ERREUR SYNTAXIQUE [1:1] Token inattendu -> 'DEBUT'");
    }

    #[test]
    fn semantic_message_matches_the_required_format() {
        let err = CompileError::semantic(Position::new(10, 2), "Variable non declaree", "x");
        assert_eq!(err.to_string(), "ERREUR SEMANTIQUE [10:2] Variable non declaree -> 'x'");
    }
}
