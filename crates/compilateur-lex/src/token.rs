//! Token and keyword definitions.

use compilateur_util::Position;

/// Maximum length, in bytes, of the text carried by an identifier or
/// literal token. Longer lexemes are truncated silently (`spec.md` §4.1) —
/// a source-behavior quirk kept for fidelity, not a limit anyone is
/// expected to hit in a pedagogical program.
pub const MAX_TOKEN_TEXT_LEN: usize = 63;

/// The category of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Debut,
    Fin,
    Int,
    Char,
    Float,
    Table,
    Fonction,
    FinFonction,
    Retourner,
    Ecrire,
    Lire,
    Pour,
    FinPour,
    Tantque,
    FinTantque,
    Repeter,
    Si,
    Alors,
    Sinon,
    FinSi,
    De,
    A,

    // Punctuation and operators
    Assign,
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,

    // Literals
    Ident,
    IntLit,
    RealLit,
    CharLit,
    StringLit,

    Eof,
}

impl TokenKind {
    /// Looks up a keyword by its exact (case-sensitive) spelling, returning
    /// `None` for anything that should instead become an `Ident` token.
    pub fn keyword_from_text(text: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match text {
            "DEBUT" => Debut,
            "FIN" => Fin,
            "INT" => Int,
            "CHAR" => Char,
            "FLOAT" => Float,
            "TABLE" => Table,
            "FONCTION" => Fonction,
            "FINFONCTION" => FinFonction,
            "RETOURNER" => Retourner,
            "ECRIRE" => Ecrire,
            "LIRE" => Lire,
            "POUR" => Pour,
            "FINPOUR" => FinPour,
            "TANTQUE" => Tantque,
            "FINTANTQUE" => FinTantque,
            "REPETER" => Repeter,
            "SI" => Si,
            "ALORS" => Alors,
            "SINON" => Sinon,
            "FINSI" => FinSi,
            "DE" => De,
            "A" => A,
            _ => return None,
        })
    }
}

/// A single lexical token: its kind, its source text (truncated to
/// [`MAX_TOKEN_TEXT_LEN`] bytes), and the position of its first character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        let mut text = text.into();
        if text.len() > MAX_TOKEN_TEXT_LEN {
            text.truncate(MAX_TOKEN_TEXT_LEN);
        }
        Self { kind, text, position }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(TokenKind::keyword_from_text("DEBUT"), Some(TokenKind::Debut));
        assert_eq!(TokenKind::keyword_from_text("debut"), None);
    }

    #[test]
    fn unmatched_word_is_not_a_keyword() {
        assert_eq!(TokenKind::keyword_from_text("compteur"), None);
    }

    #[test]
    fn overlong_text_is_truncated_not_rejected() {
        let long = "x".repeat(200);
        let tok = Token::new(TokenKind::Ident, long, Position::START);
        assert_eq!(tok.text.len(), MAX_TOKEN_TEXT_LEN);
    }
}
