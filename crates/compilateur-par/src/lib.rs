//! compilateur-par - Parser, resolver, type-checker, and C emitter.
//!
//! ============================================================================
//! ARCHITECTURE
//! ============================================================================
//!
//! This is not a conventional parser: there is no AST and no separate
//! semantic-analysis pass. [`Parser`] is a recursive-descent parser with a
//! single token of lookahead (`current`) where every production does three
//! jobs at once, in this order, as it consumes tokens:
//!
//! 1. Matches the grammar (the usual recursive-descent job).
//! 2. Resolves identifiers against the flat, scope-tagged symbol table
//!    (`symtab`) and checks the static typing rules the language defines
//!    (a `VarType`-equivalent, [`symtab::SlType`], is threaded back up
//!    through every expression-parsing function's return value).
//! 3. Emits the equivalent C text directly into an append-only buffer
//!    (`emitter`) as each construct is recognized — there is nothing to
//!    emit *from* afterwards, because there is no IR to walk.
//!
//! A production is therefore usually a fused `parse_and_emit_foo` function
//! rather than a `parse_foo` that builds a tree for a later `emit_foo` to
//! walk. The fusion is not an accident of a one-pass design's laziness:
//! `spec.md` treats "parse", "resolve", and "emit" as three facets of a
//! single pass, and the reference `compilateur.c` this was translated from
//! generates C text directly from inside its recursive-descent functions
//! with no intermediate tree at all.
//!
//! The first error — lexical, syntactic, or semantic — aborts the whole
//! compilation. There is no recovery and no accumulation of diagnostics.
//!
//! ============================================================================
//! GRAMMAR (EBNF, terminals in quotes)
//! ============================================================================
//!
//! ```text
//! program       = "#include <stdio.h>" { fonction_decl } "int main(){" declarations { instruction } "}" ;
//! fonction_decl = "FONCTION" ident "(" [ param { "," param } ] ")" declarations { instruction } "FINFONCTION" ;
//! param         = type ident ;
//! declarations  = { type ident [ "[" int "]" ] } ;
//! type          = "INT" | "CHAR" | "FLOAT" | "TABLE" type ;
//! instruction   = affect | "RETOURNER" expr_complete
//!               | "ECRIRE" ( string | expr_complete ) | "LIRE" "(" ident [ "[" expr_complete "]" ] ")"
//!               | "TANTQUE" expr_complete "{" { instruction } "FINTANTQUE"
//!               | "REPETER" { instruction } "TANTQUE" expr_complete
//!               | "POUR" ident "DE" expr_complete "A" expr_complete { instruction } "FINPOUR"
//!               | "SI" expr_complete "ALORS" { instruction } ( "SINON" ( si | { instruction } "FINSI" ) | "FINSI" ) ;
//! affect        = ident [ "[" expr_complete "]" ] "=" expr_complete ;
//! expr_complete = expr [ ("==" | "!=" | "<" | ">" | "<=" | ">=") expr ] ;
//! expr          = term { ("+" | "-") term } ;
//! term          = fact { ("*" | "/") fact } ;
//! fact          = "(" expr_complete ")" | ident [ "(" [ expr_complete { "," expr_complete } ] ")" | "[" expr_complete "]" ]
//!               | int_lit | real_lit | char_lit ;
//! ```

pub mod emit;
pub mod expr;
pub mod items;
pub mod stmt;
pub mod symtab;

use compilateur_lex::{Lexer, Token, TokenKind};
use compilateur_util::{CompileError, CompileResult};

use emit::Emitter;
use symtab::SymbolTable;

/// Parses, resolves, type-checks, and emits in one pass over a token
/// stream pulled one token at a time from a [`Lexer`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    symtab: SymbolTable,
    emitter: Emitter,
    in_function: bool,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a [u8]) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            symtab: SymbolTable::new(),
            emitter: Emitter::new(),
            in_function: false,
        })
    }

    /// Advances `current` by pulling the next token from the lexer.
    fn advance(&mut self) -> CompileResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Consumes `current` if it has the expected kind, otherwise reports
    /// a syntax error naming the unexpected token. Returns the consumed
    /// token (its text is sometimes needed, e.g. an identifier's name).
    fn eat(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.current.kind == kind {
            let token = self.current.clone();
            self.advance()?;
            Ok(token)
        } else {
            Err(CompileError::syntax(
                self.current.position,
                "Token inattendu",
                self.current.text.clone(),
            ))
        }
    }

    fn eat_ident(&mut self) -> CompileResult<Token> {
        self.eat(TokenKind::Ident)
    }

    fn syntax_error(&self, message: &str) -> CompileError {
        CompileError::syntax(self.current.position, message, self.current.text.clone())
    }

    fn semantic_error(&self, message: &str) -> CompileError {
        CompileError::semantic(self.current.position, message, self.current.text.clone())
    }

    /// Parses `"[" expr_complete "]"`, checking the symbol behind
    /// `is_array` is actually an array and the index is `INT`. Shared by
    /// `AFFECT`'s array-write
    /// form, `LIRE`'s indexed form, and an array read inside an
    /// expression — the three differ only in what C text wraps the
    /// index, which is each caller's job to write around this call.
    fn parse_array_index(&mut self, is_array: bool) -> CompileResult<()> {
        if !is_array {
            return Err(self.semantic_error("Acces tableau sur variable scalaire"));
        }
        self.eat(TokenKind::LBracket)?;
        let index_type = self.parse_expr_complete()?;
        if index_type != symtab::SlType::Int {
            return Err(self.semantic_error("Indice de tableau doit etre de type INT"));
        }
        self.eat(TokenKind::RBracket)?;
        Ok(())
    }
}

/// Compiles a complete source program to its C translation.
///
/// This is the single entry point external collaborators (the driver's
/// CLI) call: source bytes in, generated C text out, or the first
/// [`CompileError`] encountered.
pub fn compile(source: &[u8]) -> CompileResult<String> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()?;
    Ok(parser.emitter.into_output())
}
