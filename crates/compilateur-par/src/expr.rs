//! Expression grammar: `EXPR_COMPLETE` / `EXPR` / `TERM` / `FACT`.
//!
//! Each function both parses its production and emits the matching C
//! expression text as it goes, returning the [`SlType`] the expression
//! evaluates to so the caller (an enclosing `FACT`, or a statement like
//! `AFFECT`) can check it against whatever it is being combined with.
//! There is never a tree node to inspect after the fact — the type is
//! the only thing that survives a sub-expression once it has been
//! emitted.

use compilateur_lex::TokenKind;
use compilateur_util::CompileResult;

use crate::symtab::{SlType, SymbolKind};
use crate::Parser;

impl<'a> Parser<'a> {
    /// `FACT = "(" EXPR_COMPLETE ")" | ident-form | int_lit | real_lit | char_lit`
    pub(crate) fn parse_fact(&mut self) -> CompileResult<SlType> {
        match self.current.kind {
            TokenKind::LParen => {
                self.emitter.write("(");
                self.eat(TokenKind::LParen)?;
                let ty = self.parse_expr_complete()?;
                self.eat(TokenKind::RParen)?;
                self.emitter.write(")");
                Ok(ty)
            }
            TokenKind::Ident => self.parse_ident_fact(),
            TokenKind::IntLit => {
                self.emitter.write(&self.current.text.clone());
                self.eat(TokenKind::IntLit)?;
                Ok(SlType::Int)
            }
            TokenKind::RealLit => {
                self.emitter.write(&self.current.text.clone());
                self.eat(TokenKind::RealLit)?;
                Ok(SlType::Float)
            }
            TokenKind::CharLit => {
                let text = self.current.text.clone();
                self.emitter.write(&format!("'{text}'"));
                self.eat(TokenKind::CharLit)?;
                Ok(SlType::Char)
            }
            _ => Err(self.syntax_error("Facteur invalide")),
        }
    }

    fn parse_ident_fact(&mut self) -> CompileResult<SlType> {
        let name_token = self.eat_ident()?;
        let name = name_token.text;

        match self.current.kind {
            TokenKind::LParen => self.parse_call(&name),
            TokenKind::LBracket => self.parse_indexed_read(&name),
            _ => {
                let symbol = self
                    .symtab
                    .find_variable(&name)
                    .ok_or_else(|| self.semantic_error("Variable non declaree"))?;
                let ty = symbol.vtype;
                self.emitter.write(&name);
                Ok(ty)
            }
        }
    }

    fn parse_call(&mut self, name: &str) -> CompileResult<SlType> {
        let symbol = self
            .symtab
            .find_function(name)
            .ok_or_else(|| self.semantic_error("Fonction non declaree"))?;
        let param_types = match &symbol.kind {
            SymbolKind::Function { param_types } => param_types.clone(),
            SymbolKind::Variable { .. } => unreachable!("find_function only returns Function symbols"),
        };
        let return_type = symbol.vtype;

        self.emitter.write(name);
        self.emitter.write("(");
        self.eat(TokenKind::LParen)?;

        let mut arg_count = 0usize;
        if self.current.kind != TokenKind::RParen {
            self.parse_call_arg(&param_types, arg_count)?;
            arg_count += 1;
            while self.current.kind == TokenKind::Comma {
                self.emitter.write(", ");
                self.eat(TokenKind::Comma)?;
                self.parse_call_arg(&param_types, arg_count)?;
                arg_count += 1;
            }
        }
        self.eat(TokenKind::RParen)?;
        self.emitter.write(")");

        if arg_count != param_types.len() {
            return Err(self.semantic_error("Nombre de parametres incorrect"));
        }
        Ok(return_type)
    }

    fn parse_call_arg(&mut self, param_types: &[SlType], arg_index: usize) -> CompileResult<()> {
        let arg_type = self.parse_expr_complete()?;
        if let Some(&expected) = param_types.get(arg_index) {
            if arg_type != expected {
                return Err(self.semantic_error("Type de parametre incorrect"));
            }
        }
        Ok(())
    }

    fn parse_indexed_read(&mut self, name: &str) -> CompileResult<SlType> {
        let symbol = self
            .symtab
            .find_variable(name)
            .ok_or_else(|| self.semantic_error("Variable non declaree"))?;
        let is_array = symbol.is_array();
        let element_type = symbol.vtype;

        self.emitter.write(name);
        self.emitter.write("[");
        self.parse_array_index(is_array)?;
        self.emitter.write("]");
        Ok(element_type)
    }

    /// `TERM = FACT { ("*" | "/") FACT }`
    pub(crate) fn parse_term(&mut self) -> CompileResult<SlType> {
        let mut lhs = self.parse_fact()?;
        while matches!(self.current.kind, TokenKind::Star | TokenKind::Slash) {
            let op = if self.current.kind == TokenKind::Star { " * " } else { " / " };
            self.emitter.write(op);
            self.advance()?;
            let rhs = self.parse_fact()?;
            if lhs != rhs {
                return Err(self.semantic_error("Operation entre types differents (mul/div)"));
            }
            lhs = rhs;
        }
        Ok(lhs)
    }

    /// `EXPR = TERM { ("+" | "-") TERM }`
    pub(crate) fn parse_expr(&mut self) -> CompileResult<SlType> {
        let mut lhs = self.parse_term()?;
        while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            let op = if self.current.kind == TokenKind::Plus { " + " } else { " - " };
            self.emitter.write(op);
            self.advance()?;
            let rhs = self.parse_term()?;
            if lhs != rhs {
                return Err(self.semantic_error("Operation entre types differents (add/sub)"));
            }
            lhs = rhs;
        }
        Ok(lhs)
    }

    /// `EXPR_COMPLETE = EXPR [ comparator EXPR ]`
    ///
    /// A comparison always yields `SlType::Int` — there is no separate
    /// boolean type, matching `ECRIRE`/`SI`/`TANTQUE` all treating a
    /// condition as an ordinary `int`-typed C expression.
    pub(crate) fn parse_expr_complete(&mut self) -> CompileResult<SlType> {
        let lhs = self.parse_expr()?;

        let op = match self.current.kind {
            TokenKind::Eq => Some("=="),
            TokenKind::NotEq => Some("!="),
            TokenKind::Lt => Some("<"),
            TokenKind::Gt => Some(">"),
            TokenKind::Le => Some("<="),
            TokenKind::Ge => Some(">="),
            _ => None,
        };

        let Some(op) = op else {
            return Ok(lhs);
        };

        self.emitter.write(&format!(" {op} "));
        self.advance()?;
        let rhs = self.parse_expr()?;
        if lhs != rhs {
            return Err(self.semantic_error("Comparaison entre types differents"));
        }
        Ok(SlType::Int)
    }
}
