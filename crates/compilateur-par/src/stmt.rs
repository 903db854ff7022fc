//! Statement grammar: `INSTRUCTION` and its eight forms.
//!
//! `ECRIRE` on a non-string expression is the one statement that can't
//! emit left-to-right: the generated line is `printf("%d\n", <expr>);`,
//! where the format specifier depends on the expression's type, which is
//! only known once the expression has been fully parsed — but the
//! expression's own C text has to appear *after* the format string in
//! the call. `parse_ecrire` below swaps a fresh [`Emitter`] in for the
//! duration of the expression to buffer its text off to the side so it
//! can be dropped in after the fact.

use compilateur_lex::TokenKind;
use compilateur_util::CompileResult;

use crate::emit::Emitter;
use crate::symtab::SlType;
use crate::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_instruction(&mut self) -> CompileResult<()> {
        match self.current.kind {
            TokenKind::Ident => self.parse_affect(),
            TokenKind::Retourner => self.parse_retourner(),
            TokenKind::Ecrire => self.parse_ecrire(),
            TokenKind::Lire => self.parse_lire(),
            TokenKind::Tantque => self.parse_tantque_boucle(),
            TokenKind::Repeter => self.parse_repeter_boucle(),
            TokenKind::Pour => self.parse_pour_boucle(),
            TokenKind::Si => self.parse_si_condition(),
            _ => Err(self.syntax_error("Instruction inconnue")),
        }
    }

    /// `AFFECT = ident [ "[" EXPR_COMPLETE "]" ] "=" EXPR_COMPLETE`
    fn parse_affect(&mut self) -> CompileResult<()> {
        let name = self.current.text.clone();
        let symbol = self
            .symtab
            .find_variable(&name)
            .ok_or_else(|| self.semantic_error("Variable non declaree"))?;
        let is_array = symbol.is_array();
        let scalar_type = symbol.vtype;
        self.eat(TokenKind::Ident)?;

        self.emitter.write_indent();

        let lhs_type = if self.current.kind == TokenKind::LBracket {
            self.emitter.write(&name);
            self.emitter.write("[");
            self.parse_array_index(is_array)?;
            self.emitter.write("] = ");
            SlType::Int
        } else {
            self.emitter.write(&format!("{name} = "));
            scalar_type
        };

        self.eat(TokenKind::Assign)?;
        let rhs_type = self.parse_expr_complete()?;
        if lhs_type != rhs_type {
            return Err(self.semantic_error("Affectation: types incompatibles"));
        }
        self.emitter.write(";\n");
        Ok(())
    }

    /// `"RETOURNER" EXPR_COMPLETE`
    fn parse_retourner(&mut self) -> CompileResult<()> {
        if !self.in_function {
            return Err(self.semantic_error("RETOURNER hors fonction"));
        }
        self.eat(TokenKind::Retourner)?;
        self.emitter.write_indent();
        self.emitter.write("return ");
        self.parse_expr_complete()?;
        self.emitter.write(";\n");
        Ok(())
    }

    /// `"ECRIRE" ( string_lit | EXPR_COMPLETE )`
    fn parse_ecrire(&mut self) -> CompileResult<()> {
        self.eat(TokenKind::Ecrire)?;
        self.emitter.write_indent();

        if self.current.kind == TokenKind::StringLit {
            let text = self.current.text.clone();
            self.eat(TokenKind::StringLit)?;
            self.emitter.write(&format!("printf(\"{text}\\n\");\n"));
            return Ok(());
        }

        // Redirect emission into a fresh buffer for the duration of the
        // expression: the format specifier below depends on its type,
        // which is only known once it has been fully parsed, but its
        // text has to appear after that format string in the call.
        let mut side_buffer = Emitter::new();
        std::mem::swap(&mut self.emitter, &mut side_buffer);
        let expr_type = self.parse_expr_complete();
        std::mem::swap(&mut self.emitter, &mut side_buffer);
        let expr_type = expr_type?;
        let captured = side_buffer.into_output();

        let fmt = expr_type.format_specifier();
        self.emitter.write(&format!("printf(\"{fmt}\\n\", {captured});\n"));
        Ok(())
    }

    /// `"LIRE" "(" ident [ "[" EXPR_COMPLETE "]" ] ")"`
    fn parse_lire(&mut self) -> CompileResult<()> {
        self.eat(TokenKind::Lire)?;
        self.eat(TokenKind::LParen)?;

        let name = self.current.text.clone();
        let symbol = self
            .symtab
            .find_variable(&name)
            .ok_or_else(|| self.semantic_error("Variable non declaree"))?;
        let is_array = symbol.is_array();
        let scalar_type = symbol.vtype;
        self.eat(TokenKind::Ident)?;

        self.emitter.write_indent();

        if self.current.kind == TokenKind::LBracket {
            self.emitter.write(&format!("scanf(\"{}\", &{name}[", scalar_type.scan_format_specifier()));
            self.parse_array_index(is_array)?;
            self.emitter.write("]);\n");
        } else {
            let fmt = scalar_type.scan_format_specifier();
            self.emitter.write(&format!("scanf(\"{fmt}\", &{name});\n"));
        }

        self.eat(TokenKind::RParen)?;
        Ok(())
    }

    /// `"TANTQUE" EXPR_COMPLETE "{" { INSTRUCTION } "FINTANTQUE"`
    fn parse_tantque_boucle(&mut self) -> CompileResult<()> {
        self.eat(TokenKind::Tantque)?;
        self.emitter.write_indent();
        self.emitter.write("while(");
        self.parse_expr_complete()?;
        self.emitter.write("){\n");
        self.emitter.indent();

        while self.current.kind != TokenKind::FinTantque {
            self.parse_instruction()?;
        }
        self.eat(TokenKind::FinTantque)?;

        self.emitter.dedent();
        self.emitter.write_indent();
        self.emitter.write("}\n");
        Ok(())
    }

    /// `"REPETER" { INSTRUCTION } "TANTQUE" EXPR_COMPLETE`
    fn parse_repeter_boucle(&mut self) -> CompileResult<()> {
        self.eat(TokenKind::Repeter)?;
        self.emitter.write_indent();
        self.emitter.write("do{\n");
        self.emitter.indent();

        while self.current.kind != TokenKind::Tantque {
            self.parse_instruction()?;
        }
        self.eat(TokenKind::Tantque)?;

        // The reference implementation never dedents before closing this
        // loop — the "} while(...)" line prints at the body's indent
        // level, not the loop's. Cosmetic only: indentation carries no
        // meaning in the generated C.
        self.emitter.write_indent();
        self.emitter.write("} while(");
        self.parse_expr_complete()?;
        self.emitter.write(");\n");
        Ok(())
    }

    /// `"POUR" ident "DE" EXPR_COMPLETE "A" EXPR_COMPLETE { INSTRUCTION } "FINPOUR"`
    fn parse_pour_boucle(&mut self) -> CompileResult<()> {
        self.eat(TokenKind::Pour)?;

        if self.current.kind != TokenKind::Ident {
            return Err(self.syntax_error("Identifiant attendu apres POUR"));
        }
        let var = self.current.text.clone();
        let symbol = self
            .symtab
            .find_variable(&var)
            .ok_or_else(|| self.semantic_error("Variable de boucle non declaree"))?;
        if symbol.vtype != SlType::Int {
            return Err(self.semantic_error("Variable de boucle POUR doit etre de type INT"));
        }
        self.eat(TokenKind::Ident)?;
        self.eat(TokenKind::De)?;

        self.emitter.write_indent();
        self.emitter.write(&format!("for({var} = "));
        let start_type = self.parse_expr_complete()?;
        if start_type != SlType::Int {
            return Err(self.semantic_error("Borne de debut POUR doit etre de type INT"));
        }

        self.emitter.write(&format!("; {var} <= "));
        self.eat(TokenKind::A)?;
        let end_type = self.parse_expr_complete()?;
        if end_type != SlType::Int {
            return Err(self.semantic_error("Borne de fin POUR doit etre de type INT"));
        }
        self.emitter.write(&format!("; {var}++){{\n"));
        self.emitter.indent();

        while self.current.kind != TokenKind::FinPour {
            self.parse_instruction()?;
        }
        self.eat(TokenKind::FinPour)?;

        self.emitter.dedent();
        self.emitter.write_indent();
        self.emitter.write("}\n");
        Ok(())
    }

    /// `"SI" EXPR_COMPLETE "ALORS" { INSTRUCTION } ( "SINON" ( SI | { INSTRUCTION } "FINSI" ) | "FINSI" )`
    pub(crate) fn parse_si_condition(&mut self) -> CompileResult<()> {
        self.eat(TokenKind::Si)?;
        self.emitter.write_indent();
        self.emitter.write("if(");
        self.parse_expr_complete()?;
        self.eat(TokenKind::Alors)?;
        self.emitter.write("){\n");
        self.emitter.indent();

        while !matches!(self.current.kind, TokenKind::Sinon | TokenKind::FinSi) {
            self.parse_instruction()?;
        }

        if self.current.kind == TokenKind::Sinon {
            self.eat(TokenKind::Sinon)?;
            self.emitter.dedent();
            self.emitter.write_indent();
            self.emitter.write("} else ");

            if self.current.kind == TokenKind::Si {
                self.parse_si_condition()?;
            } else {
                self.emitter.write("{\n");
                self.emitter.indent();
                while self.current.kind != TokenKind::FinSi {
                    self.parse_instruction()?;
                }
                self.eat(TokenKind::FinSi)?;
                self.emitter.dedent();
                self.emitter.write_indent();
                self.emitter.write("}\n");
            }
        } else {
            self.eat(TokenKind::FinSi)?;
            self.emitter.dedent();
            self.emitter.write_indent();
            self.emitter.write("}\n");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::compile;

    #[test]
    fn tantque_boucle_lowers_to_a_c_while_loop() {
        let source = b"DEBUT INT x x ~ 0 TANTQUE x < 10 ECRIRE x FINTANTQUE FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("while(x < 10){"));
        assert!(output.contains("printf(\"%d\\n\", x);"));
    }

    #[test]
    fn repeter_boucle_lowers_to_a_c_do_while_loop() {
        let source = b"DEBUT INT x x ~ 0 REPETER ECRIRE x TANTQUE x < 10 FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("do{"));
        assert!(output.contains("} while(x < 10);"));
    }

    #[test]
    fn lire_into_a_scalar_variable_emits_a_scanf_call() {
        let source = b"DEBUT INT x LIRE(x) FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("scanf(\"%d\", &x);"));
    }

    #[test]
    fn lire_into_an_indexed_scalar_is_rejected() {
        let source = b"DEBUT INT x LIRE(x[0]) FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Acces tableau sur variable scalaire"));
    }

    #[test]
    fn lire_with_a_non_int_index_is_rejected() {
        let source = b"DEBUT TABLE INT t[3] FLOAT f LIRE(t[f]) FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Indice de tableau doit etre de type INT"));
    }

    #[test]
    fn affect_into_an_indexed_scalar_is_rejected() {
        let source = b"DEBUT INT x x[0] ~ 1 FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Acces tableau sur variable scalaire"));
    }

    #[test]
    fn affect_with_a_non_int_array_index_is_rejected() {
        let source = b"DEBUT TABLE INT t[3] FLOAT f t[f] ~ 1 FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Indice de tableau doit etre de type INT"));
    }

    #[test]
    fn pour_boucle_variable_must_already_be_declared() {
        let source = b"DEBUT POUR i DE 1 A 10 ECRIRE i FINPOUR FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Variable de boucle non declaree"));
    }

    #[test]
    fn pour_boucle_variable_must_be_int() {
        let source = b"DEBUT FLOAT i POUR i DE 1 A 10 ECRIRE i FINPOUR FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Variable de boucle POUR doit etre de type INT"));
    }

    #[test]
    fn pour_boucle_start_bound_must_be_int() {
        let source = b"DEBUT INT i FLOAT f POUR i DE f A 10 ECRIRE i FINPOUR FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Borne de debut POUR doit etre de type INT"));
    }

    #[test]
    fn pour_boucle_end_bound_must_be_int() {
        let source = b"DEBUT INT i FLOAT f POUR i DE 1 A f ECRIRE i FINPOUR FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Borne de fin POUR doit etre de type INT"));
    }
}
