//! Top-level grammar: `PROGRAM`, `FONCTION_DECL`, and the `DECLARATIONS`
//! block shared by a function body and `DEBUT`.
//!
//! Functions always return `int` in the generated C — there is no
//! return-type keyword in the surface language, just a bare `RETOURNER
//! expr` inside a function body, so every function symbol is declared
//! with [`SlType::Int`] regardless of what it actually returns.

use compilateur_lex::TokenKind;
use compilateur_util::CompileResult;

use crate::symtab::{Scope, SlType};
use crate::Parser;

impl<'a> Parser<'a> {
    /// `type = "INT" | "CHAR" | "FLOAT" | "TABLE" type`
    ///
    /// Returns the scalar element type and whether `TABLE` prefixed it.
    /// `TABLE` is not itself a distinct [`SlType`] — a declaration is an
    /// array iff this returns `true`, or (for a scalar type with a
    /// `[n]` suffix) the declaration has explicit brackets.
    fn parse_type(&mut self) -> CompileResult<(SlType, bool)> {
        if self.current.kind == TokenKind::Table {
            self.eat(TokenKind::Table)?;
            let (vtype, _) =
                self.parse_scalar_type("Type de tableau attendu (INT, FLOAT, CHAR) apres TABLE")?;
            Ok((vtype, true))
        } else {
            self.parse_scalar_type("Type attendu")
        }
    }

    fn parse_scalar_type(&mut self, error_message: &str) -> CompileResult<(SlType, bool)> {
        let vtype = match self.current.kind {
            TokenKind::Int => {
                self.eat(TokenKind::Int)?;
                SlType::Int
            }
            TokenKind::Char => {
                self.eat(TokenKind::Char)?;
                SlType::Char
            }
            TokenKind::Float => {
                self.eat(TokenKind::Float)?;
                SlType::Float
            }
            _ => return Err(self.syntax_error(error_message)),
        };
        Ok((vtype, false))
    }

    /// `declarations = { type ident [ "[" int "]" ] ";" }`
    ///
    /// Shared by a `FONCTION` body and `DEBUT`: both declare a run of
    /// typed variables before their first instruction, and both emit a
    /// plain C declaration line per variable. `scope` tags every symbol
    /// declared here — it never gates whether the declaration is
    /// accepted, only what a later double-declaration error reports.
    pub(crate) fn parse_declarations(&mut self, scope: Scope) -> CompileResult<()> {
        while matches!(
            self.current.kind,
            TokenKind::Int | TokenKind::Char | TokenKind::Float | TokenKind::Table
        ) {
            let (vtype, is_table) = self.parse_type()?;

            let name = self.current.text.clone();
            let at = self.current.position;
            self.eat(TokenKind::Ident)?;

            let mut array_size = 0usize;
            if is_table || self.current.kind == TokenKind::LBracket {
                if self.current.kind == TokenKind::LBracket {
                    self.eat(TokenKind::LBracket)?;
                    if self.current.kind != TokenKind::IntLit {
                        return Err(self.syntax_error("Taille de tableau doit etre une constante"));
                    }
                    array_size = self
                        .current
                        .text
                        .parse()
                        .map_err(|_| self.syntax_error("Taille de tableau invalide"))?;
                    self.eat(TokenKind::IntLit)?;
                    self.eat(TokenKind::RBracket)?;
                } else {
                    return Err(self.syntax_error("Crochets attendus pour declaration de tableau"));
                }
            }

            self.symtab.declare_variable(&name, vtype, array_size, scope, at)?;

            self.emitter.write_indent();
            self.emitter.write(&format!("{} {name}", vtype.c_type_name()));
            if array_size > 0 {
                self.emitter.write(&format!("[{array_size}]"));
            }
            self.emitter.write(";\n");
        }
        Ok(())
    }

    /// `fonction_decl = "FONCTION" ident "(" [ param { "," param } ] ")" declarations { instruction } "FINFONCTION"`
    fn parse_fonction_decl(&mut self) -> CompileResult<()> {
        self.eat(TokenKind::Fonction)?;

        let fname = self.current.text.clone();
        let fname_pos = self.current.position;
        self.eat(TokenKind::Ident)?;

        self.eat(TokenKind::LParen)?;
        let mut param_types = Vec::new();
        let mut param_names = Vec::new();
        if matches!(self.current.kind, TokenKind::Int | TokenKind::Char | TokenKind::Float) {
            self.parse_param(&mut param_types, &mut param_names)?;
            while self.current.kind == TokenKind::Comma {
                self.eat(TokenKind::Comma)?;
                self.parse_param(&mut param_types, &mut param_names)?;
            }
        }
        self.eat(TokenKind::RParen)?;

        self.symtab
            .declare_function(&fname, SlType::Int, param_types.clone(), fname_pos)?;

        self.emitter.write(&format!("int {fname}("));
        for (i, (ptype, pname)) in param_types.iter().zip(param_names.iter()).enumerate() {
            if i > 0 {
                self.emitter.write(", ");
            }
            self.emitter.write(&format!("{} {pname}", ptype.c_type_name()));
        }
        self.emitter.write("){\n");
        self.emitter.indent();

        self.in_function = true;
        self.parse_declarations(Scope::Function)?;

        while self.current.kind != TokenKind::FinFonction {
            self.parse_instruction()?;
        }
        self.eat(TokenKind::FinFonction)?;

        self.emitter.dedent();
        self.emitter.write("}\n\n");
        self.in_function = false;
        Ok(())
    }

    /// A single `type ident` in a `FONCTION`'s parameter list. Unlike a
    /// local variable, a parameter cannot be a `TABLE`.
    fn parse_param(
        &mut self,
        param_types: &mut Vec<SlType>,
        param_names: &mut Vec<String>,
    ) -> CompileResult<()> {
        let (ptype, _) = self.parse_scalar_type("Type de parametre attendu")?;
        let name = self.current.text.clone();
        let at = self.current.position;
        self.eat(TokenKind::Ident)?;
        self.symtab.declare_parameter(&name, ptype, at)?;
        param_types.push(ptype);
        param_names.push(name);
        Ok(())
    }

    /// `program = "#include <stdio.h>" { fonction_decl } "int main(){" declarations { instruction } "}"`
    ///
    /// The entry point: every `FONCTION` precedes `DEBUT` in the source
    /// and in the generated C, matching the reference compiler's two
    /// top-level passes (functions, then `main`) over the same token
    /// stream with no backtracking.
    pub(crate) fn parse_program(&mut self) -> CompileResult<()> {
        self.emitter.write("#include <stdio.h>\n\n");

        while self.current.kind == TokenKind::Fonction {
            self.parse_fonction_decl()?;
        }

        self.emitter.write("int main(){\n");
        self.emitter.indent();

        self.eat(TokenKind::Debut)?;
        self.parse_declarations(Scope::Global)?;

        while self.current.kind != TokenKind::Fin {
            self.parse_instruction()?;
        }
        self.eat(TokenKind::Fin)?;

        self.emitter.write("    return 0;\n}\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::compile;

    #[test]
    fn compiles_a_program_with_no_declarations_or_instructions() {
        let source = b"DEBUT FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("#include <stdio.h>"));
        assert!(output.contains("int main(){"));
        assert!(output.contains("return 0;"));
    }

    #[test]
    fn declares_a_scalar_variable_in_main() {
        let source = b"DEBUT INT x x = 5 FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("int x;"));
        assert!(output.contains("x = 5;"));
    }

    #[test]
    fn declares_an_array_variable_in_main() {
        let source = b"DEBUT TABLE INT t[10] t[0] = 1 FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("int t[10];"));
        assert!(output.contains("t[0] = 1;"));
    }

    #[test]
    fn full_function_with_return_compiles_before_main() {
        let source = b"FONCTION carre(INT n)\nINT r\nr = n * n\nRETOURNER r\nFINFONCTION\nDEBUT FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("int carre(int n){"));
        assert!(output.contains("return r;"));
        assert!(output.find("int carre").unwrap() < output.find("int main").unwrap());
    }

    #[test]
    fn duplicate_function_name_is_rejected() {
        let source = b"FONCTION f(INT n) FINFONCTION\nFONCTION f(INT n) FINFONCTION\nDEBUT FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Double declaration de fonction"));
    }

    #[test]
    fn duplicate_variable_in_debut_is_rejected() {
        let source = b"DEBUT INT x INT x FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Double declaration de variable"));
    }

    #[test]
    fn array_size_must_be_a_constant() {
        let source = b"DEBUT TABLE INT t[x] FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("Taille de tableau doit etre une constante"));
    }

    #[test]
    fn retourner_outside_a_function_is_rejected() {
        let source = b"DEBUT RETOURNER 1 FIN";
        let err = compile(source).unwrap_err();
        assert!(format!("{err}").contains("RETOURNER hors fonction"));
    }

    // The six scenarios below are transcribed verbatim from the testable
    // properties the language is specified against.

    #[test]
    fn scenario_s1_scalar_declaration_affectation_and_ecriture() {
        let source = b"DEBUT INT x x ~ 3 + 4 ECRIRE x FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("int x;"));
        assert!(output.contains("x = 3 + 4;"));
        assert!(output.contains("printf(\"%d\\n\", x);"));
        assert!(output.contains("int main(){"));
        assert!(output.contains("return 0;"));
    }

    #[test]
    fn scenario_s2_array_declaration_affectation_and_lecture() {
        let source = b"DEBUT INT a[3] a[0] ~ 1 LIRE(a[1]) FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("int a[3];"));
        assert!(output.contains("a[0] = 1;"));
        assert!(output.contains("scanf(\"%d\", &a[1]);"));
    }

    #[test]
    fn scenario_s3_function_with_return_called_from_main() {
        let source =
            b"FONCTION sq (INT n) RETOURNER n * n FINFONCTION DEBUT INT y y ~ sq(5) FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("int sq(int n){"));
        assert!(output.contains("return n * n;"));
        assert!(output.contains("y = sq(5);"));
    }

    #[test]
    fn scenario_s4_pour_boucle_lowers_to_a_c_for_loop() {
        let source = b"DEBUT INT i POUR i DE 1 A 10 ECRIRE i FINPOUR FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("for(i = 1; i <= 10; i++){"));
        assert!(output.contains("printf(\"%d\\n\", i);"));
    }

    #[test]
    fn scenario_s5_nested_si_sinon_si_chain() {
        let source = b"DEBUT INT x x ~ 1 SI x == 1 ALORS ECRIRE \"ok\" SINON SI x == 2 ALORS ECRIRE \"two\" SINON ECRIRE \"other\" FINSI FIN";
        let output = compile(source).unwrap();
        assert!(output.contains("if(x == 1){"));
        assert!(output.contains("printf(\"ok\\n\");"));
        // A recursive `SINON SI` re-enters the whole production, which
        // calls write_indent() on entry same as the top-level call — so
        // the dedented "} else " line is immediately followed by a second
        // indent's worth of spaces before the nested "if(". Matches the
        // reference compiler's generated output exactly (confirmed by
        // compiling and running it on this input).
        assert!(output.contains("} else     if(x == 2){"));
        assert!(output.contains("printf(\"two\\n\");"));
        assert!(output.contains("} else {"));
        assert!(output.contains("printf(\"other\\n\");"));
    }

    #[test]
    fn scenario_s6_incompatible_types_is_a_semantic_error() {
        let source = b"DEBUT INT x FLOAT y x ~ y FIN";
        let err = compile(source).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("types incompatibles"));
    }
}
