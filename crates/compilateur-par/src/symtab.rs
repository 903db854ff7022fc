//! The flat, append-only symbol table.
//!
//! Unlike a scope-stack symbol table (push a new scope on block entry, pop
//! it on exit, shadow by walking inward-out), this one never removes an
//! entry: every declaration — parameter, local, function — is appended
//! once and tagged with the [`Scope`] it was declared in. Lookup walks
//! the vector from the end, so the most recently declared symbol with a
//! matching name wins, matching a stack's shadowing behavior without
//! the stack.
//!
//! Capacity is capped at [`MAX_SYMBOLS`]; going over the cap is a
//! semantic error rather than a panic or silent reallocation — a program
//! that declares that many names is almost certainly malformed.

use compilateur_util::{CompileError, CompileResult, Position};

/// Maximum number of symbols a single compilation may declare.
pub const MAX_SYMBOLS: usize = 256;

/// The scope a symbol was declared in.
///
/// There are exactly two: the body of a `FONCTION` (its parameters and
/// locals), and everything declared at scope 0 — function names
/// themselves, and the top-level `DEBUT` block's own declarations.
/// Double declaration is rejected unconditionally regardless of which
/// scope a name is declared in (see `declare_variable`), so this tag is
/// bookkeeping only, not a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Function,
    Global,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlType {
    Int,
    Char,
    Float,
}

impl SlType {
    /// The C type name this scalar type emits as.
    pub fn c_type_name(self) -> &'static str {
        match self {
            SlType::Int => "int",
            SlType::Char => "char",
            SlType::Float => "float",
        }
    }

    /// The `printf` conversion specifier for this type.
    pub fn format_specifier(self) -> &'static str {
        match self {
            SlType::Int => "%d",
            SlType::Char => "%c",
            SlType::Float => "%f",
        }
    }

    /// The `scanf` conversion specifier for this type. `Char` carries a
    /// leading space so `scanf` skips stray whitespace (a trailing
    /// newline from the previous read) before consuming exactly one
    /// character — without it, `LIRE` on a `CHAR` would read back
    /// whatever whitespace byte was left over from the prior input.
    pub fn scan_format_specifier(self) -> &'static str {
        match self {
            SlType::Int => "%d",
            SlType::Char => " %c",
            SlType::Float => "%f",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Variable { array_size: usize },
    Function { param_types: Vec<SlType> },
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub vtype: SlType,
    pub kind: SymbolKind,
    pub scope: Scope,
}

impl Symbol {
    pub fn is_array(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable { array_size } if array_size > 0)
    }
}

#[derive(Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Declares a scalar or array variable, tagged with the [`Scope`] it
    /// lives in. A second declaration of the same name is always
    /// rejected, in `DEBUT`'s declarations as much as a `FONCTION`'s (see
    /// `DESIGN.md` for why this departs from the reference compiler,
    /// which only checks inside a function body).
    ///
    /// This is for a `FONCTION` body's or `DEBUT`'s own declarations —
    /// not for a parameter. See [`Self::declare_parameter`].
    pub fn declare_variable(
        &mut self,
        name: &str,
        vtype: SlType,
        array_size: usize,
        scope: Scope,
        at: Position,
    ) -> CompileResult<()> {
        if self.find_variable(name).is_some() {
            return Err(CompileError::semantic(at, "Double declaration de variable", name));
        }
        self.push(Symbol {
            name: name.to_string(),
            vtype,
            kind: SymbolKind::Variable { array_size },
            scope,
        }, at)
    }

    /// Declares a `FONCTION` parameter, unconditionally — no
    /// double-declaration check, even against another parameter of the
    /// same function. The reference compiler adds parameters before it
    /// toggles into the function body's own scope, so they are never
    /// subject to the duplicate check at all; two different functions
    /// (or, for that matter, one function's own signature) are free to
    /// reuse a parameter name, and a later reference simply resolves to
    /// whichever same-named parameter was declared most recently.
    pub fn declare_parameter(
        &mut self,
        name: &str,
        vtype: SlType,
        at: Position,
    ) -> CompileResult<()> {
        self.push(Symbol {
            name: name.to_string(),
            vtype,
            kind: SymbolKind::Variable { array_size: 0 },
            scope: Scope::Function,
        }, at)
    }

    /// Declares a function, always at [`Scope::Global`]: a function name
    /// is known from the point of its declaration on, the same as a
    /// `DEBUT`-block variable, regardless of whether the declaration
    /// happens to sit lexically before or after a `FONCTION` body.
    pub fn declare_function(
        &mut self,
        name: &str,
        return_type: SlType,
        param_types: Vec<SlType>,
        at: Position,
    ) -> CompileResult<()> {
        if self.find_function(name).is_some() {
            return Err(CompileError::semantic(at, "Double declaration de fonction", name));
        }
        self.push(Symbol {
            name: name.to_string(),
            vtype: return_type,
            kind: SymbolKind::Function { param_types },
            scope: Scope::Global,
        }, at)
    }

    fn push(&mut self, symbol: Symbol, at: Position) -> CompileResult<()> {
        if self.symbols.len() >= MAX_SYMBOLS {
            return Err(CompileError::semantic(
                at,
                "Table des symboles pleine",
                symbol.name.as_str(),
            ));
        }
        self.symbols.push(symbol);
        Ok(())
    }

    pub fn find_variable(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .iter()
            .rev()
            .find(|s| s.name == name && matches!(s.kind, SymbolKind::Variable { .. }))
    }

    pub fn find_function(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .iter()
            .rev()
            .find(|s| s.name == name && matches!(s.kind, SymbolKind::Function { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_most_recently_declared_symbol() {
        // A parameter is free to reuse a name already declared at
        // Scope::Global (e.g. a DEBUT variable) since declare_parameter
        // never checks for a duplicate; the most recent one wins.
        let mut table = SymbolTable::new();
        table
            .declare_variable("x", SlType::Int, 0, Scope::Global, Position::START)
            .unwrap();
        table.declare_parameter("x", SlType::Float, Position::START).unwrap();
        assert_eq!(table.find_variable("x").unwrap().vtype, SlType::Float);
    }

    #[test]
    fn parameters_never_trigger_the_duplicate_check() {
        let mut table = SymbolTable::new();
        table.declare_parameter("n", SlType::Int, Position::START).unwrap();
        // Same name, another function's parameter list: must succeed,
        // unlike declare_variable's unconditional check.
        table.declare_parameter("n", SlType::Int, Position::START).unwrap();
    }

    #[test]
    fn duplicate_declaration_in_function_scope_is_rejected() {
        let mut table = SymbolTable::new();
        table
            .declare_variable("x", SlType::Int, 0, Scope::Function, Position::START)
            .unwrap();
        let err = table
            .declare_variable("x", SlType::Int, 0, Scope::Function, Position::START)
            .unwrap_err();
        assert!(matches!(err, CompileError::Semantic { .. }));
    }

    #[test]
    fn duplicate_declaration_in_main_scope_is_also_rejected() {
        let mut table = SymbolTable::new();
        table
            .declare_variable("x", SlType::Int, 0, Scope::Global, Position::START)
            .unwrap();
        let err = table
            .declare_variable("x", SlType::Int, 0, Scope::Global, Position::START)
            .unwrap_err();
        assert!(matches!(err, CompileError::Semantic { .. }));
    }

    #[test]
    fn duplicate_function_declaration_is_rejected() {
        let mut table = SymbolTable::new();
        table
            .declare_function("f", SlType::Int, vec![], Position::START)
            .unwrap();
        let err = table
            .declare_function("f", SlType::Int, vec![], Position::START)
            .unwrap_err();
        assert!(matches!(err, CompileError::Semantic { .. }));
    }

    #[test]
    fn table_full_is_a_semantic_error_not_a_panic() {
        let mut table = SymbolTable::new();
        for i in 0..MAX_SYMBOLS {
            table
                .declare_variable(&format!("v{i}"), SlType::Int, 0, Scope::Global, Position::START)
                .unwrap();
        }
        let err = table
            .declare_variable("overflow", SlType::Int, 0, Scope::Global, Position::START)
            .unwrap_err();
        assert!(matches!(err, CompileError::Semantic { .. }));
    }
}
