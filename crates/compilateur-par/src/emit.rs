//! C-text emission: indentation tracking.
//!
//! Every `fprintf(out, ...)` call in the reference compiler becomes a
//! `write!` into an [`Emitter`]'s buffer here. The one wrinkle is
//! `ECRIRE` on a non-string expression: the reference implementation
//! redirects `out` to an `open_memstream` for the duration of
//! `EXPR_COMPLETE`, reads back the formatted expression text, then
//! restores `out` and writes the `printf` call around it — because the
//! format specifier (`%d`/`%f`/`%c`) is only known *after* the expression
//! has been type-checked, but the expression text must appear *before*
//! it in the generated `printf(fmt, expr)` call. `ECRIRE` (in `stmt.rs`)
//! reproduces this by swapping a fresh `Emitter` in for the whole parser
//! for the duration of the expression, since parsing it needs the rest
//! of the parser's state too, not just this buffer — the real buffer is
//! restored even across an early `?` return.

pub struct Emitter {
    buffer: String,
    indent: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent -= 1;
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buffer.push_str("    ");
        }
    }

    pub fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_is_four_spaces_per_level() {
        let mut e = Emitter::new();
        e.indent();
        e.indent();
        e.write_indent();
        e.write("x;");
        assert_eq!(e.into_output(), "        x;");
    }
}
