//! Indentation-aware text accumulator used for every emitted line.
//!
//! Layout is owned by the builder, not by the text fed into it:
//! - leading whitespace of appended text is dropped and replaced with the
//!   current indentation (4 spaces per level), only on lines with content;
//! - runs of whitespace inside a line collapse to a single space and trailing
//!   whitespace is trimmed, except inside string and char literals;
//! - blank lines never stack, never lead the output, and never sit right
//!   before a block's closing brace.

const INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    None,
    Regular,
    Verbatim,
    Char,
}

#[derive(Debug)]
pub struct TextBuilder {
    complete: String,
    current: String,
    indent: usize,
    last_was_empty: bool,
    pending_space: bool,
    literal: Literal,
    escaped: bool,
}

impl Default for TextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            complete: String::new(),
            current: String::new(),
            indent: 0,
            // Start as if a blank line was just written so output never opens with one.
            last_was_empty: true,
            pending_space: false,
            literal: Literal::None,
            escaped: false,
        }
    }

    /// Append text to the current line; embedded newlines end lines.
    pub fn append(&mut self, text: &str) -> &mut Self {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {}
                '\n' => self.end_line(),
                _ if self.literal != Literal::None => {
                    let doubled_quote = self.literal == Literal::Verbatim
                        && c == '"'
                        && chars.peek() == Some(&'"');
                    if doubled_quote {
                        chars.next();
                        self.current.push_str("\"\"");
                    } else {
                        self.push_literal(c);
                    }
                }
                c if c.is_whitespace() => {
                    if !self.current.is_empty() {
                        self.pending_space = true;
                    }
                }
                c => self.push_content(c),
            }
        }
        self
    }

    /// Append text and terminate the line. `line("")` requests a blank line.
    pub fn line(&mut self, text: &str) -> &mut Self {
        self.append(text);
        self.end_line();
        self
    }

    /// Append items separated by `separator`, all on the current line.
    pub fn join<I>(&mut self, separator: &str, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for (idx, item) in items.into_iter().enumerate() {
            if idx > 0 {
                self.append(separator);
            }
            self.append(item.as_ref());
        }
        self
    }

    /// Emit `{`, run `body` one level deeper, emit `}`.
    ///
    /// The closing brace is written even when `body` reports an error; its
    /// result is handed back untouched.
    pub fn block<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        self.line("{");
        self.indent += 1;
        let result = body(self);
        if !self.current.is_empty() {
            self.end_line();
        }
        self.indent -= 1;

        if self.last_was_empty && self.complete.ends_with("\n\n") {
            self.complete.pop();
            self.last_was_empty = false;
        }
        self.line("}");
        result
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.complete.is_empty() && self.current.is_empty()
    }

    /// The accumulated text, ending with exactly one newline.
    #[must_use]
    pub fn finish(mut self) -> String {
        if !self.current.is_empty() {
            self.end_line();
        }
        while self.complete.ends_with("\n\n") {
            self.complete.pop();
        }
        self.complete
    }

    fn end_line(&mut self) {
        self.pending_space = false;
        self.literal = Literal::None;
        self.escaped = false;

        if self.current.is_empty() {
            if !self.last_was_empty {
                self.complete.push('\n');
                self.last_was_empty = true;
            }
            return;
        }

        self.complete.push_str(self.current.trim_end());
        self.complete.push('\n');
        self.current.clear();
        self.last_was_empty = false;
    }

    fn push_content(&mut self, c: char) {
        if self.current.is_empty() {
            self.current
                .extend(std::iter::repeat(' ').take(self.indent * INDENT_WIDTH));
        } else if self.pending_space {
            self.current.push(' ');
        }
        self.pending_space = false;

        let previous = self.current.chars().last();
        self.literal = match c {
            '"' if self.current.ends_with('@') || self.current.ends_with("@$") => {
                Literal::Verbatim
            }
            '"' => Literal::Regular,
            '\'' if !previous.is_some_and(char::is_alphanumeric) => Literal::Char,
            _ => Literal::None,
        };
        self.current.push(c);
    }

    fn push_literal(&mut self, c: char) {
        self.current.push(c);
        if self.escaped {
            self.escaped = false;
            return;
        }
        match (self.literal, c) {
            (Literal::Regular | Literal::Char, '\\') => self.escaped = true,
            (Literal::Regular | Literal::Verbatim, '"') | (Literal::Char, '\'') => {
                self.literal = Literal::None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn build(f: impl FnOnce(&mut TextBuilder)) -> String {
        let mut b = TextBuilder::new();
        f(&mut b);
        b.finish()
    }

    #[test]
    fn lines_and_appends() {
        let out = build(|b| {
            b.line("a");
            b.append("b").append("c");
        });
        assert_eq!(out, "a\nbc\n");
    }

    #[test]
    fn collapses_intra_line_whitespace() {
        let out = build(|b| {
            b.line("int   Add(int a,\t  int b);   ");
        });
        assert_eq!(out, "int Add(int a, int b);\n");
    }

    #[test]
    fn blank_lines_never_stack_or_lead() {
        let out = build(|b| {
            b.line("");
            b.line("a");
            b.line("");
            b.line("");
            b.append("\n\n\n");
            b.line("b");
        });
        assert_eq!(out, "a\n\nb\n");
    }

    #[test]
    fn block_indents_and_reindents_pasted_text() {
        let out = build(|b| {
            b.line("interface IFoo");
            b.block(|b| {
                b.line("        void A();");
                b.line("");
                b.line("void B();");
                b.line("");
            });
        });
        assert_eq!(out, "interface IFoo\n{\n    void A();\n\n    void B();\n}\n");
    }

    #[test]
    fn empty_block_has_no_interior_blank_line() {
        let out = build(|b| {
            b.line("interface IFoo");
            b.block(|_| {});
        });
        assert_eq!(out, "interface IFoo\n{\n}\n");
    }

    #[test]
    fn nested_blocks() {
        let out = build(|b| {
            b.block(|b| {
                b.line("a");
                b.block(|b| {
                    b.line("b");
                });
            });
        });
        assert_eq!(out, "{\n    a\n    {\n        b\n    }\n}\n");
    }

    #[test]
    fn block_hands_back_body_result() {
        let mut b = TextBuilder::new();
        let result: Result<(), &str> = b.block(|b| {
            b.append("partial");
            Err("stop")
        });
        assert_eq!(result, Err("stop"));
        assert_eq!(b.finish(), "{\n    partial\n}\n");
    }

    #[test]
    fn string_literals_keep_their_spacing() {
        let out = build(|b| {
            b.line(r#"void F(string s  =  "a   b\"  c",   string t = @"x ""  "" y");"#);
        });
        assert_eq!(
            out,
            "void F(string s = \"a   b\\\"  c\", string t = @\"x \"\"  \"\" y\");\n"
        );
    }

    #[test]
    fn char_literals_and_apostrophes() {
        let out = build(|b| {
            b.line(r"char c = '\''  ,   x");
            b.line("/// Don't   touch   the class's   docs");
        });
        assert_eq!(out, "char c = '\\'' , x\n/// Don't touch the class's docs\n");
    }

    #[test]
    fn carriage_returns_are_dropped() {
        let out = build(|b| {
            b.append("a\r\nb\r\n");
        });
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn join_interleaves_separator() {
        let out = build(|b| {
            b.append("(").join(", ", ["int a", "int b", "int c"]).append(")");
        });
        assert_eq!(out, "(int a, int b, int c)\n");
    }

    #[test]
    fn empty_builder_finishes_empty() {
        let b = TextBuilder::new();
        assert!(b.is_empty());
        assert_eq!(b.finish(), "");
    }

    proptest! {
        #[test]
        fn proptest_layout_invariants(lines in proptest::collection::vec("[a-z;(){} \\t]{0,24}", 0..24)) {
            let mut b = TextBuilder::new();
            b.line("{");
            b.block(|b| {
                for line in &lines {
                    b.line(line);
                }
            });
            let out = b.finish();

            prop_assert!(!out.contains("\n\n\n"));
            prop_assert!(!out.starts_with('\n'));
            prop_assert!(!out.contains('\t'));
            prop_assert!(out.ends_with("}\n"), "output does not end with closing brace:\n{}", out);
            for line in out.lines() {
                prop_assert_eq!(line, line.trim_end());
                prop_assert!(!line.trim_start().contains("  "));
            }
        }
    }
}
