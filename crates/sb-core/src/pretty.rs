use std::fmt::Write as _;

/// Line-oriented source buffer with indentation tracking, shared by renderers.
pub struct SourceWriter {
    out: String,
    indent_size: usize,
    indent: usize,
}

impl SourceWriter {
    pub fn new(indent_size: usize) -> Self {
        Self {
            out: String::new(),
            indent_size,
            indent: 0,
        }
    }

    pub fn line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.out.push(' ');
            }
            self.out.push_str(line);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent += self.indent_size;
    }

    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(self.indent_size);
    }

    pub fn with_indent<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.increase_indent();
        f(self);
        self.decrease_indent();
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Escape a string for a Java/Kotlin-style double-quoted literal.
pub fn escape_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_indents_nested_blocks() {
        let mut writer = SourceWriter::new(2);
        writer.line("a {");
        writer.with_indent(|w| w.line("b;"));
        writer.line("}");
        assert_eq!(writer.finish(), "a {\n  b;\n}\n");
    }

    #[test]
    fn escapes_quotes_and_controls() {
        assert_eq!(escape_string("a\"b\\c\n"), "a\\\"b\\\\c\\n");
        assert_eq!(escape_string("\u{1}"), "\\u0001");
    }
}
