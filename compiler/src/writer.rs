/// Accumulates generated lines, indenting each by the current depth.
#[derive(Debug, Default)]
pub struct LineWriter {
    lines:  Vec<String>,
    indent: usize,
}

impl LineWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn push_indent(&mut self) {
        self.indent += 1;
    }

    pub fn pop_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn add(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("{}{}", "\t".repeat(self.indent), line.as_ref()));
    }

    /// Adds each line of `text` at the current depth.
    pub fn extend(&mut self, text: &str) {
        for line in text.split('\n') {
            self.add(line);
        }
    }

    pub fn newline(&mut self) {
        self.add("");
    }

    /// Drops trailing blank lines.
    pub fn rstrip(&mut self) {
        while self.lines.last().is_some_and(|line| line.trim().is_empty()) {
            self.lines.pop();
        }
    }

    /// Consumes `self`, returning the text with trailing whitespace removed from every line.
    #[must_use]
    pub fn into_text(mut self) -> String {
        self.rstrip();
        let mut text = self
            .lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_and_strip() {
        let mut writer = LineWriter::new();
        writer.add("a {");
        writer.push_indent();
        writer.extend("b\nc");
        writer.newline();
        writer.newline();
        writer.rstrip();
        writer.pop_indent();
        writer.add("}");
        writer.newline();
        assert_eq!(writer.into_text(), "a {\n\tb\n\tc\n}\n");
    }

    #[test]
    fn test_pop_indent_saturates() {
        let mut writer = LineWriter::new();
        writer.pop_indent();
        assert_eq!(writer.indent(), 0);
    }
}
