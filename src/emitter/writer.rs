/// Width of one indentation level
pub const INDENT: &str = "    ";

/// Accumulates indented output lines
#[derive(Debug, Default)]
pub struct LineWriter {
    lines: Vec<String>,
    depth: usize,
}

impl LineWriter {
    /// An empty writer at depth zero
    #[must_use]
    pub fn new() -> Self {
        LineWriter::default()
    }

    /// Append `line` at the current depth; empty lines carry no indentation
    pub fn line(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.depth), line));
        }
    }

    /// Open a block: write `header` and indent everything that follows
    pub fn open(&mut self, header: &str) {
        self.line(header);
        self.depth += 1;
    }

    /// Close the innermost block with `}`
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Current indentation depth
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The lines written so far
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
