/// Indentation-aware text buffer for generated source.
///
/// Every [`CodeWriter::line`] is prefixed with the current indentation. Blocks are opened and
/// closed explicitly so emitters can interleave them with arbitrary recursion.
#[derive(Clone, Debug)]
pub struct CodeWriter {
    out: String,
    indent_level: usize,
    indent_unit: &'static str,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(4096),
            indent_level: 0,
            indent_unit: "  ",
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn deindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Write one indented line. Empty text produces a blank line without trailing spaces.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent_level {
                self.out.push_str(self.indent_unit);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `open`, indent, and return; pair with [`CodeWriter::close`].
    pub fn open(&mut self, open: impl AsRef<str>) {
        self.line(open);
        self.indent();
    }

    pub fn close(&mut self, close: impl AsRef<str>) {
        self.deindent();
        self.line(close);
    }

    /// Write a multi-line snippet, re-indenting each of its lines at the current level.
    pub fn lines(&mut self, snippet: &str) {
        for line in snippet.lines() {
            self.line(line);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// Format a coordinate for output: at most three decimals, trailing zeros trimmed.
///
/// Non-finite values are written as `0` so generated code always parses.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let text = format!("{value:.3}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    match text {
        "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}

/// Quote `text` as a double-quoted string literal.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/emit/writer.rs"]
mod tests;
