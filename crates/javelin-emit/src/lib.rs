//! Line-oriented output sink for generated source.
//!
//! Renderers write whole lines at the current indentation, open nested scopes with
//! [`Emitter::indented`], and render fragments out of line with [`Emitter::buffered`]
//! so they can be reordered or dropped before being spliced back in.

/// Indentation configuration for an [`Emitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitConfig {
    pub indent_width: usize,
    pub newline: &'static str,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            newline: "\n",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Emitter {
    out: String,
    level: usize,
    config: EmitConfig,
}

impl Emitter {
    pub fn new(config: EmitConfig) -> Self {
        Self {
            out: String::new(),
            level: 0,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> EmitConfig {
        self.config
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Emits `text` at the current indentation. Embedded newlines start new lines at the
    /// same indentation; empty lines are written without trailing whitespace.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.out.push_str(self.config.newline);
            return;
        }
        for line in text.lines() {
            if !line.trim().is_empty() {
                for _ in 0..self.level * self.config.indent_width {
                    self.out.push(' ');
                }
                self.out.push_str(line);
            }
            self.out.push_str(self.config.newline);
        }
    }

    /// Emits an empty line unless the output is empty or already ends with one.
    pub fn blank_line(&mut self) {
        let double = format!("{0}{0}", self.config.newline);
        if self.out.is_empty() || self.out.ends_with(&double) {
            return;
        }
        self.out.push_str(self.config.newline);
    }

    /// Runs `f` one indentation level deeper.
    pub fn indented<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.level += 1;
        let result = f(self);
        self.level -= 1;
        result
    }

    /// Runs `f` against a fresh emitter at indentation zero and returns what it wrote.
    pub fn buffered<R>(&self, f: impl FnOnce(&mut Emitter) -> R) -> (String, R) {
        let mut buffer = Emitter::new(self.config);
        let result = f(&mut buffer);
        (buffer.finish(), result)
    }

    /// Writes previously buffered output at the current indentation.
    pub fn splice(&mut self, block: &str) {
        let indent = " ".repeat(self.level * self.config.indent_width);
        self.out.push_str(&indent_block(block, &indent));
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(EmitConfig::default())
    }
}

/// Indents each non-empty line in `block` with `indent`.
fn indent_block(block: &str, indent: &str) -> String {
    let mut out = String::with_capacity(block.len() + indent.len() * 4);
    for line in block.split_inclusive('\n') {
        let line_stripped = line.strip_suffix('\n').unwrap_or(line);
        if !line_stripped.trim().is_empty() {
            out.push_str(indent);
        }
        out.push_str(line_stripped);
        if line.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
