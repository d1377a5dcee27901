use std::path::{Path, PathBuf};

/// A collection of sources that diagnostics can point into.
pub trait Sources {
    type SourceId: Copy + Eq + std::hash::Hash;
    type Source: Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>>;
}

pub trait Source {
    fn name_str(&self) -> &str;
    fn path(&self) -> Option<&Path>;

    fn source_str(&self) -> &str;
}

impl<S: Source> Sources for Vec<Cached<S>> {
    type SourceId = usize;
    type Source = S;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>> {
        self.get(id)
    }
}

impl Source for (String, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn source_str(&self) -> &str {
        &self.1
    }
}

impl Source for (String, PathBuf, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.1)
    }

    fn source_str(&self) -> &str {
        &self.2
    }
}

/// A source with its line starts precomputed.
#[derive(Debug, Clone)]
pub struct Cached<S: Source> {
    source: S,
    line_breaks: Vec<usize>,
}

impl<S: Source> Cached<S> {
    pub fn new(source: S) -> Self {
        let line_breaks = source
            .source_str()
            .bytes()
            .enumerate()
            .filter_map(|(i, b)| (b == b'\n').then_some(i))
            .collect();

        Self {
            source,
            line_breaks,
        }
    }

    pub fn as_source(&self) -> &S {
        &self.source
    }

    /// One-based line and column of a byte offset. Columns count bytes.
    pub fn byte_to_line_col(&self, byte: usize) -> Option<(usize, usize)> {
        let line = self.byte_to_line_index(byte)?;
        let col = byte - self.line_to_byte(line)?;

        Some((line + 1, col + 1))
    }

    pub fn byte_to_line_index(&self, byte: usize) -> Option<usize> {
        if byte > self.source_str().len() {
            return None;
        }

        match self.line_breaks.binary_search(&byte) {
            Ok(line) | Err(line) => Some(line),
        }
    }

    pub fn line_to_byte(&self, line: usize) -> Option<usize> {
        match line {
            0 => Some(0),
            _ => self.line_breaks.get(line - 1).map(|&byte| byte + 1),
        }
    }

    /// The text of a line without its terminator.
    pub fn line_str(&self, index: usize) -> Option<&str> {
        let start = self.line_to_byte(index)?;
        let end = self
            .line_to_byte(index + 1)
            .unwrap_or(self.source_str().len());

        let s = &self.source_str()[start..end];
        let s = s.strip_suffix('\n').unwrap_or(s);
        Some(s.strip_suffix('\r').unwrap_or(s))
    }

    pub fn num_lines(&self) -> usize {
        1 + self.line_breaks.len()
    }
}

impl<S: Source> Source for Cached<S> {
    fn name_str(&self) -> &str {
        self.source.name_str()
    }

    fn path(&self) -> Option<&Path> {
        self.source.path()
    }

    fn source_str(&self) -> &str {
        self.source.source_str()
    }
}
