use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::{Config, Diagnostic, Severity, Snippet, SnippetKind};

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    /// Render the diagnostic, with every snippet drawn under its source lines.
    ///
    /// # Panics
    /// Panics if a snippet refers to a missing source or lies outside it.
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        let mut snippets: Vec<&Snippet<S>> = self.diagnostic.snippets.iter().collect();
        snippets.sort_by_key(|snippet| (snippet.span.start, snippet.kind));

        for snippet in snippets {
            let source = self
                .sources
                .get_source(snippet.source_id)
                .expect("source missing");

            self.draw_snippet(source, snippet)?;
        }

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.primary_color())?;

        if let Some(id) = &self.diagnostic.id {
            write!(self.stream, "[{id}] ")?;
        }

        write!(self.stream, "{}:", self.diagnostic.severity.as_str())?;
        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_snippet(&mut self, source: &Cached<S::Source>, snippet: &Snippet<S>) -> io::Result<()> {
        let span = snippet.span;

        let (line_num, col_num) = source
            .byte_to_line_col(span.start)
            .expect("span start out of bounds");

        let first_line = line_num - 1;
        let last_line = source
            .byte_to_line_index(span.end)
            .expect("span end out of bounds");

        let context_start = first_line.saturating_sub(self.config.context_size);
        let context_end = (last_line + 1 + self.config.context_size).min(source.num_lines());

        let line_num_width = context_end.max(1).ilog10() as usize + 1;

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{line_num}:{col_num}", source.name_str())?;
        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{line_num}:{col_num})", path.display())?;
        }
        writeln!(self.stream)?;
        self.stream.reset()?;

        for line in context_start..context_end {
            let line_str = source.line_str(line).expect("line out of bounds");

            self.draw_gutter(Some(line + 1), line_num_width)?;
            writeln!(self.stream, "{}", line_str.replace('\t', TAB))?;

            if line < first_line || line > last_line {
                continue;
            }

            let line_start = source.line_to_byte(line).expect("line out of bounds");
            let from = span.start.max(line_start) - line_start;
            let to = (span.end.min(line_start + line_str.len()) - line_start).max(from);

            let offset = str_width(&line_str[..from]);
            let width = str_width(&line_str[from..to]).max(1);

            self.draw_gutter(None, line_num_width)?;
            self.stream.set_color(self.snippet_color(snippet.kind))?;

            write!(self.stream, "{:<offset$}", "")?;
            write!(self.stream, "{}", self.config.underline.repeat(width))?;

            if line == last_line {
                write!(self.stream, "{}{}", self.config.underline_after, snippet.label)?;
            }

            self.stream.reset()?;
            writeln!(self.stream)?;
        }

        Ok(())
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line {
            Some(line) => write!(self.stream, "{line:>line_num_width$}")?,
            None => write!(self.stream, "{:>line_num_width$}", "")?,
        }

        write!(self.stream, " {} ", self.config.gutter)?;
        self.stream.reset()
    }

    fn primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.severity {
            Severity::Warning => &self.config.warning_color,
            Severity::Error => &self.config.error_color,
        }
    }

    fn snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}
