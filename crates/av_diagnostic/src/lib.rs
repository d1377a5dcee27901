mod render;
pub mod sources;
pub mod span;

use std::fmt;

pub use termcolor;
use termcolor::{Color, ColorSpec};

use self::sources::Sources;
use self::span::{AsSpan, Span};

/// A message about a source, optionally pointing at parts of it.
pub struct Diagnostic<S: Sources> {
    pub severity: Severity,

    pub message: Option<String>,
    pub id: Option<String>,

    pub snippets: Vec<Snippet<S>>,
}

impl<S: Sources> Diagnostic<S> {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            message: None,
            id: None,
            snippets: vec![],
        }
    }

    pub fn warning() -> Self {
        Self::new(Severity::Warning)
    }

    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: Snippet<S>) -> Self {
        self.snippets.push(snippet);
        self
    }
}

impl<S: Sources> fmt::Debug for Diagnostic<S>
where
    S::SourceId: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("severity", &self.severity)
            .field("message", &self.message)
            .field("id", &self.id)
            .field("snippets", &self.snippets)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

pub struct Snippet<S: Sources> {
    pub label: String,
    pub kind: SnippetKind,

    pub source_id: S::SourceId,
    pub span: Span,
}

impl<S: Sources> Snippet<S> {
    pub fn new(
        kind: SnippetKind,
        label: impl Into<String>,
        source_id: S::SourceId,
        span: impl AsSpan,
    ) -> Self {
        Self {
            label: label.into(),
            kind,

            source_id,
            span: span.as_span(),
        }
    }

    pub fn primary(label: impl Into<String>, source_id: S::SourceId, span: impl AsSpan) -> Self {
        Self::new(SnippetKind::Primary, label, source_id, span)
    }

    pub fn secondary(label: impl Into<String>, source_id: S::SourceId, span: impl AsSpan) -> Self {
        Self::new(SnippetKind::Secondary, label, source_id, span)
    }
}

impl<S: Sources> fmt::Debug for Snippet<S>
where
    S::SourceId: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Snippet")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("source_id", &self.source_id)
            .field("span", &self.span)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnippetKind {
    Primary,
    Secondary,
}

/// Colours and glyphs used when rendering diagnostics.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lines of source shown around each snippet.
    pub context_size: usize,

    pub error_color: ColorSpec,
    pub warning_color: ColorSpec,

    pub emphasis: ColorSpec,
    pub subtle: ColorSpec,

    pub gutter: &'static str,
    pub underline: &'static str,
    pub underline_after: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        let mut error_color = ColorSpec::new();
        error_color.set_fg(Some(Color::Red));
        error_color.set_bold(true);

        let mut warning_color = ColorSpec::new();
        warning_color.set_fg(Some(Color::Yellow));
        warning_color.set_bold(true);

        let mut subtle = ColorSpec::new();
        subtle.set_dimmed(true);

        let mut emphasis = ColorSpec::new();
        emphasis.set_fg(Some(Color::Blue));
        emphasis.set_bold(true);

        Self {
            context_size: 1,

            error_color,
            warning_color,
            emphasis,
            subtle,

            gutter: "│",
            underline: "^",
            underline_after: " ",
        }
    }
}
