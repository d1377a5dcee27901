use av_diagnostic::termcolor::{ColorChoice, StandardStream};

pub use av_diagnostic::*;

use crate::sourcemap::SourceMap;

pub mod prelude {
    pub use super::{Diagnostic, IntoDiagnostic};
    pub use crate::sourcemap::SourceId;
    pub use av_diagnostic::span::Span;
    pub use av_diagnostic::{Severity, Snippet, SnippetKind};
}

pub type Diagnostic = av_diagnostic::Diagnostic<SourceMap>;

/// Where finished diagnostics go.
pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _sources: &SourceMap) {
        self.push(diagnostic);
    }
}

#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl PrettyDiagnosticEmitter {
    pub fn new(color: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stderr(color),
            config: Config::default(),
        }
    }
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        if let Err(err) = diagnostic.write_to_stream(sources, &self.config, &mut self.stream) {
            tracing::error!("failed to emit diagnostic: {err}");
        }
    }
}

pub trait IntoDiagnostic<Context> {
    fn into_diagnostic(self, cx: Context) -> Diagnostic;
}

impl<Context> IntoDiagnostic<Context> for Diagnostic {
    fn into_diagnostic(self, _cx: Context) -> Diagnostic {
        self
    }
}
