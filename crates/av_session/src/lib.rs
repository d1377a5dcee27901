pub mod diagnostics;
pub mod sourcemap;

use diagnostics::{DiagnosticEmitter, IntoDiagnostic, Severity};
use sourcemap::SourceMap;

/// Returned once at least one error has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorsEmitted;

/// State shared by every stage of a compilation.
pub struct Session<D: DiagnosticEmitter> {
    pub sources: SourceMap,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(diagnostics: D) -> Self {
        Self {
            sources: SourceMap::default(),
            diagnostics,
        }
    }

    pub fn report<Context>(
        &mut self,
        diagnostic: impl IntoDiagnostic<Context>,
        cx: Context,
    ) -> Result<(), ErrorsEmitted>
    where
        Context: Copy,
    {
        self.report_all([diagnostic], cx)
    }

    pub fn report_all<Context, I>(&mut self, diagnostics: I, cx: Context) -> Result<(), ErrorsEmitted>
    where
        Context: Copy,
        I: IntoIterator,
        I::Item: IntoDiagnostic<Context>,
    {
        let mut had_error = false;

        for diagnostic in diagnostics {
            let diagnostic = diagnostic.into_diagnostic(cx);
            had_error |= diagnostic.severity >= Severity::Error;
            self.diagnostics.emit_diagnostic(diagnostic, &self.sources);
        }

        if had_error {
            Err(ErrorsEmitted)
        } else {
            Ok(())
        }
    }
}
