use std::fmt::Write as _;
use std::path::PathBuf;

use av_diagnostic::sources::Source as _;
use av_frontend::ast::Program;
use av_frontend::printer::print_program;
use av_session::diagnostics::{DiagnosticEmitter, IntoDiagnostic};
use av_session::sourcemap::{Source, SourceId};
use av_session::Session;
use tracing::{debug, instrument};

use crate::cli::Input;
use crate::{CompilerError, CompilerResult};

pub struct Compiler<D: DiagnosticEmitter> {
    pub session: Session<D>,
}

impl<D: DiagnosticEmitter> Compiler<D> {
    pub fn new(diagnostics: D) -> Self {
        Self {
            session: Session::new(diagnostics),
        }
    }

    pub fn add_source(&mut self, name: impl Into<String>, source: impl Into<String>) -> SourceId {
        self.session.sources.insert(Source::new(name, source))
    }

    /// Load a command line input, reading it from disk unless it is inline
    /// source text.
    pub fn load(&mut self, input: Input) -> CompilerResult<SourceId> {
        if input.source {
            return Ok(self.add_source("<unnamed>", input.input));
        }

        let source = std::fs::read_to_string(&input.input)?;
        let path = PathBuf::from(&input.input);

        Ok(self
            .session
            .sources
            .insert(Source::with_path(input.input, path, source)))
    }

    /// One line per token, end of file included.
    #[instrument(level = "debug", skip(self))]
    pub fn dump_tokens(&mut self, source_id: SourceId) -> CompilerResult<String> {
        let dump = av_frontend::lex(self.session.sources[source_id].source_str()).map(|tokens| {
            tokens.fold(String::new(), |mut out, token| {
                let _ = writeln!(out, "{token}");
                out
            })
        });

        match dump {
            Ok(dump) => Ok(dump),
            Err(err) => self.fail(err, source_id),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn parse(&mut self, source_id: SourceId) -> CompilerResult<Program> {
        let program = av_frontend::parse_source(self.session.sources[source_id].source_str());

        match program {
            Ok(program) => {
                debug!(items = program.items.len(), "parsed");
                Ok(program)
            }
            Err(err) => self.fail(err, source_id),
        }
    }

    pub fn print_ast(&mut self, source_id: SourceId) -> CompilerResult<String> {
        let program = self.parse(source_id)?;
        Ok(print_program(&program))
    }

    fn fail<T>(&mut self, err: impl IntoDiagnostic<SourceId>, source_id: SourceId) -> CompilerResult<T> {
        self.session.report(err, source_id)?;
        Err(CompilerError::HadErrors)
    }
}
