//! Interpreter backend built on `nickel-lang-core`
//!
//! Every call builds a fresh [`Program`], so no state survives from one call
//! to the next and a `NickelInterpreter` only carries its settings.

use std::io::{self, Cursor, Write};

use nickel_lang_core::error::Error as NickelError;
use nickel_lang_core::eval::cache::lazy::CBNCache;
use nickel_lang_core::program::Program;
use nickel_lang_core::serialize::{self, ExportFormat};
use nickel_lang_core::typecheck::TypecheckMode as NickelTypecheckMode;

use crate::config::{Config, TraceTarget, TypecheckMode};
use crate::error::{bounded_debug, bounded_display, Error, Result};
use crate::interpreter::{Interpreter, Source};

/// Version of the pinned `nickel-lang-core` release
pub const NICKEL_VERSION: &str = "0.10.0";

type NickelProgram = Program<CBNCache>;

/// The Nickel interpreter
#[derive(Debug, Clone)]
pub struct NickelInterpreter {
    typecheck_mode: TypecheckMode,
    trace: TraceTarget,
    max_diagnostic_len: usize,
}

impl NickelInterpreter {
    pub fn new(config: &Config) -> Self {
        Self {
            typecheck_mode: config.typecheck_mode,
            trace: config.trace,
            max_diagnostic_len: config.max_diagnostic_len,
        }
    }

    fn program(&self, source: &Source<'_>) -> Result<NickelProgram> {
        // The program owns a copy of the text, nothing borrowed outlives the call
        let text = Cursor::new(source.text.as_bytes().to_vec());
        let trace: Box<dyn Write> = match self.trace {
            TraceTarget::Stderr => Box::new(io::stderr()),
            TraceTarget::Discard => Box::new(io::sink()),
        };

        NickelProgram::new_from_source(text, source.name.to_string(), trace)
            .map_err(|e| Error::internal(format!("failed to load source: {}", e)))
    }

    /// Classify `error` and render it with Nickel's own reporter
    ///
    /// The program has to stay alive until here: the report resolves spans
    /// against the files it loaded.
    fn convert_error(&self, program: &mut NickelProgram, error: NickelError) -> Error {
        let build: fn(String) -> Error = match &error {
            NickelError::ParseErrors { .. } => Error::parse,
            NickelError::TypecheckError { .. } => Error::typecheck,
            NickelError::EvalError { .. } => Error::evaluation,
            NickelError::ImportError { .. } => Error::import,
            NickelError::ExportError { .. } => Error::serialization,
            _ => Error::internal,
        };

        let fallback = bounded_debug(&error, self.max_diagnostic_len);
        let report = program.report_as_str(error);
        let message = if report.trim().is_empty() {
            fallback
        } else {
            bounded_display(&report.trim_end(), self.max_diagnostic_len)
        };

        build(message)
    }
}

impl Interpreter for NickelInterpreter {
    fn name(&self) -> &str {
        "nickel"
    }

    fn version(&self) -> &'static str {
        NICKEL_VERSION
    }

    fn evaluate(&self, source: &Source<'_>) -> Result<String> {
        let mut program = self.program(source)?;
        let value = match program.eval_full_for_export() {
            Ok(value) => value,
            Err(e) => return Err(self.convert_error(&mut program, e)),
        };

        if let Err(e) = serialize::validate(ExportFormat::Json, &value) {
            return Err(self.convert_error(&mut program, NickelError::from(e)));
        }
        serialize::to_string(ExportFormat::Json, &value)
            .map_err(|e| self.convert_error(&mut program, NickelError::from(e)))
    }

    fn typecheck(&self, source: &Source<'_>) -> Result<()> {
        let mut program = self.program(source)?;
        let mode = match self.typecheck_mode {
            TypecheckMode::Walk => NickelTypecheckMode::Walk,
            TypecheckMode::Enforce => NickelTypecheckMode::Enforce,
        };

        match program.typecheck(mode) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.convert_error(&mut program, e)),
        }
    }
}
