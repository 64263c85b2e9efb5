//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::HashMap;

use nickel_shim_core::{Config, Context, Error, Interpreter, Result, Source};

/// Interpreter answering from a fixed table of programs
///
/// Programs missing from the table fail to parse; programs mapped to `None`
/// parse but fail at runtime.
#[derive(Default)]
pub struct ScriptedInterpreter {
    programs: HashMap<String, Option<String>>,
    ill_typed: Vec<String>,
}

impl ScriptedInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, text: &str, json: &str) -> Self {
        self.programs.insert(text.to_string(), Some(json.to_string()));
        self
    }

    pub fn with_runtime_error(mut self, text: &str) -> Self {
        self.programs.insert(text.to_string(), None);
        self
    }

    pub fn with_type_error(mut self, text: &str) -> Self {
        self.ill_typed.push(text.to_string());
        self
    }
}

impl Interpreter for ScriptedInterpreter {
    fn name(&self) -> &str {
        "scripted"
    }

    fn version(&self) -> &'static str {
        "test"
    }

    fn evaluate(&self, source: &Source<'_>) -> Result<String> {
        if self.ill_typed.iter().any(|t| t == source.text) {
            return Err(Error::typecheck(format!("{}: ill-typed", source.name)));
        }
        match self.programs.get(source.text) {
            Some(Some(json)) => Ok(json.clone()),
            Some(None) => Err(Error::evaluation(format!("{}: runtime failure", source.name))),
            None => Err(Error::parse(format!("{}: unexpected token", source.name))),
        }
    }

    fn typecheck(&self, source: &Source<'_>) -> Result<()> {
        if self.ill_typed.iter().any(|t| t == source.text) {
            return Err(Error::typecheck(format!("{}: ill-typed", source.name)));
        }
        if self.programs.contains_key(source.text) {
            Ok(())
        } else {
            Err(Error::parse(format!("{}: unexpected token", source.name)))
        }
    }
}

pub fn scripted_context(interpreter: ScriptedInterpreter) -> Context {
    Context::with_interpreter(Config::default(), Box::new(interpreter)).unwrap()
}
