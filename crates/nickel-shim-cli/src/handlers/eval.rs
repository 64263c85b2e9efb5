//! Eval command handler

use super::utils::{engine_config, read_input};
use crate::cli::EvalArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use nickel_shim_core::{Context, TraceTarget};

/// Handle the eval command
pub fn handle_eval(args: EvalArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let input = read_input(&args.input)?;

    let mut engine = engine_config(&config.engine, &input);
    if args.no_trace {
        engine.trace = TraceTarget::Discard;
    }

    let mut context = Context::with_config(engine)?;
    tracing::info!(
        source = %context.config().source_name,
        interpreter = context.interpreter_name(),
        "Evaluating program"
    );

    let json = context.evaluate(&input.text)?;
    output.value(&json)
}
