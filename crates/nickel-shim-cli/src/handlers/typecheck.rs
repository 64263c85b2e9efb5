//! Typecheck command handler

use super::utils::{engine_config, read_input};
use crate::cli::{OutputFormat, TypecheckArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use nickel_shim_core::{Context, TypecheckMode};
use serde::Serialize;

#[derive(Serialize)]
struct TypecheckReport<'a> {
    source: &'a str,
    mode: TypecheckMode,
    well_typed: bool,
}

/// Handle the typecheck command
///
/// Ill-typed programs surface as errors, so reaching the report means the
/// program passed.
pub fn handle_typecheck(
    args: TypecheckArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let input = read_input(&args.input)?;

    let mut engine = engine_config(&config.engine, &input);
    if args.enforce {
        engine.typecheck_mode = TypecheckMode::Enforce;
    }

    let mut context = Context::with_config(engine)?;
    context.typecheck(&input.text)?;

    let report = TypecheckReport {
        source: &context.config().source_name,
        mode: context.config().typecheck_mode,
        well_typed: true,
    };

    if output.format() == OutputFormat::Human {
        output.success("ok")
    } else {
        output.data(&report)
    }
}
