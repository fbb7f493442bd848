use std::io::{self, Write};

use anyhow::Context;

use crate::{
    config::{FatalPolicy, RunConfig},
    dump,
    fixture::{Fixture, Materializer},
    power::power,
    resource::ResourceTable,
    value::Value,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub iterations: usize,
    pub warnings: usize,
    pub fatals: usize,
    pub halted: bool,
}

/// Acquire the fixture's values, report every operand, then release the
/// fixture's resources.
pub fn run<W>(fixture: &Fixture, config: &RunConfig, out: &mut W) -> anyhow::Result<Summary>
where
    W: Write,
{
    let mut resources = ResourceTable::new();
    let mut materializer = Materializer::new(&mut resources, fixture.resource_root());
    let base = match config.base.as_ref().or_else(|| fixture.base.as_ref()) {
        Some(literal) => materializer
            .value(literal)
            .context("Unable to build the base")?,
        None => Value::Float(RunConfig::DEFAULT_BASE),
    };
    let mut operands = Vec::with_capacity(fixture.operands.len());
    for (i, literal) in fixture.operands.iter().enumerate() {
        let value = materializer
            .value(literal)
            .with_context(|| format!("Unable to build operand {}", i + 1))?;
        operands.push(value);
    }
    log::debug!(
        "acquired {} operands and {} resources",
        operands.len(),
        resources.len()
    );
    let summary = report(&base, &operands, config, out)?;
    log::info!(
        "{} iterations, {} warnings, {} fatal{}",
        summary.iterations,
        summary.warnings,
        summary.fatals,
        if summary.halted { ", halted" } else { "" }
    );
    Ok(summary)
}

/// Write one framed block per operand, then the completion marker unless a
/// fatal outcome halted the run.
pub fn report<W>(
    base: &Value,
    operands: &[Value],
    config: &RunConfig,
    out: &mut W,
) -> io::Result<Summary>
where
    W: Write,
{
    let mut summary = Summary::default();
    for (i, operand) in operands.iter().enumerate() {
        let iteration = i + 1;
        writeln!(out, "\n-- Iteration {} --", iteration)?;
        let outcome = power(base, operand);
        write!(out, "{}", dump::outcome(&outcome))?;
        summary.iterations += 1;
        summary.warnings += outcome.warnings.len();
        for warning in &outcome.warnings {
            log::debug!("iteration {}: {}", iteration, warning);
        }
        if let Err(kind) = outcome.result {
            summary.fatals += 1;
            log::warn!(
                "iteration {}: {} ({} ** {})",
                iteration,
                kind,
                base.kind(),
                operand.kind()
            );
            if config.on_fatal == FatalPolicy::Halt {
                summary.halted = true;
                break;
            }
        }
    }
    if !summary.halted {
        writeln!(out, "{}", config.completion_marker)?;
    }
    Ok(summary)
}
