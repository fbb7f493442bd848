use std::{io, path::PathBuf, process::exit};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use powcoerce::{
    coerce,
    config::{FatalPolicy, RunConfig},
    dump,
    fixture::{self, Fixture, Literal, Materializer},
    numeric, power,
    resource::ResourceTable,
    runner, Value,
};

/// Exit status of a run halted by a fatal outcome
const FATAL_EXIT: i32 = 255;

fn main() {
    color_backtrace::install();
    pretty_env_logger::init();

    match App::parse().execute() {
        Ok(0) => {}
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            exit(1)
        }
    }
}

#[derive(Parser)]
#[clap(about = "Numeric coercion for exponentiation operands")]
enum App {
    /// Raise the base to every operand of a fixture
    #[clap(alias = "r")]
    Run {
        /// Fixture file, the built-in pow variations if omitted
        fixture: Option<PathBuf>,
        /// Base literal, overriding the fixture's
        #[clap(long)]
        base: Option<String>,
        /// What a fatal outcome does to the run: continue or halt
        #[clap(long, default_value = "continue")]
        on_fatal: FatalPolicy,
    },
    /// Show how a single literal coerces
    #[clap(alias = "c")]
    Coerce { literal: String },
    /// Raise one literal to the power of another
    #[clap(alias = "p")]
    Pow { base: String, exp: String },
    /// Dump the operands of a fixture
    #[clap(alias = "i")]
    Inputs { fixture: Option<PathBuf> },
}

impl App {
    /// Returns the exit status. Resources are released before it is used.
    fn execute(self) -> anyhow::Result<i32> {
        match self {
            App::Run {
                fixture,
                base,
                on_fatal,
            } => {
                let fixture = load(fixture)?;
                #[cfg(feature = "debug")]
                println!("{:#?}", fixture);
                let config = RunConfig {
                    base: base.as_deref().map(literal).transpose()?,
                    on_fatal,
                    ..RunConfig::default()
                };
                let summary = runner::run(&fixture, &config, &mut io::stdout().lock())?;
                if summary.halted {
                    eprintln!(
                        "{}",
                        format!("Run halted after iteration {}", summary.iterations).red()
                    );
                    return Ok(FATAL_EXIT);
                }
            }
            App::Coerce { literal: input } => {
                let mut resources = ResourceTable::new();
                let value = Materializer::new(&mut resources, ".").value(&literal(&input)?)?;
                print!("{}", dump::value(&value));
                if let Value::Str(bytes) = &value {
                    if !numeric::is_numeric(bytes) {
                        eprintln!("{}", "note: not a numeric string, leading prefix used".yellow());
                    }
                }
                print!("{}", dump::coercion(&coerce(&value)));
            }
            App::Pow { base, exp } => {
                let mut resources = ResourceTable::new();
                let mut materializer = Materializer::new(&mut resources, ".");
                let base = materializer.value(&literal(&base)?)?;
                let exp = materializer.value(&literal(&exp)?)?;
                let outcome = power(&base, &exp);
                print!("{}", dump::outcome(&outcome));
                if outcome.is_fatal() {
                    return Ok(FATAL_EXIT);
                }
            }
            App::Inputs { fixture } => {
                let fixture = load(fixture)?;
                let mut resources = ResourceTable::new();
                let mut materializer = Materializer::new(&mut resources, fixture.resource_root());
                for (i, literal) in fixture.operands.iter().enumerate() {
                    println!("-- Operand {} --", i + 1);
                    print!("{}", dump::value(&materializer.value(literal)?));
                }
            }
        }
        Ok(0)
    }
}

fn load(path: Option<PathBuf>) -> anyhow::Result<Fixture> {
    match path {
        Some(path) => Fixture::load(path),
        None => Fixture::builtin().context("Invalid built-in fixture"),
    }
}

fn literal(input: &str) -> anyhow::Result<Literal> {
    fixture::parse_literal(input).with_context(|| format!("Invalid literal {:?}", input))
}
