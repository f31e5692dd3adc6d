//! rbstep: print red-black tree insertion traces
//!
//! Inserts each value given on the command line into an empty tree and
//! prints every recorded step of every insert.
//!
//! ## Configuration
//! - `--config PATH` / RBSTEP_CONFIG: YAML file (see `rbstep.example.yaml`)
//! - RBSTEP__TRACE__ENABLED, RBSTEP__TRACE__MAX_STEPS: recorder settings
//! - RBSTEP__OUTPUT__FORMAT: `text` (default) or `json`
//! - RBSTEP_LOG: log filter, logs go to stderr

use std::io::{self, Write};

use clap::Parser;
use tracing::info;

use rbstep::cli::CliArgs;
use rbstep::report::{OutputFormat, TraceDisplay, TraceReport, TreeDisplay};
use rbstep::utils::bootstrap::init_tracing;
use rbstep::Config;
use rbstep_tree::RbTree;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = CliArgs::parse();

    let config = Config::load(args.config.as_deref())?;
    info!(
        values = args.values.len(),
        format = %config.output.format,
        max_steps = ?config.trace.max_steps,
        "rbstep started"
    );

    let mut tree = RbTree::with_recorder(config.trace);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for value in args.values {
        let trace = tree.insert(value);
        info!(value, steps = trace.len(), dropped = trace.dropped(), "inserted");

        match config.output.format {
            OutputFormat::Text => {
                writeln!(out, "== insert {value} ==")?;
                write!(out, "{}", TraceDisplay(&trace))?;
            }
            OutputFormat::Json => {
                writeln!(out, "{}", TraceReport::new(value, &trace).to_json()?)?;
            }
        }
    }

    if config.output.format == OutputFormat::Text && config.output.show_final_tree {
        writeln!(out, "== final tree ({} nodes) ==", tree.len())?;
        write!(out, "{}", TreeDisplay(tree.view()))?;
    }

    Ok(())
}
