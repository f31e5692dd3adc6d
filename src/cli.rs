//! Command-line arguments for the `rbstep` binary.

use clap::Parser;

/// Print the step trace of every insert into a red-black tree.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "rbstep", version)]
#[command(about = "Insert integers into an empty red-black tree and print every fixup step")]
#[command(after_help = r#"Environment:
  RBSTEP_CONFIG              Configuration file (layered above --config)
  RBSTEP__TRACE__MAX_STEPS   Override any configuration key, e.g. RBSTEP__OUTPUT__FORMAT=json
  RBSTEP_LOG                 Log filter (default: info)"#)]
pub struct CliArgs {
    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Values to insert, in order
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    pub values: Vec<i64>,
}
