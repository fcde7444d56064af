use std::path::PathBuf;

use clap::Parser;

/// CLI arguments for the `sv-elab` binary.
#[derive(Parser, Debug)]
#[command(
    name = "sv-elab",
    version,
    about = "Elaborates SystemVerilog source files and reports diagnostics"
)]
pub struct CliArgs {
    /// Source files to compile into a single compilation.
    pub files: Vec<PathBuf>,

    /// Print the resolved top-level instance names after elaboration.
    #[arg(long)]
    pub list_top: bool,

    /// Suppress non-error diagnostics (notes, warnings) from output.
    #[arg(long)]
    pub errors_only: bool,
}
