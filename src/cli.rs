use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    #[arg(default_value = "grammar.txt")]
    pub file: PathBuf,
}
