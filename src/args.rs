use std::path::PathBuf;

use clap_derive::Parser;

/// The arguments to the program. Every argument has a default so that a bare
/// invocation reads `mayor_data.txt` and writes `elections.csv`, the same
/// fixed paths the dump and its consumers have always used.
#[derive(Parser)]
pub struct Args {
    /// The path to the election data dump.
    #[arg(default_value = "mayor_data.txt")]
    pub input: PathBuf,
    /// The path for the CSV summary.
    #[arg(short, long, default_value = "elections.csv")]
    pub output: PathBuf,
    /// A path to dump the parsed elections to as json.
    #[arg(long, default_value = None)]
    pub dump: Option<PathBuf>,
}
