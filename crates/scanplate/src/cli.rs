use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scanplate",
    about = "Match text against a brace template and extract named fields",
    version
)]
pub struct Cli {
    /// Template such as "{name}: {age:u}"
    pub template: String,

    /// Inputs to match; when omitted, read one per line from --file or stdin
    pub inputs: Vec<String>,

    /// Read inputs from this file, one per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Give up on an input after trying this many candidate lengths
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Print the parsed template and exit
    #[arg(long)]
    pub explain: bool,

    /// Match inputs sequentially instead of in parallel
    #[arg(short, long)]
    pub sequential: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
