use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "svec")]
#[command(version, about = "Runs operation scripts against a DynamicArray", long_about = None)]
pub struct Cli {
    /// The .svec script file to run
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Run the built-in scenario suite
    #[arg(short, long)]
    pub test: bool,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Maximum log level for the given number of `-v` flags.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
