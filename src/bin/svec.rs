use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::Path;
use svec::cli::Cli;
use svec::scenarios::SCENARIOS;
use svec::script::{self, describe};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    if cli.test {
        println!("Running scenario suite...");
        run_all_scenarios().context("Scenario suite failed")?;
        println!("All scenarios passed!");
    } else if let Some(file_path) = cli.file {
        run_script(&file_path).with_context(|| format!("Failed to run script: {:?}", file_path))?;
    } else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
    }

    Ok(())
}

fn run_script(path: &Path) -> Result<()> {
    // 1. Verify file existence and extension
    if !path.exists() {
        return Err(anyhow!("File not found: {:?}", path));
    }
    if path.extension().and_then(|s| s.to_str()) != Some("svec") {
        return Err(anyhow!("File must have .svec extension: {:?}", path));
    }

    // 2. Read source
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    // 3. Parse and execute
    let interpreter = script::run_script(&source)?;
    let (array, output) = interpreter.into_parts();
    for line in &output {
        println!("{}", line);
    }
    println!("Final state: {}", describe(&array));

    Ok(())
}

fn run_all_scenarios() -> Result<()> {
    let mut failed = 0;
    for scenario in SCENARIOS {
        match script::run_script(scenario.source) {
            Ok(interpreter) => {
                println!("{:<28} ok    {}", scenario.name, describe(interpreter.array()));
            }
            Err(err) => {
                failed += 1;
                println!("{:<28} FAIL  {}", scenario.name, err);
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} scenarios failed", failed, SCENARIOS.len());
    }
    Ok(())
}
