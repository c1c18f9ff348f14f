use anyhow::Context;
use clap::Parser;
use scanplate::cli::Cli;
use scanplate::output::Output;
use scanplate::runner::{run_inputs, split_lines, InputResult};
use scanplate::{init_tracing, MatchOptions, Scanner};
use std::io::Read;

fn main() -> anyhow::Result<()> {
    // Reset SIGPIPE handler to default (terminate) so piping to head/tail works correctly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let use_color = !cli.no_color && atty::is(atty::Stream::Stderr);
    let mut output = Output::new(use_color);

    let mut options = MatchOptions::new();
    if let Some(max_steps) = cli.max_steps {
        options = options.with_max_steps(max_steps);
    }

    let scanner = match Scanner::with_options(&cli.template, options) {
        Ok(scanner) => scanner,
        Err(err) => {
            output.print_template_error(&cli.template, &err)?;
            output.flush()?;
            std::process::exit(2);
        }
    };

    if cli.explain {
        output.print_explain(scanner.template())?;
        output.flush()?;
        return Ok(());
    }

    let inputs = read_inputs(&cli)?;
    let results = run_inputs(&scanner, &inputs, cli.sequential);

    for result in &results {
        output.print_result(result)?;
    }
    output.print_summary(&results)?;
    output.flush()?;

    let all_matched = results.iter().all(InputResult::matched);
    std::process::exit(if all_matched { 0 } else { 1 });
}

fn read_inputs(cli: &Cli) -> anyhow::Result<Vec<String>> {
    if !cli.inputs.is_empty() {
        return Ok(cli.inputs.clone());
    }

    let content = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file '{}'", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read inputs from stdin")?;
            buffer
        }
    };
    Ok(split_lines(&content))
}
