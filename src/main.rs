use clap::{Parser, builder::styling};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tabmerge::{ExitStatus, LogSink, RunArgs};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

const EXAMPLES: &str = r#"Examples:
  # Basic merge
  tabmerge --inputs a.csv b.csv --output merged.csv

  # Merge with column selection and rename
  tabmerge --inputs data/*.csv --output result.xlsx \
    --select "id,name,amount" --rename "name:client,amount:value"

  # With required column validation
  tabmerge --inputs *.csv --output clean.csv --required "id,email"

Exit codes: 0 success, 1 execution failure, 2 validation failure"#;

/// CSV/Excel automation: merge, select, rename, validate.
#[derive(Parser)]
#[command(name = "tabmerge", version, styles = STYLES, after_help = EXAMPLES)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// More verbose logging
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    log::debug!("tabmerge {}", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Merging {} file(s) into {}",
        cli.run.inputs.len().cyan(),
        cli.run.output.display().bright_black()
    );

    let status = tabmerge::cli::run(&cli.run, &LogSink);
    if status != ExitStatus::Success {
        log::debug!("Exiting with status {}", status.code().red());
    }
    status.into()
}
