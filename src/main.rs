use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uniconv::config::Config;
use uniconv::converter::MAX_FRACTIONAL_PLACES;
use uniconv::session::State;
use uniconv::{table, term_frontend, Converter};

#[derive(Parser)]
#[command(about = "Convert between unit expressions using a table of ratios")]
pub struct Args {
    /// CSV file of `from,to,ratio` rows (defaults to the configured table)
    table: Option<String>,
    /// Expression to convert from; requires --to
    #[arg(short, long, requires = "to")]
    from: Option<String>,
    /// Expression to convert to; requires --from
    #[arg(short, long, requires = "from")]
    to: Option<String>,
    /// Fractional digits in results
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(..=MAX_FRACTIONAL_PLACES as i64)
    )]
    places: Option<u32>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let config = Config::load();

    let table_path = args
        .table
        .or(config.table)
        .context("no ratio table given and none configured")?;
    let edges = table::load(&table_path)
        .with_context(|| format!("failed to load ratio table {table_path}"))?;
    let converter = Converter::new(edges)
        .with_fractional_places(args.places.unwrap_or(config.fractional_places));

    match (args.from, args.to) {
        (Some(from), Some(to)) => Ok(convert_once(&converter, &from, &to)),
        _ => {
            term_frontend::crossterm_main(State::new(converter, Some(table_path)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn convert_once(converter: &Converter, from: &str, to: &str) -> ExitCode {
    match converter.convert(from, to) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
