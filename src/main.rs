mod aggregate;
mod data_loader;
mod error;
mod gameweek_input;
mod report;
mod util;
mod window_context;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use aggregate::*;
use data_loader::*;
use error::WindowError;
use gameweek_input::*;
use report::*;
use window_context::*;

/*
    Averages a player's stats over the gameweeks leading up to the current one.
    Files live in <data-root>/<year>/gws/gwN.csv, one per gameweek, and row N is assumed to be
    the same player in every file.
*/

#[derive(Parser, Debug)]
#[command(author, version, about = "Average per-gameweek stats over the previous few gameweeks")]
pub struct Args {
    /// PL season year, used as the folder name under the data root
    #[arg(long, default_value = "2018-19")]
    pub year: String,

    /// Number of previous GWs to consider
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub buffer: u32,

    /// Current GW. Asked for interactively when left out
    #[arg(long)]
    pub gw: Option<String>,

    #[arg(long, default_value = "./data")]
    pub data_root: PathBuf,

    /// How many averaged rows to print
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let ctx = WindowContext::from_args(&args);

    let gw = match &args.gw {
        Some(raw) => validate_gameweek(raw, &ctx).unwrap_or_else(|e| {
            Args::command()
                .error(ErrorKind::ValueValidation, format!("--gw {raw}: {e}"))
                .exit()
        }),
        None => prompt_gameweek(&mut io::stdin().lock(), &mut io::stdout(), &ctx)
            .context("Failed to read the current gameweek")?,
    };

    let result = match average_window(&ctx, gw) {
        Ok(result) => result,
        Err(WindowError::SeasonNotFound(dir)) => {
            debug!(dir = %dir.display(), "season folder missing");
            println!("{}", WindowError::SeasonNotFound(dir));
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    output_report(&result, ctx.preview_rows)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// Locate the season, load gw - buffer ..= gw - 1 and average them by row position
pub fn average_window(ctx: &WindowContext, gw: u32) -> Result<AggregateTable, WindowError> {
    let dataset = SeasonDataset::locate(ctx)?;
    let window = GameweekWindow::new(gw, ctx.buffer);

    info!(season = %dataset.season, current = gw, buffer = ctx.buffer, "averaging gameweek window");
    debug!(files = ?window.paths(&dataset), "window files");

    let tables = load_window(&dataset, &window)?;
    let result = aggregate_window(&tables);

    let partial_rows = result.rows.iter().filter(|r| r.contributors < tables.len()).count();
    if partial_rows > 0 {
        warn!(partial_rows, "some rows are missing from part of the window, their averages use fewer gameweeks");
    }

    Ok(result)
}
