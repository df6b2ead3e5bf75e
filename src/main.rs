//! Calendar grid CLI application.
//!
//! # Usage
//! ```ignore
//! calgrid                 // Current month
//! calgrid 2026            // Year 2026, current month
//! calgrid 1 2022          // January 2022
//! calgrid -y -f           // Whole year, framed
//! calgrid -i months.json  // Months read from JSON
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};

use calgrid::Calendar;
use calgrid::args::{Args, get_display_date};
use calgrid::calendar::read_months;
use calgrid::formatter::{format_months, format_year_title, print_lines};
use calgrid::types::{GridContext, MonthBlock};

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("calgrid: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let ctx = GridContext::new(args)?;

    let months = match &args.input {
        Some(path) => load_months(path)?,
        None => ctx.generate_months(&args.month_range()?)?,
    };

    let mut calendar = Calendar::new(&months, ctx.leading, |date: &str| {
        println!("selected {}", date);
    })?;

    if let Some(date) = &args.select {
        if !calendar.press_date(date) {
            bail!("No day {} in the displayed months", date);
        }
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(calendar.grids())?);
        return Ok(());
    }

    if args.year && args.input.is_none() {
        let (year, _) = get_display_date(args)?;
        println!("{}", format_year_title(&ctx, year));
        println!();
    }
    print_lines(&format_months(&ctx, calendar.grids()));

    Ok(())
}

fn load_months(path: &Path) -> Result<Vec<MonthBlock>> {
    if path.as_os_str() == "-" {
        log::info!("reading months from stdin");
        return read_months(std::io::stdin().lock()).context("Invalid months JSON on stdin");
    }

    log::info!("reading months from {}", path.display());
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    read_months(BufReader::new(file))
        .with_context(|| format!("Invalid months JSON in {}", path.display()))
}
