//! Command-line argument parsing using clap.
//!
//! Positional arguments follow util-linux cal convention: `[[month] year]`

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use chrono::Datelike;
use clap::{Parser, ValueHint};

use crate::calendar::month_sequence;
use crate::types::{
    COLOR_ENABLED_BY_DEFAULT, ColumnsMode, GUTTER_WIDTH_REGULAR, GUTTER_WIDTH_YEAR, GridContext,
    LeadingPolicy,
};

#[derive(Parser, Debug)]
#[command(name = "calgrid")]
#[command(about = "Lays out months as padded Monday-first grids", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Read months from a JSON file ("-" for stdin) instead of generating them.
    #[arg(
        short = 'i',
        long,
        help_heading = "Input options",
        value_name = "file",
        value_hint = ValueHint::FilePath
    )]
    pub input: Option<PathBuf>,

    /// Include days of adjacent months in generated months.
    #[arg(short = 'a', long, help_heading = "Input options")]
    pub adjacent: bool,

    /// Placement of supplied days before the first current-month day.
    #[arg(
        long,
        default_value = "reconcile",
        help_heading = "Grid options",
        value_name = "policy"
    )]
    pub leading: LeadingPolicy,

    /// Display whole year.
    #[arg(short = 'y', long, help_heading = "Display options")]
    pub year: bool,

    /// Display three months (previous, current, next).
    #[arg(short = '3', long = "three", help_heading = "Display options")]
    pub three_months: bool,

    /// Number of months to display.
    #[arg(
        short = 'n',
        long = "months",
        help_heading = "Display options",
        value_name = "num"
    )]
    pub months_count: Option<u32>,

    /// Center the month range around the requested month.
    #[arg(short = 'S', long = "span", help_heading = "Display options")]
    pub span: bool,

    /// Month (1-12 or name), or year when given alone as four digits.
    #[arg(index = 1, value_name = "month", value_hint = ValueHint::Other)]
    pub first_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 2, value_name = "year", value_hint = ValueHint::Other)]
    pub second_arg: Option<String>,

    /// Draw a frame around each month's days.
    #[arg(short = 'f', long, help_heading = "Output options")]
    pub frame: bool,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub no_color: bool,

    /// Number of columns for multiple months (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "columns",
        help_heading = "Output options",
        value_name = "width"
    )]
    pub columns: Option<String>,

    /// Print the built grids as JSON.
    #[arg(long, help_heading = "Output options")]
    pub json: bool,

    /// Press the day with this date and print "selected <date>" instead of the grids.
    #[arg(
        long,
        help_heading = "Output options",
        value_name = "YYYY-MM-DD",
        conflicts_with = "json"
    )]
    pub select: Option<String>,
}

const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Months in the whole supported year range.
const MAX_MONTHS: u32 = 9999 * 12;

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Lay out calendar months as 7-column grids, Monday first.

Without any arguments, display the current month.

Examples:
  calgrid                  Display current month
  calgrid -3 -a            Three months with adjacent days
  calgrid -y -f            The whole year, framed
  calgrid 1 2022           Display January 2022
  calgrid -i months.json   Lay out months read from JSON
  calgrid --json 2 2026    February 2026 as JSON cells";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Months to generate, in display order.
    pub fn month_range(&self) -> Result<Vec<(i32, u32)>> {
        let (year, month) = get_display_date(self)?;

        let months = if self.year {
            month_sequence(year, 1, 12, false)
        } else if self.three_months {
            month_sequence(year, month, 3, true)
        } else {
            match self.months_count {
                Some(0) => bail!("Number of months must be positive"),
                Some(count) if count > MAX_MONTHS => {
                    bail!("Number of months must be at most {}", MAX_MONTHS)
                }
                Some(count) => month_sequence(year, month, count, self.span),
                None => vec![(year, month)],
            }
        };

        if let Some(&(year, _)) = months.iter().find(|(year, _)| !YEAR_RANGE.contains(year)) {
            bail!("Month range reaches year {} (must be 1-9999)", year);
        }
        Ok(months)
    }
}

impl GridContext {
    pub fn new(args: &Args) -> Result<Self> {
        let today = get_today_date();

        let color =
            !args.no_color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        let columns = match args.columns.as_deref() {
            Some("auto") => ColumnsMode::Auto,
            // A year reads best as four rows of three
            None if args.year => ColumnsMode::Fixed(3),
            None => ColumnsMode::Auto,
            Some(s) => {
                let n = s
                    .parse::<u32>()
                    .map_err(|_| anyhow!("Invalid columns value: {}", s))?;
                if n == 0 {
                    bail!("Columns must be positive");
                }
                ColumnsMode::Fixed(n)
            }
        };

        // Prevent conflicting display modes
        let mode_count = [args.year, args.three_months, args.months_count.is_some()]
            .iter()
            .filter(|&&x| x)
            .count();
        if mode_count > 1 {
            bail!("Options -y, -3, and -n are mutually exclusive");
        }

        let gutter_width = if args.year {
            GUTTER_WIDTH_YEAR
        } else {
            GUTTER_WIDTH_REGULAR
        };

        Ok(GridContext {
            leading: args.leading,
            adjacent: args.adjacent,
            color,
            frame: args.frame,
            today,
            // The year title already names the year
            show_year_in_header: !args.year,
            gutter_width,
            columns,
        })
    }
}

/// Get today's date, respecting CALGRID_TEST_TIME environment variable for testing.
pub fn get_today_date() -> chrono::NaiveDate {
    if let Ok(test_time) = std::env::var("CALGRID_TEST_TIME")
        && let Ok(date) = chrono::NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

fn parse_year(s: &str) -> Result<i32> {
    let year = s
        .parse::<i32>()
        .map_err(|_| anyhow!("Invalid year: {}", s))?;
    if !YEAR_RANGE.contains(&year) {
        bail!("Invalid year: {} (must be 1-9999)", year);
    }
    Ok(year)
}

/// Calculate display month from positional arguments.
///
/// Argument patterns:
/// - no args: current month
/// - 1 arg: year (4 digits) or month (number or name)
/// - 2 args: month year
pub fn get_display_date(args: &Args) -> Result<(i32, u32)> {
    let today = get_today_date();

    match (args.first_arg.as_deref(), args.second_arg.as_deref()) {
        (None, _) => Ok((today.year(), today.month())),
        (Some(val), None) => {
            if let Ok(num) = val.parse::<i32>()
                && (1000..=9999).contains(&num)
            {
                return Ok((num, today.month()));
            }
            crate::formatter::parse_month(val)
                .map(|month| (today.year(), month))
                .ok_or_else(|| anyhow!("Invalid argument: {}", val))
        }
        (Some(month), Some(year)) => {
            let month = crate::formatter::parse_month(month)
                .ok_or_else(|| anyhow!("Invalid month: {}", month))?;
            Ok((parse_year(year)?, month))
        }
    }
}
