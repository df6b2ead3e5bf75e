//! Grid formatting for the terminal with localization and color support.

use chrono::{Locale, NaiveDate, Weekday};
use unicode_width::UnicodeWidthStr;

use crate::types::{
    COLOR_DIM, COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL, CellKind,
    Corners, GridCell, GridContext, MonthGrid, ROW_WIDTH,
};

/// Monday-first column order of the grid.
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Month name in nominative case for `locale`.
pub fn get_month_name(month: u32, locale: Locale) -> String {
    // %B gives the genitive form in some locales
    let standalone = match locale {
        Locale::ru_RU => Some([
            "Январь",
            "Февраль",
            "Март",
            "Апрель",
            "Май",
            "Июнь",
            "Июль",
            "Август",
            "Сентябрь",
            "Октябрь",
            "Ноябрь",
            "Декабрь",
        ]),
        Locale::uk_UA => Some([
            "Січень",
            "Лютий",
            "Березень",
            "Квітень",
            "Травень",
            "Червень",
            "Липень",
            "Серпень",
            "Вересень",
            "Жовтень",
            "Листопад",
            "Грудень",
        ]),
        _ => None,
    };

    match (standalone, NaiveDate::from_ymd_opt(2000, month, 1)) {
        (Some(names), Some(_)) => names[(month - 1) as usize].to_string(),
        (None, Some(date)) => date.format_localized("%B", locale).to_string(),
        (_, None) => month.to_string(),
    }
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    let s_lower = s.to_lowercase();
    let month_names: [(&str, u32); 23] = [
        ("january", 1),
        ("february", 2),
        ("march", 3),
        ("april", 4),
        ("may", 5),
        ("june", 6),
        ("july", 7),
        ("august", 8),
        ("september", 9),
        ("october", 10),
        ("november", 11),
        ("december", 12),
        ("jan", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("sep", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
    ];
    month_names
        .iter()
        .find(|(name, _)| *name == s_lower)
        .map(|(_, num)| *num)
}

/// Display width of `text`, ignoring ANSI escape sequences.
pub fn visible_width(text: &str) -> usize {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip to the end of the SGR sequence
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain.width()
}

/// Center text within a specified width, accounting for Unicode character widths.
pub fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Get 2-character weekday abbreviation for `locale`.
pub fn get_weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    NaiveDate::from_isoywd_opt(2000, 1, weekday)
        .map(|date| {
            date.format_localized("%a", locale)
                .to_string()
                .chars()
                .take(2)
                .collect()
        })
        .unwrap_or_default()
}

/// Format the grid title, centered over the month.
pub fn format_month_header(ctx: &GridContext, name: &str) -> String {
    let centered = center_text(name, ctx.month_width());
    if ctx.color {
        format!("{}{}{}", COLOR_TEAL, centered, COLOR_RESET)
    } else {
        centered
    }
}

/// Format weekday header row, Monday first.
pub fn format_weekday_headers(ctx: &GridContext, locale: Locale) -> String {
    let names: Vec<String> = WEEKDAY_ORDER
        .iter()
        .map(|&weekday| format!("{:>2}", get_weekday_short_name(weekday, locale)))
        .collect();
    let mut row = names.join(" ");

    if ctx.color {
        row = format!("{}{}{}", COLOR_SAND_YELLOW, row, COLOR_RESET);
    }
    if ctx.frame {
        row = format!(" {} ", row);
    }
    row
}

/// Format day cell with color highlighting.
///
/// Color priority: today > adjacent-month day > weekend > regular
pub fn format_day(ctx: &GridContext, cell: &GridCell) -> String {
    let CellKind::Day { record, day } = &cell.kind else {
        return "  ".to_string();
    };
    let day_str = format!("{:>2}", day);
    if !ctx.color {
        return day_str;
    }

    let color = if record.is_today {
        COLOR_REVERSE
    } else if !record.is_current_month {
        COLOR_DIM
    } else if cell.column >= 5 {
        COLOR_RED
    } else {
        return day_str;
    };
    format!("{}{}{}", color, day_str, COLOR_RESET)
}

/// Format one week of cells.
pub fn format_row(ctx: &GridContext, row: &[GridCell]) -> String {
    let days: Vec<String> = row.iter().map(|cell| format_day(ctx, cell)).collect();
    let line = days.join(" ");
    if ctx.frame {
        format!("│{}│", line)
    } else {
        line
    }
}

/// Top and bottom frame borders, rounded where a cell carries the corner flag.
fn frame_borders(grid: &MonthGrid) -> (String, String) {
    let has = |flag: fn(&Corners) -> bool| grid.cells.iter().any(|cell| flag(&cell.corners));
    let corner = |rounded: bool, round: char, square: char| if rounded { round } else { square };

    let rule = "─".repeat(ROW_WIDTH);
    let top = format!(
        "{}{}{}",
        corner(has(|c| c.top_left), '╭', '┌'),
        rule,
        corner(has(|c| c.top_right), '╮', '┐'),
    );
    let bottom = format!(
        "{}{}{}",
        corner(has(|c| c.bottom_left), '╰', '└'),
        rule,
        corner(has(|c| c.bottom_right), '╯', '┘'),
    );
    (top, bottom)
}

/// Format month as grid of lines: title, weekday header, then one line per week.
pub fn format_month_grid(ctx: &GridContext, grid: &MonthGrid) -> Vec<String> {
    let mut lines = Vec::with_capacity(grid.row_count() + 4);

    lines.push(format_month_header(ctx, &grid.name));
    lines.push(format_weekday_headers(ctx, get_system_locale()));

    let borders = ctx.frame.then(|| frame_borders(grid));
    if let Some((top, _)) = &borders {
        lines.push(top.clone());
    }
    for row in grid.rows() {
        lines.push(format_row(ctx, row));
    }
    if let Some((_, bottom)) = borders {
        lines.push(bottom);
    }

    lines
}

/// Lay out multiple months side by side.
pub fn format_months_side_by_side(ctx: &GridContext, grids: &[MonthGrid]) -> Vec<String> {
    let blocks: Vec<Vec<String>> = grids.iter().map(|g| format_month_grid(ctx, g)).collect();
    let max_height = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let month_width = ctx.month_width();

    (0..max_height)
        .map(|row| {
            let mut line = String::new();
            for (i, block) in blocks.iter().enumerate() {
                let text = block.get(row).map(String::as_str).unwrap_or("");
                line.push_str(text);
                let mut padding = month_width.saturating_sub(visible_width(text));
                if i < blocks.len() - 1 {
                    padding += ctx.gutter_width;
                }
                line.push_str(&" ".repeat(padding));
            }
            line
        })
        .collect()
}

/// Lay out all months, `months_per_row` to a row, with a blank line between rows.
pub fn format_months(ctx: &GridContext, grids: &[MonthGrid]) -> Vec<String> {
    let per_row = ctx.months_per_row().max(1) as usize;
    let mut lines = Vec::new();
    for (i, chunk) in grids.chunks(per_row).enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(format_months_side_by_side(ctx, chunk));
    }
    lines
}

/// Year title centered over a full row of months.
pub fn format_year_title(ctx: &GridContext, year: i32) -> String {
    let per_row = ctx.months_per_row().max(1) as usize;
    let width = per_row * ctx.month_width() + (per_row - 1) * ctx.gutter_width;
    center_text(&year.to_string(), width)
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
