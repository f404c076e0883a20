use std::fmt::Write;

use chrono::NaiveDate;
use meridian_core::{GridCell, Holiday, MonthGrid, region, regions};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAY_NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Day label is right-aligned in 4 columns, region markers fill the other 5.
const LABEL_WIDTH: usize = 4;
const MARKER_WIDTH: usize = 5;
const CELL_WIDTH: usize = LABEL_WIDTH + MARKER_WIDTH;

/// Title, weekday header and one line per week.
pub fn month_grid(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let title = format!("{} {}", MONTH_NAMES[grid.month as usize], grid.year);
    let _ = writeln!(out, "{:^width$}", title, width = CELL_WIDTH * 7);

    let header: String = DAY_NAMES
        .iter()
        .map(|name| format!("{:>LABEL_WIDTH$}{:MARKER_WIDTH$}", name, ""))
        .collect();
    let _ = writeln!(out, "{}", header.trim_end());

    for week in grid.weeks() {
        let line: String = week.iter().map(cell_text).collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

fn cell_text(cell: &GridCell) -> String {
    match cell {
        GridCell::Blank => " ".repeat(CELL_WIDTH),
        GridCell::Day(day) => {
            let label = if day.is_today {
                format!("[{}]", day.day)
            } else if day.is_weekend {
                format!("({})", day.day)
            } else {
                day.day.to_string()
            };
            let markers: String = day.regions.iter().map(|id| region(*id).marker).collect();
            format!("{:>LABEL_WIDTH$}{:<MARKER_WIDTH$}", label, markers)
        }
    }
}

/// Marker key for every region plus the today/weekend notation.
pub fn legend() -> String {
    let entries: Vec<String> = regions()
        .iter()
        .map(|r| format!("{} {}", r.marker, r.label))
        .collect();
    format!("{}\n[d] today  (d) weekend\n", entries.join("  "))
}

/// The holiday list shown for a selected day.
pub fn day_holidays(date: NaiveDate, holidays: &[Holiday]) -> String {
    if holidays.is_empty() {
        return format!("{}: no holidays in the selected regions.\n", date);
    }

    let mut out = format!("{} holidays:\n", date);
    for h in holidays {
        let _ = write!(
            out,
            "  {} {} ({})",
            region(h.region_id).marker,
            h.name,
            h.country_name
        );
        if let Some(local) = h.local_name.as_deref().filter(|l| *l != h.name) {
            let _ = write!(out, " - {}", local);
        }
        out.push('\n');
    }
    out
}

/// Every region with its countries.
pub fn regions_list() -> String {
    let mut out = String::new();
    for r in regions() {
        let _ = writeln!(
            out,
            "{} {:<15} {} / {} {}",
            r.marker, r.id, r.label, r.label_local, r.color
        );
        for c in r.countries {
            let _ = writeln!(out, "    {}  {} ({})", c.code, c.name, c.name_local);
        }
    }
    out
}
