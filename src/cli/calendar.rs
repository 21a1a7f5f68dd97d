use std::{collections::HashMap, fmt::Write};

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};

use crate::{
    storage::{entities::DailyLog, log_store::LogStore, slot::StorageSlot},
    utils::{clock::Clock, time::month_bounds},
};

use super::{
    date_arg::YearMonth,
    output::{format_rank, Painter},
};

const WEEK_DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 5;

pub async fn process_calendar_command(
    store: &LogStore<impl StorageSlot>,
    clock: &impl Clock,
    month: Option<YearMonth>,
    painter: Painter,
) -> Result<String> {
    let today = clock.time().date_naive();
    let month = month.unwrap_or_else(|| today.into());
    let logs = store.get_all_sorted().await?;
    render_calendar(&logs, month, today, painter)
}

fn has_data(log: &DailyLog) -> bool {
    log.study_minutes > 0 || log.alpha_templates > 0
}

/// Sunday first month grid. Days with activity are highlighted and listed below the grid.
pub fn render_calendar(
    logs: &[DailyLog],
    YearMonth { year, month }: YearMonth,
    today: NaiveDate,
    painter: Painter,
) -> Result<String> {
    let (first, last) =
        month_bounds(year, month).ok_or_else(|| anyhow!("Invalid month {year}-{month}"))?;

    let by_date = logs
        .iter()
        .filter(|v| v.date >= first && v.date <= last)
        .map(|v| (v.date, v))
        .collect::<HashMap<_, _>>();

    let mut out = String::new();
    writeln!(out, "{}", painter.heading(&first.format("%B %Y").to_string()))?;
    for name in WEEK_DAYS {
        write!(out, "{name:>CELL_WIDTH$}")?;
    }
    writeln!(out)?;

    let offset = first.weekday().num_days_from_sunday() as usize;
    for _ in 0..offset {
        write!(out, "{:CELL_WIDTH$}", "")?;
    }

    let mut column = offset;
    for day in first.iter_days().take_while(|v| *v <= last) {
        let marker = match by_date.get(&day) {
            Some(log) if has_data(log) => "*",
            _ => " ",
        };
        let cell = format!("{:>width$}{marker}", day.day(), width = CELL_WIDTH - 1);
        let cell = if day == today {
            painter.today(&cell)
        } else if marker == "*" {
            painter.highlight(&cell)
        } else {
            cell
        };
        out.push_str(&cell);

        column += 1;
        if column % 7 == 0 {
            writeln!(out)?;
        }
    }
    if column % 7 != 0 {
        writeln!(out)?;
    }

    let mut active = by_date.into_values().filter(|v| has_data(v)).collect::<Vec<_>>();
    if active.is_empty() {
        writeln!(out, "{}", painter.dim("No entries this month."))?;
        return Ok(out);
    }

    active.sort_by(|a, b| a.date.cmp(&b.date));
    writeln!(out)?;
    for log in active {
        write!(out, "{:>2}", log.date.day())?;
        if log.study_minutes > 0 {
            write!(out, "\t{}m study", log.study_minutes)?;
        }
        if log.alpha_templates > 0 {
            write!(out, "\t{} alphas", log.alpha_templates)?;
        }
        if log.brain_rank > 0 {
            write!(out, "\tRank {}", format_rank(log.brain_rank))?;
        }
        writeln!(out)?;
    }
    Ok(out)
}
