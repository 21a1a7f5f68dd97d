use std::fmt::Write;

use anyhow::Result;

use crate::{
    analysis::series::{
        cumulative_alphas, last_n, window_series, MinutesPoint, ScoreRankPoint,
    },
    storage::{entities::DailyLog, log_store::LogStore, slot::StorageSlot},
    utils::time::short_date,
};

use super::output::{bar, format_rank, Painter};

pub const DEFAULT_STATS_DAYS: usize = 30;
const CHART_WIDTH: usize = 30;

pub async fn process_stats_command(
    store: &LogStore<impl StorageSlot>,
    last: usize,
    painter: Painter,
) -> Result<String> {
    let logs = store.get_all_sorted().await?;
    render_stats(&logs, last, painter)
}

/// Minutes, score against rank and alpha velocity for the last `last` logs.
pub fn render_stats(logs: &[DailyLog], last: usize, painter: Painter) -> Result<String> {
    let mut out = String::new();
    if logs.is_empty() {
        writeln!(out, "{}", painter.heading("No Statistics Available"))?;
        writeln!(
            out,
            "Start logging your daily activity to see insights here."
        )?;
        return Ok(out);
    }

    writeln!(out, "{}", painter.heading("Performance Analytics"))?;
    writeln!(out)?;

    writeln!(out, "{}", painter.heading("Daily Study Minutes"))?;
    let minutes = window_series(logs, last, MinutesPoint::from);
    let max_minutes = minutes.iter().map(|v| v.minutes).max().unwrap_or(0);
    for point in minutes {
        writeln!(
            out,
            "{}\t{:>5}\t{}",
            short_date(point.date),
            point.minutes,
            bar(
                f64::from(point.minutes),
                f64::from(max_minutes),
                CHART_WIDTH
            )
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", painter.heading("Brain Score vs. Rank"))?;
    for point in window_series(logs, last, ScoreRankPoint::from) {
        writeln!(
            out,
            "{}\t{:>8.2}\t{}",
            short_date(point.date),
            point.score,
            format_rank(point.rank)
        )?;
    }
    writeln!(out)?;

    // Totals are computed over the whole history before windowing.
    writeln!(out, "{}", painter.heading("Alpha Generation Velocity"))?;
    writeln!(out, "Date\tDaily\tCumulative")?;
    let cumulative = cumulative_alphas(logs);
    for point in last_n(&cumulative, last) {
        writeln!(
            out,
            "{}\t{}\t{}",
            short_date(point.date),
            point.daily_alphas,
            point.cumulative_alphas
        )?;
    }
    Ok(out)
}
