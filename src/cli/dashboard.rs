use std::fmt::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::{
    analysis::{
        series::{window_series, ScorePoint},
        summary::{latest_rank, month_totals, summary_stats, today_record},
    },
    storage::{entities::DailyLog, log_store::LogStore, slot::StorageSlot},
    utils::{clock::Clock, time::short_date},
};

use super::output::{bar, format_rank, format_study_time, Painter};

/// Amount of logs shown in the brain score growth chart.
pub const SCORE_CHART_DAYS: usize = 30;
const CHART_WIDTH: usize = 40;

pub async fn process_dashboard_command(
    store: &LogStore<impl StorageSlot>,
    clock: &impl Clock,
    painter: Painter,
) -> Result<String> {
    let logs = store.get_all_sorted().await?;
    render_dashboard(&logs, clock.time().date_naive(), painter)
}

fn format_streak(days: u32) -> String {
    match days {
        1 => "1 day".to_string(),
        days => format!("{days} days"),
    }
}

/// Overview for the current month: today's work, month totals, rank and the score trend.
pub fn render_dashboard(logs: &[DailyLog], today: NaiveDate, painter: Painter) -> Result<String> {
    let mut out = String::new();

    let todays = today_record(logs, today);
    let totals = month_totals(logs, today.year(), today.month());
    let all_time = summary_stats(logs, today);

    writeln!(out, "{}", painter.heading("Overview"))?;
    writeln!(
        out,
        "Track your progress for {}.",
        today.format("%B %Y")
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Today's Study\t{}",
        format_study_time(todays.map_or(0, |v| v.study_minutes))
    )?;
    writeln!(
        out,
        "Today's Alphas\t{}",
        todays.map_or(0, |v| v.alpha_templates)
    )?;
    writeln!(out, "Month Minutes\t{}", totals.total_minutes)?;
    writeln!(out, "Month Alphas\t{}", totals.total_alphas)?;
    writeln!(out, "Current Rank\t{}", format_rank(latest_rank(logs)))?;
    writeln!(out, "Total Minutes\t{}", all_time.total_study_minutes)?;
    writeln!(out, "Total Alphas\t{}", all_time.total_alpha_templates)?;
    writeln!(out, "Streak\t\t{}", format_streak(all_time.current_streak))?;
    writeln!(out)?;

    writeln!(
        out,
        "{}",
        painter.heading(&format!("Brain Score Growth (Last {SCORE_CHART_DAYS} Days)"))
    )?;
    let series = window_series(logs, SCORE_CHART_DAYS, ScorePoint::from);
    if series.is_empty() {
        writeln!(out, "No data available. Start logging your days!")?;
        return Ok(out);
    }

    let max = series.iter().map(|v| v.score).fold(0., f64::max);
    for point in series {
        writeln!(
            out,
            "{}\t{:>8.2}\t{}",
            short_date(point.date),
            point.score,
            bar(point.score, max, CHART_WIDTH)
        )?;
    }
    Ok(out)
}
