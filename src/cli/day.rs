use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::{
    storage::{
        entities::{DailyLog, DailyLogPatch},
        log_store::LogStore,
        slot::StorageSlot,
    },
    utils::time::canonical_date,
};

use super::output::{format_rank, format_study_time, Painter};

#[derive(Debug, Clone, clap::Args)]
pub struct LogFields {
    #[arg(short, long, help = "Minutes studied")]
    minutes: Option<u32>,
    #[arg(short, long, help = "Alpha templates produced")]
    alphas: Option<u32>,
    #[arg(
        short,
        long,
        help = "Brain score",
        allow_negative_numbers = true,
        value_parser = parse_finite_score
    )]
    score: Option<f64>,
    #[arg(short, long, help = "Brain rank, 0 if unknown")]
    rank: Option<u32>,
    #[arg(short, long, help = "Notes for the day. Replaces existing notes")]
    notes: Option<String>,
}

/// Json can't store NaN or infinity, so only finite scores are accepted.
fn parse_finite_score(value: &str) -> Result<f64, String> {
    let score = value.parse::<f64>().map_err(|e| format!("{value} is not a number: {e}"))?;
    if score.is_finite() {
        Ok(score)
    } else {
        Err(format!("{value} is not a finite number"))
    }
}

impl From<LogFields> for DailyLogPatch {
    fn from(
        LogFields {
            minutes,
            alphas,
            score,
            rank,
            notes,
        }: LogFields,
    ) -> Self {
        DailyLogPatch {
            study_minutes: minutes,
            alpha_templates: alphas,
            brain_score: score,
            brain_rank: rank,
            notes,
        }
    }
}

pub async fn process_show_command(
    store: &LogStore<impl StorageSlot>,
    date: NaiveDate,
    painter: Painter,
) -> Result<String> {
    let log = store.get_for_date(date).await?;
    render_day(&log, painter)
}

/// Merges the given fields into the stored log for `date` and saves the full log.
pub async fn process_log_command(
    store: &LogStore<impl StorageSlot>,
    date: NaiveDate,
    patch: DailyLogPatch,
    painter: Painter,
) -> Result<String> {
    let current = store.get_for_date(date).await?;
    if patch.is_empty() {
        let mut out = String::from("Nothing to update.\n");
        out.push_str(&render_day(&current, painter)?);
        return Ok(out);
    }

    let updated = patch.apply_to(current);
    store.save(&updated).await?;
    info!("Saved log for {}", updated.date);

    let mut out = String::from("Saved!\n");
    out.push_str(&render_day(&updated, painter)?);
    Ok(out)
}

pub fn render_day(log: &DailyLog, painter: Painter) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "{}",
        painter.heading(&log.date.format("%A, %B %-d").to_string())
    )?;
    writeln!(out, "Daily Activity Log for {}", canonical_date(log.date))?;
    writeln!(out)?;
    writeln!(
        out,
        "Study Time\t{} ({} min)",
        format_study_time(log.study_minutes),
        log.study_minutes
    )?;
    writeln!(out, "Alpha Templates\t{}", log.alpha_templates)?;
    writeln!(out, "Brain Score\t{}", log.brain_score)?;
    writeln!(out, "Brain Rank\t{}", format_rank(log.brain_rank))?;
    writeln!(out)?;
    writeln!(out, "{}", painter.heading("Notes"))?;
    if log.notes.is_empty() {
        writeln!(out, "{}", painter.dim("No notes."))?;
    } else {
        writeln!(out, "{}", log.notes)?;
    }
    Ok(out)
}
