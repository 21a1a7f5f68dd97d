use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::storage::entities::DailyLog;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonthTotals {
    pub total_minutes: u64,
    pub total_alphas: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    pub total_study_minutes: u64,
    pub total_alpha_templates: u64,
    pub current_streak: u32,
}

/// Returns the log saved for `today`, if any.
pub fn today_record(logs: &[DailyLog], today: NaiveDate) -> Option<&DailyLog> {
    logs.iter().find(|v| v.date == today)
}

/// Sums minutes and alphas of logs within the given calendar month.
pub fn month_totals(logs: &[DailyLog], year: i32, month: u32) -> MonthTotals {
    logs.iter()
        .filter(|v| v.date.year() == year && v.date.month() == month)
        .fold(MonthTotals::default(), |mut totals, v| {
            totals.total_minutes += u64::from(v.study_minutes);
            totals.total_alphas += u64::from(v.alpha_templates);
            totals
        })
}

/// Rank of the last log in the sequence.
///
/// This intentionally doesn't skip unset ranks: if the last log has rank `0` the result is `0`,
/// even when earlier logs have a real rank.
pub fn latest_rank(logs: &[DailyLog]) -> u32 {
    logs.last().map_or(0, |v| v.brain_rank)
}

/// Counts consecutive days with some study time. The streak ends today, or yesterday when
/// nothing was studied today yet.
pub fn current_streak(logs: &[DailyLog], today: NaiveDate) -> u32 {
    let studied = logs
        .iter()
        .filter(|v| v.study_minutes > 0)
        .map(|v| v.date)
        .collect::<HashSet<_>>();

    let mut current = if studied.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut streak = 0;
    while let Some(day) = current.filter(|v| studied.contains(v)) {
        streak += 1;
        current = day.pred_opt();
    }
    streak
}

/// All time totals together with the current streak.
pub fn summary_stats(logs: &[DailyLog], today: NaiveDate) -> SummaryStats {
    SummaryStats {
        total_study_minutes: logs.iter().map(|v| u64::from(v.study_minutes)).sum(),
        total_alpha_templates: logs.iter().map(|v| u64::from(v.alpha_templates)).sum(),
        current_streak: current_streak(logs, today),
    }
}
