use chrono::NaiveDate;

use crate::storage::entities::DailyLog;

/// Point of the brain score growth chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: f64,
}

impl From<&DailyLog> for ScorePoint {
    fn from(log: &DailyLog) -> Self {
        Self {
            date: log.date,
            score: log.brain_score,
        }
    }
}

/// Point of the daily study minutes chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinutesPoint {
    pub date: NaiveDate,
    pub minutes: u32,
}

impl From<&DailyLog> for MinutesPoint {
    fn from(log: &DailyLog) -> Self {
        Self {
            date: log.date,
            minutes: log.study_minutes,
        }
    }
}

/// Point of the score against rank chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRankPoint {
    pub date: NaiveDate,
    pub score: f64,
    pub rank: u32,
}

impl From<&DailyLog> for ScoreRankPoint {
    fn from(log: &DailyLog) -> Self {
        Self {
            date: log.date,
            score: log.brain_score,
            rank: log.brain_rank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulativeAlphas {
    pub date: NaiveDate,
    pub daily_alphas: u32,
    pub cumulative_alphas: u64,
}

/// Returns at most `n` trailing items, keeping their order.
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Projects the last `n` logs into whatever a chart needs.
pub fn window_series<'a, T>(
    logs: &'a [DailyLog],
    n: usize,
    projection: impl FnMut(&'a DailyLog) -> T,
) -> Vec<T> {
    last_n(logs, n).iter().map(projection).collect()
}

/// Running total of alpha templates over the whole history. Window the result afterwards so the
/// totals still account for older logs.
pub fn cumulative_alphas(logs: &[DailyLog]) -> Vec<CumulativeAlphas> {
    logs.iter()
        .scan(0u64, |total, log| {
            *total += u64::from(log.alpha_templates);
            Some(CumulativeAlphas {
                date: log.date,
                daily_alphas: log.alpha_templates,
                cumulative_alphas: *total,
            })
        })
        .collect()
}
