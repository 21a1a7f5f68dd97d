use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// Metrics tracked for a single calendar day. This is also the exact shape stored on disk, so
/// field names follow the camelCase layout of the persisted blob.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: NaiveDate,
    pub study_minutes: u32,
    pub alpha_templates: u32,
    pub brain_score: f64,
    /// Lower is better. `0` means the rank is unknown.
    pub brain_rank: u32,
    pub notes: String,
}

impl DailyLog {
    /// Record returned for a day that was never saved.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            study_minutes: 0,
            alpha_templates: 0,
            brain_score: 0.,
            brain_rank: 0,
            notes: String::new(),
        }
    }

    pub fn with_study_minutes(self, study_minutes: u32) -> Self {
        Self {
            study_minutes,
            ..self
        }
    }

    pub fn with_alpha_templates(self, alpha_templates: u32) -> Self {
        Self {
            alpha_templates,
            ..self
        }
    }

    pub fn with_brain_score(self, brain_score: f64) -> Self {
        Self {
            brain_score,
            ..self
        }
    }

    pub fn with_brain_rank(self, brain_rank: u32) -> Self {
        Self { brain_rank, ..self }
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            ..self
        }
    }
}

/// A partial edit of a [DailyLog]. Storage only accepts full records, so edits are merged into
/// the current record before saving.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DailyLogPatch {
    pub study_minutes: Option<u32>,
    pub alpha_templates: Option<u32>,
    pub brain_score: Option<f64>,
    pub brain_rank: Option<u32>,
    pub notes: Option<String>,
}

impl DailyLogPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(self, log: DailyLog) -> DailyLog {
        let DailyLogPatch {
            study_minutes,
            alpha_templates,
            brain_score,
            brain_rank,
            notes,
        } = self;
        DailyLog {
            date: log.date,
            study_minutes: study_minutes.unwrap_or(log.study_minutes),
            alpha_templates: alpha_templates.unwrap_or(log.alpha_templates),
            brain_score: brain_score.unwrap_or(log.brain_score),
            brain_rank: brain_rank.unwrap_or(log.brain_rank),
            notes: notes.unwrap_or(log.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use super::{DailyLog, DailyLogPatch};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

    #[test]
    fn daily_log_uses_camel_case_layout() -> Result<()> {
        let log = DailyLog::empty(TEST_DATE)
            .with_study_minutes(90)
            .with_alpha_templates(3)
            .with_brain_score(1.5)
            .with_brain_rank(120)
            .with_notes("# heading");

        let value = serde_json::to_value(&log)?;

        assert_eq!(
            value,
            serde_json::json!({
                "date": "2024-03-05",
                "studyMinutes": 90,
                "alphaTemplates": 3,
                "brainScore": 1.5,
                "brainRank": 120,
                "notes": "# heading",
            })
        );
        Ok(())
    }

    #[test]
    fn empty_log_is_zeroed() {
        let log = DailyLog::empty(TEST_DATE);
        assert_eq!(log.date, TEST_DATE);
        assert_eq!(log.study_minutes, 0);
        assert_eq!(log.alpha_templates, 0);
        assert_eq!(log.brain_score, 0.);
        assert_eq!(log.brain_rank, 0);
        assert!(log.notes.is_empty());
    }

    #[test]
    fn patch_keeps_untouched_fields() {
        let log = DailyLog::empty(TEST_DATE)
            .with_study_minutes(30)
            .with_notes("kept");

        let patched = DailyLogPatch {
            alpha_templates: Some(4),
            brain_rank: Some(7),
            ..Default::default()
        }
        .apply_to(log);

        assert_eq!(
            patched,
            DailyLog::empty(TEST_DATE)
                .with_study_minutes(30)
                .with_alpha_templates(4)
                .with_brain_rank(7)
                .with_notes("kept")
        );
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(DailyLogPatch::default().is_empty());
        assert!(!DailyLogPatch {
            notes: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }
}
