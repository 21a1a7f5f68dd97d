pub mod calendar;
pub mod clear;
pub mod dashboard;
pub mod date_arg;
pub mod day;
pub mod output;
pub mod stats;

use std::{io::IsTerminal, path::PathBuf};

use anyhow::Result;
use calendar::process_calendar_command;
use clear::process_clear_command;
use clap::{Parser, Subcommand};
use dashboard::process_dashboard_command;
use date_arg::{parse_date_arg, parse_month_arg, DateStyle};
use day::{process_log_command, process_show_command, LogFields};
use output::Painter;
use stats::{process_stats_command, DEFAULT_STATS_DAYS};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    storage::{
        log_store::{LogStore, STORAGE_KEY},
        slot::{FileSlot, StorageSlot},
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, create_application_path},
        logging::enable_logging,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Studylog", version, long_about = None)]
#[command(about = "Application for tracking daily study progress", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Overview of today and the current month")]
    Dashboard {},
    #[command(about = "Display a month with the days that have logged activity")]
    Calendar {
        #[arg(long, help = "Month to display as YYYY-MM. Defaults to the current month")]
        month: Option<String>,
    },
    #[command(about = "Show the log of a single day")]
    Show {
        #[arg(help = "Day to show. Examples are \"today\", \"yesterday\", \"2025-03-15\", \"15/03/2025\"")]
        date: String,
    },
    #[command(about = "Update the log of a single day. Only the given fields are changed")]
    Log {
        #[arg(help = "Day to update. Examples are \"today\", \"yesterday\", \"2025-03-15\", \"15/03/2025\"")]
        date: String,
        #[command(flatten)]
        fields: LogFields,
    },
    #[command(about = "Charts of minutes, score, rank and alphas")]
    Stats {
        #[arg(long, default_value_t = DEFAULT_STATS_DAYS, help = "Amount of latest logs to display")]
        last: usize,
    },
    #[command(about = "Remove every saved log")]
    Clear {
        #[arg(long, help = "Confirm removing every saved log")]
        yes: bool,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .clone()
        .map_or_else(create_application_default_path, create_application_path)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&app_dir, logging_level, args.log)?;
    debug!("Using application directory {app_dir:?}");

    let store = LogStore::new(FileSlot::new(&app_dir, STORAGE_KEY)?);
    let painter = Painter::new(std::io::stdout().is_terminal());

    let output = process_command(args, &store, &DefaultClock, painter).await?;
    print!("{output}");
    Ok(())
}

async fn process_command(
    Args {
        commands,
        date_style,
        ..
    }: Args,
    store: &LogStore<impl StorageSlot>,
    clock: &impl Clock,
    painter: Painter,
) -> Result<String> {
    match commands {
        Commands::Dashboard {} => process_dashboard_command(store, clock, painter).await,
        Commands::Calendar { month } => {
            let month = month.as_deref().map(parse_month_arg).transpose()?;
            process_calendar_command(store, clock, month, painter).await
        }
        Commands::Show { date } => {
            let date = parse_date_arg(&date, clock.time(), date_style)?;
            process_show_command(store, date, painter).await
        }
        Commands::Log { date, fields } => {
            let date = parse_date_arg(&date, clock.time(), date_style)?;
            process_log_command(store, date, fields.into(), painter).await
        }
        Commands::Stats { last } => process_stats_command(store, last, painter).await,
        Commands::Clear { yes } => process_clear_command(store, yes).await,
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Local, NaiveDate, TimeZone};
    use clap::Parser;

    use crate::{
        storage::{entities::DailyLog, log_store::LogStore, slot::MemorySlot},
        utils::clock::MockClock,
    };

    use super::{output::Painter, process_command, Args};

    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_time()
            .returning(|| Local.with_ymd_and_hms(2024, 3, 5, 18, 0, 0).unwrap());
        clock
    }

    async fn run(store: &LogStore<MemorySlot>, args: &[&str]) -> Result<String> {
        let args = Args::try_parse_from(std::iter::once("studylog").chain(args.iter().copied()))?;
        process_command(args, store, &clock(), Painter::plain()).await
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[tokio::test]
    async fn log_then_show() -> Result<()> {
        let store = LogStore::new(MemorySlot::new());

        run(&store, &["log", "2024-03-05", "--minutes", "50", "-a", "2", "--score", "-1.5"]).await?;
        let out = run(&store, &["show", "2024-03-05"]).await?;

        assert!(out.contains("Study Time\t50 min"));
        assert!(out.contains("Alpha Templates\t2"));
        assert!(out.contains("Brain Score\t-1.5"));
        Ok(())
    }

    #[tokio::test]
    async fn non_finite_score_is_rejected() -> Result<()> {
        let store = LogStore::new(MemorySlot::new());
        run(&store, &["log", "2024-03-01", "--minutes", "120"]).await?;

        for score in ["NaN", "inf", "abc"] {
            let error = Args::try_parse_from(["studylog", "log", "2024-03-02", "--score", score])
                .expect_err("score should be rejected");
            assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
        }

        assert_eq!(
            store.get_all_sorted().await?,
            vec![DailyLog::empty(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).with_study_minutes(120)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn clear_through_cli() -> Result<()> {
        let store = LogStore::new(MemorySlot::new());
        run(&store, &["log", "2024-03-01", "--minutes", "10"]).await?;

        run(&store, &["clear"]).await?;
        assert_eq!(store.get_all_sorted().await?.len(), 1);

        run(&store, &["clear", "--yes"]).await?;
        assert!(store.get_all_sorted().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn relative_dates_use_clock() -> Result<()> {
        let store = LogStore::new(MemorySlot::new());

        run(&store, &["log", "yesterday", "--rank", "40"]).await?;

        assert_eq!(
            store.get_all_sorted().await?,
            vec![DailyLog::empty(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()).with_brain_rank(40)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn calendar_for_given_month() -> Result<()> {
        let store = LogStore::new(MemorySlot::new());

        let out = run(&store, &["calendar", "--month", "2023-12"]).await?;

        assert!(out.starts_with("December 2023"));
        assert!(run(&store, &["calendar", "--month", "12-2023"]).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn dashboard_and_stats_after_logging() -> Result<()> {
        let store = LogStore::new(MemorySlot::new());
        run(&store, &["--date-style", "us", "log", "03/04/2024", "-a", "4", "-r", "9"]).await?;
        run(&store, &["log", "2024-03-05", "-a", "1"]).await?;

        let dashboard = run(&store, &["dashboard"]).await?;
        assert!(dashboard.contains("Month Alphas\t5"));
        assert!(dashboard.contains("Current Rank\t#N/A"));

        let stats = run(&store, &["stats", "--last", "1"]).await?;
        assert!(stats.contains("03-05\t1\t5"));
        assert!(!stats.contains("03-04"));
        Ok(())
    }
}
