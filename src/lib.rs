//! Small tracker for daily study progress. Every day gets a log with study minutes, produced
//! alpha templates, a brain score and a brain rank. Logs are kept in a single json blob and all
//! statistics are derived from them on demand.
//!

pub mod analysis;
pub mod cli;
pub mod storage;
pub mod utils;
