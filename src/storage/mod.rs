//!  Storage is organized through [log_store::LogStore].
//!  The basic idea is:
//!   - There is a single slot holding one json blob.
//!   - The blob maps canonical `YYYY-MM-DD` dates to a [entities::DailyLog].
//!   - Every save rewrites the whole blob.

pub mod entities;
pub mod log_store;
pub mod slot;
