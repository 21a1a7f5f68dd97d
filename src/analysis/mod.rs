//! Derived statistics over the chronologically sorted logs. Nothing here is cached, every view
//! recomputes what it needs from [crate::storage::log_store::LogStore::get_all_sorted].

pub mod series;
pub mod summary;
