//! Readers backing the collaborator traits of `memscout_core::source`.

pub mod csv;
pub mod parquet;
