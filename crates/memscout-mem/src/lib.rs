#![forbid(unsafe_code)]
//! memscout-mem: concrete implementations of `memscout_core::probe::MemoryProbe`.
//!
//! The probe is the only place that asks the operating system about memory.
//! Nothing here caches; callers that need one consistent reading across a
//! batch take a [`FixedMemoryProbe::snapshot`].

pub mod probe;

pub use probe::{FixedMemoryProbe, SystemMemoryProbe};
