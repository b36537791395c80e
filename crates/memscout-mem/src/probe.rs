//! System and fixed memory probes.

use memscout_core::probe::MemoryProbe;
use sysinfo::System;

/// Reads available memory from the OS on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMemoryProbe;

impl SystemMemoryProbe {
    pub fn new() -> Self {
        Self
    }
}

impl MemoryProbe for SystemMemoryProbe {
    fn available_bytes(&self) -> u64 {
        // A fresh `System` per call: only the memory figures are refreshed.
        let mut sys = System::new();
        sys.refresh_memory();
        let available = sys.available_memory();
        tracing::trace!(
            available_bytes = available,
            total_bytes = sys.total_memory(),
            "probed system memory"
        );
        available
    }
}

/// Always reports the same figure. Used for what-if runs, batch snapshots,
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMemoryProbe {
    available_bytes: u64,
}

impl FixedMemoryProbe {
    pub const fn new(available_bytes: u64) -> Self {
        Self { available_bytes }
    }

    /// Pin one reading of `probe`.
    pub fn snapshot<P: MemoryProbe + ?Sized>(probe: &P) -> Self {
        Self::new(probe.available_bytes())
    }
}

impl MemoryProbe for FixedMemoryProbe {
    fn available_bytes(&self) -> u64 {
        self.available_bytes
    }
}
