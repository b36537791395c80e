//! Abstract memory probe interface.
//!
//! The concrete implementations live in `memscout-mem`. We keep only the trait
//! here so the planner can depend on the API without pulling in OS introspection.

use std::sync::Arc;

/// Reports the memory currently available to the process, in bytes.
///
/// Implementations must not cache: available memory changes over time and the
/// orchestrator asks exactly once per estimation call.
pub trait MemoryProbe: Send + Sync {
    fn available_bytes(&self) -> u64;
}

impl<T: MemoryProbe + ?Sized> MemoryProbe for Arc<T> {
    fn available_bytes(&self) -> u64 {
        (**self).available_bytes()
    }
}

impl<T: MemoryProbe + ?Sized> MemoryProbe for &T {
    fn available_bytes(&self) -> u64 {
        (**self).available_bytes()
    }
}

impl<T: MemoryProbe + ?Sized> MemoryProbe for Box<T> {
    fn available_bytes(&self) -> u64 {
        (**self).available_bytes()
    }
}
