//! Whether the extruder axis may currently move.

use std::sync::atomic::{AtomicBool, Ordering};

/// Capability consulted once per move before a correction is applied.
///
/// Typically backed by the extruder heater: a cold hotend must not be asked
/// to push filament, so corrections are withheld until it is up to
/// temperature.
pub trait ExtrusionReadiness: Send + Sync {
    fn can_extrude(&self) -> bool;
}

impl<F> ExtrusionReadiness for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn can_extrude(&self) -> bool {
        self()
    }
}

/// Readiness that never blocks extrusion.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReady;

impl ExtrusionReadiness for AlwaysReady {
    fn can_extrude(&self) -> bool {
        true
    }
}

/// Readiness driven by an externally toggled flag.
#[derive(Debug, Default)]
pub struct ReadinessFlag(AtomicBool);

impl ReadinessFlag {
    pub fn new(ready: bool) -> Self {
        Self(AtomicBool::new(ready))
    }

    pub fn set(&self, ready: bool) {
        self.0.store(ready, Ordering::Relaxed);
    }
}

impl ExtrusionReadiness for ReadinessFlag {
    fn can_extrude(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
