//! Runtime switches shared between the mesh link and its commands.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// `enabled` and `multiplier`, readable from the move path while command
/// handlers write them.
#[derive(Debug)]
pub struct MeshControls {
    enabled: AtomicBool,
    multiplier: AtomicU64,
}

/// Point-in-time copy of [`MeshControls`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshStatus {
    pub enabled: bool,
    pub multiplier: f64,
}

impl MeshControls {
    pub fn new(enabled: bool, multiplier: f64) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            multiplier: AtomicU64::new(multiplier.to_bits()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn multiplier(&self) -> f64 {
        f64::from_bits(self.multiplier.load(Ordering::Relaxed))
    }

    /// Zero silences the correction, negative values invert it.
    pub fn set_multiplier(&self, multiplier: f64) {
        self.multiplier.store(multiplier.to_bits(), Ordering::Relaxed);
    }

    pub fn status(&self) -> MeshStatus {
        MeshStatus {
            enabled: self.is_enabled(),
            multiplier: self.multiplier(),
        }
    }
}

impl Default for MeshControls {
    fn default() -> Self {
        Self::new(true, 1.0)
    }
}
