//! A planner stand-in that remembers every move it receives.

use std::sync::{Arc, Mutex};

use extruder_mesh::{MoveTransform, Position};

/// A move as it arrived at the bottom of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedMove {
    pub position: Position,
    pub speed: f64,
}

/// Shared view of the moves a [`RecordingTransform`] has seen.
#[derive(Debug, Clone, Default)]
pub struct MoveLog(Arc<Mutex<Vec<RecordedMove>>>);

impl MoveLog {
    /// All moves so far, oldest first.
    pub fn moves(&self) -> Vec<RecordedMove> {
        self.0.lock().unwrap().clone()
    }

    /// The most recent move.
    pub fn last(&self) -> Option<RecordedMove> {
        self.0.lock().unwrap().last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, recorded: RecordedMove) {
        self.0.lock().unwrap().push(recorded);
    }
}

/// Terminal transform that records moves and reports a settable position.
///
/// The reported position is independent of the recorded moves and is set
/// through [`reported_position`](Self::reported_position).
#[derive(Debug, Default)]
pub struct RecordingTransform {
    log: MoveLog,
    reported: Arc<Mutex<Position>>,
}

impl RecordingTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for inspecting recorded moves after the transform is boxed.
    pub fn log(&self) -> MoveLog {
        self.log.clone()
    }

    /// Handle for changing the reported position after the transform is boxed.
    pub fn reported_position(&self) -> Arc<Mutex<Position>> {
        self.reported.clone()
    }
}

impl MoveTransform for RecordingTransform {
    fn move_to(&mut self, position: Position, speed: f64) {
        self.log.push(RecordedMove { position, speed });
    }

    fn position(&self) -> Position {
        *self.reported.lock().unwrap()
    }
}
