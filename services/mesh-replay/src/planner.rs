//! Bottom link of the replay chain.

use std::sync::mpsc::Sender;

use extruder_mesh::{MoveTransform, Position};
use serde::Serialize;
use tracing::warn;

/// A move as handed to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlannedMove {
    pub position: Position,
    pub speed: f64,
}

/// Tracks the commanded position and reports every move on a channel.
pub struct TrackingPlanner {
    position: Position,
    moves: Sender<PlannedMove>,
}

impl TrackingPlanner {
    pub fn new(start: Position, moves: Sender<PlannedMove>) -> Self {
        Self {
            position: start,
            moves,
        }
    }
}

impl MoveTransform for TrackingPlanner {
    fn move_to(&mut self, position: Position, speed: f64) {
        self.position = position;
        if self.moves.send(PlannedMove { position, speed }).is_err() {
            warn!(?position, "planned move has no listener");
        }
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_tracks_and_reports() {
        let (tx, rx) = channel();
        let mut planner = TrackingPlanner::new(Position::default(), tx);

        planner.move_to(Position::new(1.0, 2.0, 0.2, 0.5), 30.0);

        assert_eq!(planner.position(), Position::new(1.0, 2.0, 0.2, 0.5));
        assert_eq!(
            rx.try_recv().unwrap(),
            PlannedMove {
                position: Position::new(1.0, 2.0, 0.2, 0.5),
                speed: 30.0
            }
        );
    }
}
