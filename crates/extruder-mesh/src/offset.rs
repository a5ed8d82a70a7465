//! The extrusion offset link.

use std::sync::Arc;

use correction_grid::CorrectionGrid;
use tracing::{debug, trace};

use crate::controls::MeshControls;
use crate::readiness::ExtrusionReadiness;
use crate::transform::{MoveTransform, Position};

/// Chain link that adds a position-dependent offset to the extruder axis.
///
/// When the mesh is disabled, or the extruder may not move, moves pass
/// through untouched. Position queries always report the downstream
/// position: the correction is applied to outgoing moves only and is never
/// subtracted back out.
pub struct MeshTransform<T> {
    grid: Arc<CorrectionGrid>,
    controls: Arc<MeshControls>,
    readiness: Arc<dyn ExtrusionReadiness>,
    downstream: T,
}

impl<T> MeshTransform<T> {
    pub fn new(
        grid: Arc<CorrectionGrid>,
        controls: Arc<MeshControls>,
        readiness: Arc<dyn ExtrusionReadiness>,
        downstream: T,
    ) -> Self {
        Self {
            grid,
            controls,
            readiness,
            downstream,
        }
    }

    /// Scaled correction for a planar position.
    fn offset_at(&self, x: f64, y: f64) -> f64 {
        self.grid.lookup(x, y) * self.controls.multiplier()
    }
}

impl<T: MoveTransform> MoveTransform for MeshTransform<T> {
    fn move_to(&mut self, position: Position, speed: f64) {
        if !self.controls.is_enabled() {
            self.downstream.move_to(position, speed);
            return;
        }

        if !self.readiness.can_extrude() {
            trace!(?position, "extruder cannot move, passing move through");
            self.downstream.move_to(position, speed);
            return;
        }

        let offset = self.offset_at(position.x, position.y);
        debug!(
            x = position.x,
            y = position.y,
            e = position.e,
            offset,
            "extruder mesh offset"
        );

        self.downstream
            .move_to(position.with_extrusion_offset(offset), speed);
    }

    fn position(&self) -> Position {
        self.downstream.position()
    }
}
