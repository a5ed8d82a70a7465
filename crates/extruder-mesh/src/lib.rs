//! Extrusion-axis correction for the move transform chain.
//!
//! An [`ExtruderMesh`] sits on top of whatever chain of move transforms
//! already exists and adds a position-dependent offset to the extruder axis
//! of every move, looked up from a [`CorrectionGrid`](correction_grid::CorrectionGrid).
//!
//! # Architecture
//!
//! ```text
//! Printer::move_to(x, y, z, e)
//!      │
//!      ▼
//! MeshTransform (head link)
//!      │
//!      ├─► disabled or extruder not ready: forward unchanged
//!      │
//!      └─► e += grid.lookup(x, y) * multiplier
//!               │
//!               ▼
//!          downstream links ... toolhead planner
//! ```
//!
//! Position queries travel the same chain and are returned unadjusted.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use extruder_mesh::{AlwaysReady, ExtruderMesh, MeshConfig, Position, Printer};
//!
//! let mut printer = Printer::new(planner);
//! let mesh = ExtruderMesh::load(&MeshConfig::default(), &mut printer, Arc::new(AlwaysReady))?;
//! printer.ready()?;
//!
//! printer.run_script("SET_EXTRUDER_MESH_MULTIPLIER MULTIPLIER=0.8")?;
//! printer.move_to(Position::new(150.0, 150.0, 0.2, 12.5), 60.0);
//! ```

pub mod commands;
pub mod config;
pub mod controls;
pub mod error;
pub mod mesh;
pub mod offset;
pub mod printer;
pub mod readiness;
pub mod transform;

// Re-export commonly used types at crate root
pub use commands::{CommandHandler, CommandParams, CommandRegistry};
pub use config::MeshConfig;
pub use controls::{MeshControls, MeshStatus};
pub use error::{MeshError, Result};
pub use mesh::ExtruderMesh;
pub use offset::MeshTransform;
pub use printer::{Printer, ReadyHandler, PLANNER_LINK};
pub use readiness::{AlwaysReady, ExtrusionReadiness, ReadinessFlag};
pub use transform::{MoveTransform, Position, TransformChain};
