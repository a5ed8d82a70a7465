//! The move transform chain.
//!
//! Every commanded move enters at the head of a singly linked chain of
//! [`MoveTransform`]s. Each link may adjust the move before handing it to the
//! link below; the last link is the motion planner itself.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{MeshError, Result};

/// A toolhead position: planar `x`/`y`, height `z` and extruder axis `e`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub e: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64, e: f64) -> Self {
        Self { x, y, z, e }
    }

    /// Same position with the extruder axis shifted by `offset`.
    pub fn with_extrusion_offset(self, offset: f64) -> Self {
        Self {
            e: self.e + offset,
            ..self
        }
    }
}

impl From<[f64; 4]> for Position {
    fn from([x, y, z, e]: [f64; 4]) -> Self {
        Self { x, y, z, e }
    }
}

impl From<Position> for [f64; 4] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y, pos.z, pos.e]
    }
}

/// A link in the move transform chain.
pub trait MoveTransform: Send {
    /// Handle a move to `position` at `speed`.
    fn move_to(&mut self, position: Position, speed: f64);

    /// Current position as tracked below this link.
    fn position(&self) -> Position;
}

impl<T: MoveTransform + ?Sized> MoveTransform for Box<T> {
    fn move_to(&mut self, position: Position, speed: f64) {
        (**self).move_to(position, speed)
    }

    fn position(&self) -> Position {
        (**self).position()
    }
}

/// Owner of the move handler chain.
///
/// Links are only ever added on top; the chain never shrinks and a link name
/// may appear once.
pub struct TransformChain {
    /// Only empty while `set_move_transform` builds the new head.
    head: Option<Box<dyn MoveTransform>>,
    links: Vec<String>,
}

impl TransformChain {
    /// Start a chain with the planner as its only link.
    pub fn new(name: impl Into<String>, planner: Box<dyn MoveTransform>) -> Self {
        Self {
            head: Some(planner),
            links: vec![name.into()],
        }
    }

    /// Install a new head link.
    ///
    /// `build` receives the current head, which becomes the new link's
    /// downstream transform.
    pub fn set_move_transform<F>(&mut self, name: &str, build: F) -> Result<()>
    where
        F: FnOnce(Box<dyn MoveTransform>) -> Box<dyn MoveTransform>,
    {
        if self.is_installed(name) {
            return Err(MeshError::AlreadyInstalled(name.to_string()));
        }

        if let Some(downstream) = self.head.take() {
            self.head = Some(build(downstream));
        }
        self.links.insert(0, name.to_string());

        info!(link = name, chain = ?self.links, "installed move transform");
        Ok(())
    }

    /// Link names from the head down to the planner.
    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.links.iter().any(|link| link == name)
    }
}

impl MoveTransform for TransformChain {
    fn move_to(&mut self, position: Position, speed: f64) {
        if let Some(head) = self.head.as_mut() {
            head.move_to(position, speed)
        }
    }

    fn position(&self) -> Position {
        self.head
            .as_ref()
            .map(|head| head.position())
            .unwrap_or_default()
    }
}
