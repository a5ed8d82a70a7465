//! Replay script format.
//!
//! One entry per line, either JSON or a bare command:
//!
//! ```text
//! {"move": [150.0, 150.0, 0.2, 12.5], "speed": 60.0}
//! {"command": "SET_EXTRUDER_MESH_MULTIPLIER MULTIPLIER=0.8"}
//! {"can_extrude": false}
//! DISABLE_EXTRUDER_MESH
//! ```
//!
//! Blank lines and lines starting with `;` or `#` are skipped.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Speed used when a move entry omits one.
pub const DEFAULT_SPEED: f64 = 25.0;

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

/// A single script entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptLine {
    Move {
        #[serde(rename = "move")]
        target: [f64; 4],
        #[serde(default = "default_speed")]
        speed: f64,
    },
    Command {
        command: String,
    },
    Extruder {
        can_extrude: bool,
    },
}

impl ScriptLine {
    /// Parse one line; `None` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            return Ok(None);
        }

        if line.starts_with('{') {
            let entry = serde_json::from_str(line)
                .with_context(|| format!("invalid script entry: {}", line))?;
            return Ok(Some(entry));
        }

        Ok(Some(Self::Command {
            command: line.to_string(),
        }))
    }
}
