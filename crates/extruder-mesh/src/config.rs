//! Configuration for the extruder mesh.

use std::path::Path;

use correction_grid::{CorrectionGrid, GridBounds, GridResolution};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Environment variable overriding [`MeshConfig::enabled`].
pub const ENV_ENABLED: &str = "EXTRUDER_MESH_ENABLED";

/// Environment variable overriding [`MeshConfig::multiplier`].
pub const ENV_MULTIPLIER: &str = "EXTRUDER_MESH_MULTIPLIER";

/// Calibration table measured on a 300x300 bed, x index varying slowest.
const DEFAULT_POINTS: [f64; 25] = [
    0.401805, 0.462200, 0.470535, 0.471648, 0.436907, //
    0.305142, 0.350132, 0.368730, 0.367385, 0.334862, //
    0.190713, 0.221540, 0.235570, 0.233145, 0.209967, //
    0.089688, 0.079233, 0.076223, 0.078053, 0.081463, //
    0.044498, 0.019547, 0.000000, 0.005705, 0.029800,
];

/// Configuration for one extruder mesh instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Section name; command names are derived from it.
    pub name: String,

    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,

    /// Sample points along x.
    pub points_x: usize,

    /// Sample points along y.
    pub points_y: usize,

    /// Flat sample table, `points[ix * points_y + iy]`.
    pub points: Vec<f64>,

    /// Scale applied to every offset at startup.
    pub multiplier: f64,

    /// Whether corrections are applied at startup.
    pub enabled: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            name: "extruder_mesh".to_string(),
            min_x: 0.0,
            max_x: 300.0,
            min_y: 0.0,
            max_y: 300.0,
            points_x: 5,
            points_y: 5,
            points: DEFAULT_POINTS.to_vec(),
            multiplier: 1.0,
            enabled: true,
        }
    }
}

impl MeshConfig {
    /// Parse a YAML document. Missing fields keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Apply `EXTRUDER_MESH_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_ENABLED) {
            self.enabled = match val.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(MeshError::config(format!(
                        "{} must be a boolean, got '{}'",
                        ENV_ENABLED, val
                    )))
                }
            };
        }

        if let Some(val) = lookup(ENV_MULTIPLIER) {
            self.multiplier = val.trim().parse().map_err(|_| {
                MeshError::config(format!("{} must be a number, got '{}'", ENV_MULTIPLIER, val))
            })?;
        }

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(MeshError::config(format!(
                "name '{}' must be non-empty and contain only letters, digits and underscores",
                self.name
            )));
        }

        if !self.multiplier.is_finite() {
            return Err(MeshError::config("multiplier must be finite"));
        }

        self.build_grid().map(|_| ())
    }

    /// Build the correction grid described by this configuration.
    pub fn build_grid(&self) -> Result<CorrectionGrid> {
        Ok(CorrectionGrid::new(
            self.bounds(),
            self.resolution(),
            self.points.clone(),
        )?)
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.min_x, self.max_x, self.min_y, self.max_y)
    }

    pub fn resolution(&self) -> GridResolution {
        GridResolution::new(self.points_x, self.points_y)
    }

    /// `ENABLE_<NAME>`
    pub fn enable_command(&self) -> String {
        format!("ENABLE_{}", self.name.to_ascii_uppercase())
    }

    /// `DISABLE_<NAME>`
    pub fn disable_command(&self) -> String {
        format!("DISABLE_{}", self.name.to_ascii_uppercase())
    }

    /// `SET_<NAME>_MULTIPLIER`
    pub fn multiplier_command(&self) -> String {
        format!("SET_{}_MULTIPLIER", self.name.to_ascii_uppercase())
    }
}
