//! Error types for the extruder mesh.

use correction_grid::GridError;
use thiserror::Error;

/// Errors raised while configuring, installing or commanding the mesh.
///
/// Moves never fail; everything here surfaces at configuration time or
/// from the command surface.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The correction grid was rejected.
    #[error("invalid correction grid: {0}")]
    Grid(#[from] GridError),

    /// A link with this name already sits in the transform chain.
    #[error("move transform '{0}' is already installed")]
    AlreadyInstalled(String),

    /// The ready signal was fired a second time.
    #[error("printer is already ready")]
    AlreadyReady,

    /// No handler is registered under this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A handler is already registered under this command name.
    #[error("command {0} is already registered")]
    DuplicateCommand(String),

    /// A command parameter could not be interpreted.
    #[error("invalid value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// Configuration values are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid YAML for this schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MeshError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for extruder mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
