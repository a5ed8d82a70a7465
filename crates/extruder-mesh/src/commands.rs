//! Named commands with `KEY=VALUE` parameters.
//!
//! Command lines look like `SET_EXTRUDER_MESH_MULTIPLIER MULTIPLIER=0.8`.
//! Command names and parameter keys are case-insensitive.

use std::collections::HashMap;

use tracing::info;

use crate::error::{MeshError, Result};

/// Handler invoked with the parsed parameters of its command.
pub type CommandHandler = Box<dyn Fn(&CommandParams) -> Result<()> + Send + Sync>;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandParams {
    command: String,
    params: HashMap<String, String>,
}

impl CommandParams {
    /// Parse `NAME KEY=VALUE ...`.
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let command = tokens
            .next()
            .map(str::to_ascii_uppercase)
            .ok_or_else(|| MeshError::UnknownCommand(String::new()))?;

        let mut params = HashMap::new();
        for token in tokens {
            let (key, value) = token.split_once('=').ok_or_else(|| {
                MeshError::invalid_parameter(token, "expected KEY=VALUE")
            })?;
            if key.is_empty() {
                return Err(MeshError::invalid_parameter(token, "missing parameter name"));
            }
            params.insert(key.to_ascii_uppercase(), value.to_string());
        }

        Ok(Self { command, params })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Raw value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(&key.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Finite float parameter, or `default` when absent.
    pub fn get_float(&self, key: &str, default: f64) -> Result<f64> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        let value: f64 = raw
            .parse()
            .map_err(|_| MeshError::invalid_parameter(key, format!("'{}' is not a number", raw)))?;
        if !value.is_finite() {
            return Err(MeshError::invalid_parameter(key, format!("'{}' is not finite", raw)));
        }
        Ok(value)
    }
}

/// Dispatch table from command name to handler.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, CommandHandler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; names are stored upper-case.
    pub fn register(&mut self, name: &str, handler: CommandHandler) -> Result<()> {
        let name = name.to_ascii_uppercase();
        if self.handlers.contains_key(&name) {
            return Err(MeshError::DuplicateCommand(name));
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.to_ascii_uppercase())
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse and run one command line.
    ///
    /// Blank lines and lines starting with `;` or `#` are ignored.
    pub fn run_script(&self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            return Ok(());
        }

        let params = CommandParams::parse(line)?;
        let handler = self
            .handlers
            .get(params.command())
            .ok_or_else(|| MeshError::UnknownCommand(params.command().to_string()))?;

        info!(command = params.command(), "running command");
        handler(&params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_parse_command_line() {
        let params = CommandParams::parse("set_extruder_mesh_multiplier multiplier=0.75 x=1").unwrap();
        assert_eq!(params.command(), "SET_EXTRUDER_MESH_MULTIPLIER");
        assert_eq!(params.get("MULTIPLIER"), Some("0.75"));
        assert_eq!(params.get("x"), Some("1"));
        assert_eq!(params.get("Y"), None);
    }

    #[test]
    fn test_parse_rejects_bare_token() {
        let err = CommandParams::parse("ENABLE_EXTRUDER_MESH NOW").unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { ref param, .. } if param == "NOW"));
        assert!(CommandParams::parse("CMD =3").is_err());
    }

    #[test]
    fn test_get_float() {
        let params = CommandParams::parse("CMD A=2.5 B=abc C=inf D=-0").unwrap();
        assert_eq!(params.get_float("A", 1.0).unwrap(), 2.5);
        assert_eq!(params.get_float("MISSING", 1.0).unwrap(), 1.0);
        assert!(params.get_float("B", 1.0).is_err());
        assert!(params.get_float("C", 1.0).is_err());
        assert_eq!(params.get_float("D", 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_registry_dispatch() {
        let seen = Arc::new(AtomicU64::new(0));
        let mut registry = CommandRegistry::new();

        let sink = seen.clone();
        registry
            .register(
                "Store_Value",
                Box::new(move |params: &CommandParams| {
                    let value = params.get_float("VALUE", 0.0)?;
                    sink.store(value.to_bits(), Ordering::Relaxed);
                    Ok(())
                }),
            )
            .unwrap();

        registry.run_script("STORE_VALUE VALUE=4.25").unwrap();
        assert_eq!(f64::from_bits(seen.load(Ordering::Relaxed)), 4.25);

        registry.run_script("   ").unwrap();
        registry.run_script("; comment").unwrap();
        assert!(registry.contains("store_value"));
        assert_eq!(registry.names(), vec!["STORE_VALUE"]);
    }

    #[test]
    fn test_registry_errors() {
        let mut registry = CommandRegistry::new();
        registry.register("NOOP", Box::new(|_| Ok(()))).unwrap();

        assert!(matches!(
            registry.register("noop", Box::new(|_| Ok(()))),
            Err(MeshError::DuplicateCommand(ref name)) if name == "NOOP"
        ));
        assert!(matches!(
            registry.run_script("MISSING"),
            Err(MeshError::UnknownCommand(ref name)) if name == "MISSING"
        ));
    }
}
