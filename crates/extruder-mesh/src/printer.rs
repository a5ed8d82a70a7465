//! Host for the transform chain, command table and ready signal.

use tracing::info;

use crate::commands::{CommandHandler, CommandRegistry};
use crate::error::{MeshError, Result};
use crate::transform::{MoveTransform, Position, TransformChain};

/// One-shot callback run when the printer becomes ready.
pub type ReadyHandler = Box<dyn FnOnce(&mut TransformChain) -> Result<()> + Send>;

/// Link name of the planner at the bottom of every chain.
pub const PLANNER_LINK: &str = "toolhead";

/// Owns everything modules wire themselves into during startup.
///
/// Modules register commands and ready handlers while being loaded; once
/// every module is loaded, [`Printer::ready`] fires the handlers in
/// registration order so each sees the chain built by the ones before it.
pub struct Printer {
    chain: TransformChain,
    commands: CommandRegistry,
    ready_handlers: Vec<ReadyHandler>,
    ready: bool,
}

impl Printer {
    pub fn new(planner: Box<dyn MoveTransform>) -> Self {
        Self {
            chain: TransformChain::new(PLANNER_LINK, planner),
            commands: CommandRegistry::new(),
            ready_handlers: Vec::new(),
            ready: false,
        }
    }

    pub fn register_command(&mut self, name: &str, handler: CommandHandler) -> Result<()> {
        self.commands.register(name, handler)
    }

    /// Queue a handler for the ready signal.
    pub fn register_ready_handler(&mut self, handler: ReadyHandler) {
        self.ready_handlers.push(handler);
    }

    /// Fire the ready signal. Only the first call succeeds.
    pub fn ready(&mut self) -> Result<()> {
        if self.ready {
            return Err(MeshError::AlreadyReady);
        }
        self.ready = true;

        for handler in self.ready_handlers.drain(..) {
            handler(&mut self.chain)?;
        }

        info!(chain = ?self.chain.links(), "printer ready");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Run one command line against the registered commands.
    pub fn run_script(&self, line: &str) -> Result<()> {
        self.commands.run_script(line)
    }

    /// Send a move into the head of the chain.
    pub fn move_to(&mut self, position: Position, speed: f64) {
        self.chain.move_to(position, speed)
    }

    pub fn position(&self) -> Position {
        self.chain.position()
    }

    pub fn chain(&self) -> &TransformChain {
        &self.chain
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }
}
