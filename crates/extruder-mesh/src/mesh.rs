//! Loading and installing an extruder mesh.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use correction_grid::CorrectionGrid;
use tracing::info;

use crate::commands::{CommandParams, CommandRegistry};
use crate::config::MeshConfig;
use crate::controls::{MeshControls, MeshStatus};
use crate::error::{MeshError, Result};
use crate::offset::MeshTransform;
use crate::printer::Printer;
use crate::readiness::ExtrusionReadiness;
use crate::transform::TransformChain;

/// A configured extruder mesh, installed at most once.
pub struct ExtruderMesh {
    name: String,
    grid: Arc<CorrectionGrid>,
    controls: Arc<MeshControls>,
    readiness: Arc<dyn ExtrusionReadiness>,
    installed: AtomicBool,
}

impl ExtruderMesh {
    /// Validate `config` and build the mesh without wiring it anywhere.
    pub fn new(config: &MeshConfig, readiness: Arc<dyn ExtrusionReadiness>) -> Result<Self> {
        config.validate()?;
        let grid = config.build_grid()?;

        Ok(Self {
            name: config.name.clone(),
            grid: Arc::new(grid),
            controls: Arc::new(MeshControls::new(config.enabled, config.multiplier)),
            readiness,
            installed: AtomicBool::new(false),
        })
    }

    /// Build the mesh, register its commands, and defer installation into
    /// the transform chain until the printer signals ready.
    pub fn load(
        config: &MeshConfig,
        printer: &mut Printer,
        readiness: Arc<dyn ExtrusionReadiness>,
    ) -> Result<Arc<Self>> {
        let mesh = Arc::new(Self::new(config, readiness)?);

        mesh.register_commands(config, printer.commands_mut())?;

        let on_ready = mesh.clone();
        printer.register_ready_handler(Box::new(move |chain: &mut TransformChain| {
            on_ready.install(chain)
        }));

        Ok(mesh)
    }

    /// Register `ENABLE_<NAME>`, `DISABLE_<NAME>` and `SET_<NAME>_MULTIPLIER`.
    pub fn register_commands(
        &self,
        config: &MeshConfig,
        registry: &mut CommandRegistry,
    ) -> Result<()> {
        let controls = self.controls.clone();
        let name = self.name.clone();
        registry.register(
            &config.enable_command(),
            Box::new(move |_: &CommandParams| {
                controls.set_enabled(true);
                info!(mesh = %name, "extruder mesh enabled");
                Ok(())
            }),
        )?;

        let controls = self.controls.clone();
        let name = self.name.clone();
        registry.register(
            &config.disable_command(),
            Box::new(move |_: &CommandParams| {
                controls.set_enabled(false);
                info!(mesh = %name, "extruder mesh disabled");
                Ok(())
            }),
        )?;

        let controls = self.controls.clone();
        let name = self.name.clone();
        registry.register(
            &config.multiplier_command(),
            Box::new(move |params: &CommandParams| {
                let multiplier = params.get_float("MULTIPLIER", 1.0)?;
                controls.set_multiplier(multiplier);
                info!(mesh = %name, multiplier, "extruder mesh multiplier set");
                Ok(())
            }),
        )?;

        Ok(())
    }

    /// Put this mesh on top of the current chain.
    pub fn install(&self, chain: &mut TransformChain) -> Result<()> {
        if self.installed.swap(true, Ordering::SeqCst) {
            return Err(MeshError::AlreadyInstalled(self.name.clone()));
        }

        let grid = self.grid.clone();
        let controls = self.controls.clone();
        let readiness = self.readiness.clone();
        let result = chain.set_move_transform(&self.name, move |downstream| {
            Box::new(MeshTransform::new(grid, controls, readiness, downstream))
        });

        if result.is_err() {
            self.installed.store(false, Ordering::SeqCst);
            return result;
        }

        info!(
            mesh = %self.name,
            points = ?(self.grid.resolution().points_x, self.grid.resolution().points_y),
            min = self.grid.min_sample(),
            max = self.grid.max_sample(),
            "extruder mesh installed"
        );
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &CorrectionGrid {
        &self.grid
    }

    pub fn controls(&self) -> &MeshControls {
        &self.controls
    }

    pub fn status(&self) -> MeshStatus {
        self.controls.status()
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }
}
