//! Extruder mesh replay tool.
//!
//! Loads a mesh configuration, installs the mesh on top of a tracking
//! planner, replays a script of moves and commands, and prints every move
//! that reaches the planner as a JSON line on stdout.

mod planner;
mod script;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use extruder_mesh::{ExtruderMesh, MeshConfig, Position, Printer, ReadinessFlag};
use serde::Serialize;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use planner::{PlannedMove, TrackingPlanner};
use script::ScriptLine;

#[derive(Parser, Debug)]
#[command(name = "mesh-replay")]
#[command(about = "Replay moves through the extruder mesh and print what reaches the planner")]
struct Args {
    /// Mesh configuration file (YAML); the built-in calibration is used when omitted
    #[arg(short, long, env = "EXTRUDER_MESH_CONFIG")]
    config: Option<PathBuf>,

    /// Script to replay (reads stdin when omitted)
    script: Option<PathBuf>,

    /// Start with the extruder unable to move
    #[arg(long)]
    cold: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

/// One line of output.
#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Output<'a> {
    Planned { line: usize, planned: PlannedMove },
    Summary {
        mesh: &'a str,
        enabled: bool,
        multiplier: f64,
        position: Position,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let mut config = match &args.config {
        Some(path) => MeshConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => MeshConfig::default(),
    };
    config.apply_env_overrides()?;
    info!(mesh = %config.name, points = ?(config.points_x, config.points_y), "loaded configuration");

    let readiness = Arc::new(ReadinessFlag::new(!args.cold));
    let (tx, rx) = channel();
    let mut printer = Printer::new(Box::new(TrackingPlanner::new(Position::default(), tx)));
    let mesh = ExtruderMesh::load(&config, &mut printer, readiness.clone())?;
    printer.ready()?;

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.context("failed to read script")?;
        let Some(entry) = ScriptLine::parse(&line).with_context(|| format!("line {}", number))? else {
            continue;
        };

        match entry {
            ScriptLine::Move { target, speed } => {
                printer.move_to(Position::from(target), speed);
            }
            ScriptLine::Command { command } => {
                if let Err(e) = printer.run_script(&command) {
                    error!(line = number, command = %command, error = %e, "command failed");
                }
            }
            ScriptLine::Extruder { can_extrude } => {
                readiness.set(can_extrude);
                info!(line = number, can_extrude, "extruder readiness changed");
            }
        }

        drain(&rx, number, &mut out)?;
    }

    let status = mesh.status();
    write_line(
        &mut out,
        &Output::Summary {
            mesh: mesh.name(),
            enabled: status.enabled,
            multiplier: status.multiplier,
            position: printer.position(),
        },
    )?;

    Ok(())
}

fn drain(rx: &Receiver<PlannedMove>, line: usize, out: &mut impl Write) -> Result<()> {
    while let Ok(planned) = rx.try_recv() {
        write_line(out, &Output::Planned { line, planned })?;
    }
    Ok(())
}

fn write_line(out: &mut impl Write, output: &Output<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, output)?;
    writeln!(out)?;
    Ok(())
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr);

    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}
