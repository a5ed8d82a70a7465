//! End-to-end behaviour of the extruder mesh inside a printer's transform chain.

use std::sync::Arc;

use extruder_mesh::{
    AlwaysReady, ExtruderMesh, MeshConfig, MeshError, MeshTransform, MoveTransform, Position,
    Printer, ReadinessFlag, TransformChain, PLANNER_LINK,
};
use test_utils::{
    assert_approx_eq, assert_position_approx_eq, grid_with, plane_samples, ramp_samples,
    reference_config, reference_grid, MoveLog, RecordingTransform,
};

/// A printer with the reference mesh loaded and the ready signal fired.
fn ready_printer(readiness: Arc<ReadinessFlag>) -> (Printer, Arc<ExtruderMesh>, MoveLog) {
    let planner = RecordingTransform::new();
    let log = planner.log();
    let mut printer = Printer::new(Box::new(planner));
    let mesh = ExtruderMesh::load(&reference_config(), &mut printer, readiness).unwrap();
    printer.ready().unwrap();
    (printer, mesh, log)
}

// =============================================================================
// Reference example
// =============================================================================

#[test]
fn test_reference_lookups() {
    let grid = reference_grid();
    assert_approx_eq!(grid.lookup(5.0, 5.0), 15.0, 1e-12);
    assert_approx_eq!(grid.lookup(0.0, 0.0), 0.0, 1e-12);
    assert_approx_eq!(grid.lookup(10.0, 10.0), 30.0, 1e-12);
    assert_approx_eq!(grid.lookup(0.0, 10.0), 10.0, 1e-12);
}

#[test]
fn test_reference_move_with_multiplier() {
    let (mut printer, _mesh, log) = ready_printer(Arc::new(ReadinessFlag::new(true)));

    printer
        .run_script("SET_EXTRUDER_MESH_MULTIPLIER MULTIPLIER=2.0")
        .unwrap();
    printer.move_to(Position::new(5.0, 5.0, 0.0, 1.0), 40.0);

    let recorded = log.last().unwrap();
    assert_position_approx_eq!(recorded.position, Position::new(5.0, 5.0, 0.0, 31.0), 1e-9);
    assert_eq!(recorded.speed, 40.0);
}

// =============================================================================
// Installation and lifecycle
// =============================================================================

#[test]
fn test_mesh_is_transparent_before_ready() {
    let planner = RecordingTransform::new();
    let log = planner.log();
    let mut printer = Printer::new(Box::new(planner));
    let mesh = ExtruderMesh::load(&reference_config(), &mut printer, Arc::new(AlwaysReady)).unwrap();

    printer.move_to(Position::new(10.0, 10.0, 0.0, 1.0), 10.0);
    assert_eq!(log.last().unwrap().position.e, 1.0);
    assert!(!mesh.is_installed());

    printer.ready().unwrap();
    assert!(mesh.is_installed());
    assert_eq!(printer.chain().links(), &["extruder_mesh", PLANNER_LINK]);

    printer.move_to(Position::new(10.0, 10.0, 0.0, 1.0), 10.0);
    assert_approx_eq!(log.last().unwrap().position.e, 31.0, 1e-9);
}

#[test]
fn test_installs_on_top_of_existing_links() {
    let planner = RecordingTransform::new();
    let log = planner.log();
    let mut printer = Printer::new(Box::new(planner));

    // A link registered first, e.g. a z-offset transform.
    printer.register_ready_handler(Box::new(|chain: &mut TransformChain| {
        chain.set_move_transform("z_offset", |downstream| Box::new(ZOffset(0.3, downstream)))
    }));
    ExtruderMesh::load(&reference_config(), &mut printer, Arc::new(AlwaysReady)).unwrap();
    printer.ready().unwrap();

    assert_eq!(
        printer.chain().links(),
        &["extruder_mesh", "z_offset", PLANNER_LINK]
    );

    printer.move_to(Position::new(0.0, 10.0, 1.0, 0.0), 10.0);
    assert_position_approx_eq!(
        log.last().unwrap().position,
        Position::new(0.0, 10.0, 1.3, 10.0),
        1e-9
    );
}

struct ZOffset<T>(f64, T);

impl<T: MoveTransform> MoveTransform for ZOffset<T> {
    fn move_to(&mut self, position: Position, speed: f64) {
        let shifted = Position {
            z: position.z + self.0,
            ..position
        };
        self.1.move_to(shifted, speed)
    }

    fn position(&self) -> Position {
        self.1.position()
    }
}

#[test]
fn test_double_install_is_fatal() {
    let (mut printer, mesh, _log) = ready_printer(Arc::new(ReadinessFlag::new(true)));

    assert!(matches!(printer.ready(), Err(MeshError::AlreadyReady)));

    let mut chain = TransformChain::new("other", Box::new(RecordingTransform::new()));
    assert!(matches!(
        mesh.install(&mut chain),
        Err(MeshError::AlreadyInstalled(_))
    ));
    assert_eq!(chain.links(), &["other"]);
}

#[test]
fn test_misconfigured_mesh_never_registers() {
    let mut printer = Printer::new(Box::new(RecordingTransform::new()));
    let config = MeshConfig {
        points: vec![0.0; 3],
        ..reference_config()
    };

    let err = ExtruderMesh::load(&config, &mut printer, Arc::new(AlwaysReady)).err();
    assert!(matches!(err, Some(MeshError::Grid(_))));
    assert!(printer.commands().names().is_empty());

    printer.ready().unwrap();
    assert_eq!(printer.chain().links(), &[PLANNER_LINK]);
}

// =============================================================================
// Transparency and scaling
// =============================================================================

#[test]
fn test_disabled_mesh_forwards_moves_unchanged() {
    let (mut printer, _mesh, log) = ready_printer(Arc::new(ReadinessFlag::new(true)));
    printer.run_script("DISABLE_EXTRUDER_MESH").unwrap();

    let probes = [
        Position::new(5.0, 5.0, 0.2, 1.0),
        Position::new(-20.0, 400.0, 3.0, -2.5),
        Position::new(10.0, 0.0, 0.0, 1e6),
    ];
    for pos in probes {
        printer.move_to(pos, 12.0);
        assert_eq!(log.last().unwrap().position, pos);
    }

    printer.run_script("ENABLE_EXTRUDER_MESH").unwrap();
    printer.move_to(Position::new(10.0, 0.0, 0.0, 0.0), 12.0);
    assert_approx_eq!(log.last().unwrap().position.e, 20.0, 1e-9);
}

#[test]
fn test_not_ready_forwards_moves_unchanged() {
    let readiness = Arc::new(ReadinessFlag::new(false));
    let (mut printer, mesh, log) = ready_printer(readiness.clone());
    assert!(mesh.status().enabled);

    let pos = Position::new(5.0, 5.0, 0.2, 1.0);
    printer.move_to(pos, 12.0);
    assert_eq!(log.last().unwrap().position, pos);

    readiness.set(true);
    printer.move_to(pos, 12.0);
    assert_approx_eq!(log.last().unwrap().position.e, 16.0, 1e-9);
}

#[test]
fn test_offset_is_linear_in_multiplier() {
    let (mut printer, _mesh, log) = ready_printer(Arc::new(ReadinessFlag::new(true)));
    let pos = Position::new(2.5, 7.5, 0.0, 3.0);
    let base = reference_grid().lookup(2.5, 7.5);

    for multiplier in [0.0, 0.5, 1.0, 3.0, -1.0, -2.25] {
        printer
            .run_script(&format!("SET_EXTRUDER_MESH_MULTIPLIER MULTIPLIER={}", multiplier))
            .unwrap();
        printer.move_to(pos, 1.0);
        assert_approx_eq!(log.last().unwrap().position.e, 3.0 + base * multiplier, 1e-9);
    }
}

#[test]
fn test_position_query_is_never_corrected() {
    let planner = RecordingTransform::new();
    let reported = planner.reported_position();
    let mut printer = Printer::new(Box::new(planner));
    ExtruderMesh::load(&reference_config(), &mut printer, Arc::new(AlwaysReady)).unwrap();
    printer.ready().unwrap();

    *reported.lock().unwrap() = Position::new(10.0, 10.0, 0.0, 5.0);
    printer.move_to(Position::new(10.0, 10.0, 0.0, 5.0), 1.0);

    assert_eq!(printer.position(), Position::new(10.0, 10.0, 0.0, 5.0));
}

// =============================================================================
// Grid content flowing through the link
// =============================================================================

#[test]
fn test_link_preserves_storage_order() {
    let bounds = correction_grid::GridBounds::new(0.0, 200.0, 0.0, 100.0);
    let grid = Arc::new(grid_with(bounds, 3, 2, ramp_samples(3, 2)));
    let planner = RecordingTransform::new();
    let log = planner.log();
    let mut link = MeshTransform::new(
        grid,
        Arc::new(extruder_mesh::MeshControls::default()),
        Arc::new(AlwaysReady),
        planner,
    );

    // Node (ix=2, iy=1) holds 2001; its transpose would not exist.
    link.move_to(Position::new(200.0, 100.0, 0.0, 0.0), 1.0);
    assert_approx_eq!(log.last().unwrap().position.e, 2001.0, 1e-9);

    // Node (ix=1, iy=0) holds 1000.
    link.move_to(Position::new(100.0, 0.0, 0.0, 0.0), 1.0);
    assert_approx_eq!(log.last().unwrap().position.e, 1000.0, 1e-9);
}

#[test]
fn test_plane_is_reproduced_between_nodes() {
    // Plane 0.1 + 0.05*ix - 0.02*iy over a 30x30 domain sampled at 4x4.
    let bounds = correction_grid::GridBounds::new(0.0, 30.0, 0.0, 30.0);
    let grid = grid_with(bounds, 4, 4, plane_samples(4, 4, 0.1, 0.05, -0.02));

    for (x, y) in [(1.0, 2.0), (14.5, 22.25), (29.0, 0.5), (7.0, 7.0)] {
        let expected = 0.1 + 0.05 * (x / 10.0) - 0.02 * (y / 10.0);
        assert_approx_eq!(grid.lookup(x, y), expected, 1e-12);
    }
}
