//! Loading mesh configuration from YAML files.

use std::io::Write;
use std::sync::Arc;

use extruder_mesh::{AlwaysReady, ExtruderMesh, MeshConfig, MeshError, Position, Printer};
use tempfile::NamedTempFile;
use test_utils::{assert_approx_eq, RecordingTransform};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_config_file_and_drive_named_commands() {
    let file = write_config(
        r#"
name: left_mesh
min_x: -50
max_x: 50
min_y: 0
max_y: 100
points_x: 2
points_y: 3
points: [0.0, 0.1, 0.2, 1.0, 1.1, 1.2]
enabled: false
"#,
    );

    let config = MeshConfig::from_file(file.path()).unwrap();
    assert_eq!(config.name, "left_mesh");
    assert_eq!(config.multiplier, 1.0);

    let planner = RecordingTransform::new();
    let log = planner.log();
    let mut printer = Printer::new(Box::new(planner));
    let mesh = ExtruderMesh::load(&config, &mut printer, Arc::new(AlwaysReady)).unwrap();
    printer.ready().unwrap();

    assert_eq!(
        printer.commands().names(),
        vec!["DISABLE_LEFT_MESH", "ENABLE_LEFT_MESH", "SET_LEFT_MESH_MULTIPLIER"]
    );
    assert!(!mesh.status().enabled);

    printer.move_to(Position::new(50.0, 50.0, 0.0, 0.0), 1.0);
    assert_eq!(log.last().unwrap().position.e, 0.0);

    printer.run_script("enable_left_mesh").unwrap();
    printer.move_to(Position::new(50.0, 50.0, 0.0, 0.0), 1.0);
    assert_approx_eq!(log.last().unwrap().position.e, 1.1, 1e-9);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MeshConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, MeshError::Io(_)));
}

#[test]
fn test_malformed_yaml_is_rejected() {
    let file = write_config("points_x: [not, a, number]\n");
    let err = MeshConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, MeshError::Yaml(_)));
}

#[test]
fn test_config_round_trips_through_yaml() {
    let config = MeshConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert_eq!(MeshConfig::from_yaml_str(&yaml).unwrap(), config);
}
