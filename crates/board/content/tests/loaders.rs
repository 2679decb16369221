use std::fs;
use std::path::PathBuf;

use board_content::{ConfigLoader, ContentFactory, EncounterLoader, PrimitiveCatalog};
use board_core::{
    CommandPolicy, Easing, Elevation, PerspectiveCommand, Placement, Timestamp, Viewport,
    ViewportConfig,
};
use tempfile::TempDir;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

fn placement(notation: &str) -> Placement {
    notation.parse().expect("valid notation")
}

#[test]
fn test_bundled_courtyard_builds_a_viewport() {
    // ================================================================
    // Load content shipped with the workspace
    // ================================================================
    let factory = ContentFactory::new(data_dir());
    let config = factory
        .load_viewport_config()
        .expect("bundled viewport.toml parses");
    assert_eq!(config, ViewportConfig::default());

    assert!(
        factory
            .encounter_names()
            .expect("encounters directory is readable")
            .contains(&"courtyard".to_owned())
    );
    let encounter = factory
        .load_encounter("courtyard")
        .expect("bundled courtyard parses");
    assert_eq!(encounter.board.initial_cursor(), Some(placement("d1")));
    assert!(!encounter.board.shape.is_occupiable(placement("d5")));

    // Maneuvers from the JSON payload join those in the RON file.
    assert!(encounter.maneuver(placement("d1"), "regular").is_some());
    assert!(encounter.maneuver(placement("c2"), "opening").is_some());

    // ================================================================
    // Drive a viewport with it
    // ================================================================
    let mut viewport = Viewport::new(config);
    viewport
        .create_encounter(encounter, &PrimitiveCatalog::new())
        .expect("courtyard builds");
    assert_eq!(viewport.cursor(), Some(placement("d1")));

    // The pool blocks the d-file going up.
    for _ in 0..4 {
        viewport.move_cursor_named("up", None).expect("encounter exists");
    }
    assert_eq!(viewport.cursor(), Some(placement("d4")));

    assert!(viewport.change_perspective(PerspectiveCommand::Up, Timestamp(0)));
    assert!(!viewport.tick(Timestamp(1000)));
    assert_eq!(viewport.perspective().beta, Elevation::Mid);
}

#[test]
fn test_config_overrides_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("viewport.toml");
    fs::write(
        &path,
        r#"
[camera]
policy = "queue"
transition_ms = 250
easing = "linear"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(config.camera.policy, CommandPolicy::Queue);
    assert_eq!(config.camera.transition_ms, 250);
    assert_eq!(config.camera.easing, Easing::Linear);
    // Untouched sections keep their defaults.
    assert_eq!(config.camera.fov_degrees, 45.0);
    assert_eq!(config.movement_options, ViewportConfig::default().movement_options);
}

#[test]
fn test_invalid_home_pose_is_rejected() {
    let error = ConfigLoader::from_str("[camera]\nhome = { alpha = 30, beta = 25, radius = 7.0 }\n")
        .unwrap_err();
    assert!(error.to_string().contains("Failed to parse viewport config"));
}

#[test]
fn test_encounter_errors_name_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.ron");
    fs::write(&path, "(name: \"Broken\", board: (shape: [\"21\", \"1\", \" a\"]))").unwrap();

    let error = EncounterLoader::load(&path).unwrap_err().to_string();
    assert!(error.contains("Failed to parse encounter RON"));
    assert!(error.contains("broken.ron"));

    let missing = EncounterLoader::load(&temp_dir.path().join("missing.ron")).unwrap_err();
    assert!(missing.to_string().contains("Failed to read file"));
}

#[test]
fn test_factory_merges_service_maneuvers() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("encounters")).unwrap();
    fs::create_dir_all(temp_dir.path().join("maneuvers")).unwrap();
    fs::write(
        temp_dir.path().join("encounters/duel.ron"),
        r#"(
            name: "Duel",
            board: (shape: ["211", "111", " ab"]),
            movement_options: {
                "a1": [(name: "regular", options: [(placement: "a2", type: unoccupied)])],
            },
        )"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("maneuvers/duel.json"),
        r#"{ "a1": [{ "name": "regular", "options": [
            { "placement": "b2", "type": "occupied" }
        ] }] }"#,
    )
    .unwrap();

    let factory = ContentFactory::new(temp_dir.path());
    let encounter = factory.load_encounter("duel").unwrap();
    let regular = encounter.maneuver(placement("a1"), "regular").unwrap();
    assert_eq!(regular.options.len(), 1);
    assert_eq!(regular.options[0].placement, placement("b2"));
    assert_eq!(factory.encounter_names().unwrap(), vec!["duel".to_owned()]);
}

#[test]
fn test_factory_rejects_service_options_off_the_shape() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("encounters")).unwrap();
    fs::create_dir_all(temp_dir.path().join("maneuvers")).unwrap();
    fs::write(
        temp_dir.path().join("encounters/walled.ron"),
        r#"(
            name: "Walled",
            board: (shape: ["210", "111", " ab"]),
        )"#,
    )
    .unwrap();
    // b2 is a wall on this board.
    fs::write(
        temp_dir.path().join("maneuvers/walled.json"),
        r#"{ "a1": { "regular": { "name": "regular", "options": [
            { "placement": "b2", "type": "unoccupied" }
        ] } } }"#,
    )
    .unwrap();

    let factory = ContentFactory::new(temp_dir.path());
    let error = factory.load_encounter("walled").unwrap_err().to_string();
    assert!(error.contains("targets b2"));
    assert!(error.contains("walled.json"));
}
