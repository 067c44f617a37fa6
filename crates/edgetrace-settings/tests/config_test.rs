use edgetrace_camtools::EdgeMethod;
use edgetrace_settings::{Config, SettingsError};
use edgetrace_tracer::{TraversalPolicy, VisitMarking};

fn customized() -> Config {
    let mut config = Config::default();
    config.tracer.max_radius = 8;
    config.tracer.policy = TraversalPolicy::BreadthFirst;
    config.tracer.visit_marking = VisitMarking::Point;
    config.tracer.max_nodes = Some(5000);
    config.edges.method = EdgeMethod::Brightness;
    config.edges.sharpen = false;
    config.gcode.pixels_per_mm = 4.0;
    config.gcode.cut_z = -0.25;
    config
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edgetrace.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"policy\": \"breadth-first\""));
}

#[test]
fn test_toml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("edgetrace.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("[tracer]"));
    assert!(raw.contains("visit_marking = \"point\""));
}

#[test]
fn test_partial_toml_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[tracer]\nmax_radius = 6\n\n[edges]\nthreshold = 200.0\n").unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.tracer.max_radius, 6);
    assert_eq!(loaded.tracer.policy, TraversalPolicy::DepthFirst);
    assert_eq!(loaded.tracer.max_nodes, None);
    assert_eq!(loaded.edges.threshold, 200.0);
    assert!(loaded.edges.sharpen);
    assert_eq!(loaded.gcode, Config::default().gcode);
}

#[test]
fn test_invalid_file_contents_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[tracer]\nmax_radius = 500\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Config(_))
    ));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
    assert_eq!(loaded, Config::default());
}
