//! Smoke test over the sample files shipped with the repository.

use std::path::PathBuf;

use ef_app::{check_data, load_session_config, run_session_config};
use ef_core::{Tolerances, nearly_equal};
use ef_io::parse_table;
use ef_model::ModelRegistry;

fn repo_root() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // repo root
    path
}

#[test]
fn sample_data_loads() {
    let path = repo_root().join("data").join("data1.txt");
    if !path.exists() {
        eprintln!("Skipping test: sample data not found at {:?}", path);
        return;
    }

    let summary = check_data(&path).expect("sample data should load");
    assert_eq!(summary.periods, 8);
    assert_eq!(summary.years.first(), Some(&2015.0));
    assert!(summary.series.iter().any(|s| s == "twKI"));
}

#[test]
fn sample_session_runs() {
    let path = repo_root().join("sessions").join("gdp.yaml");
    if !path.exists() {
        eprintln!("Skipping test: sample session not found at {:?}", path);
        return;
    }

    let config = load_session_config(&path).expect("session file should parse");
    let registry = ModelRegistry::builtin().unwrap();
    let report = run_session_config(&config, &registry).expect("session should run");

    let table = parse_table(&report).expect("report should re-parse");
    let names: Vec<&str> = table.names().collect();
    assert_eq!(names[10], "PKB");
    assert_eq!(names.last(), Some(&"idx"));

    let idx = table.get("idx").unwrap();
    assert!(nearly_equal(idx[0], 100.0, Tolerances::default()));
    let dpkb = table.get("dPKB").unwrap();
    assert_eq!(dpkb[0], 1.0);
}
