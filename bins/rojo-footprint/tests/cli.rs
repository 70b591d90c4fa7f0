//! End-to-end tests for the rojo-footprint binary.
//!
//! Every test runs with `--offline` or `--synthetic` so no network is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from any config file or override in the environment
fn footprint(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rojo-footprint").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("FOOTPRINT_POLICY")
        .env_remove("FOOTPRINT_NOMINATIM_URL")
        .env_remove("FOOTPRINT_USER_AGENT")
        .env_remove("FOOTPRINT_TIMEOUT_SECS");
    cmd
}

#[test]
fn rates_lists_every_mode() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .arg("rates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plane"))
        .stdout(predicate::str::contains("250"))
        .stdout(predicate::str::contains("purple"))
        .stdout(predicate::str::contains("Walk"));
}

#[test]
fn rates_as_json() {
    let dir = TempDir::new().unwrap();
    let output = footprint(&dir).args(["--format", "json", "rates"]).output().unwrap();
    assert!(output.status.success());

    let rates: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rates.as_array().unwrap().len(), 6);
    assert_eq!(rates[0]["vehicle"], "Car");
    assert_eq!(rates[0]["grams_per_km"], 120);
}

#[test]
fn estimate_offline_madrid_barcelona() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--offline", "estimate", "Madrid", "Barcelona", "-m", "train"])
        .assert()
        .success()
        .stdout(predicate::str::contains("505 km"))
        .stdout(predicate::str::contains("20.20 kg"));
}

#[test]
fn estimate_json_output() {
    let dir = TempDir::new().unwrap();
    let output = footprint(&dir)
        .args(["--offline", "-f", "json", "estimate", "Madrid", "Barcelona", "--mode", "plane"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entry: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entry["distance_km"], 505);
    assert_eq!(entry["co2_kg"], 126.25);
    assert_eq!(entry["vehicle"], "Plane");
    assert_eq!(entry["route"]["placeholder"], false);
}

#[test]
fn estimate_unknown_place_exits_4() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--offline", "estimate", "Atlantis", "Madrid"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Atlantis"));
}

#[test]
fn estimate_error_as_json_report() {
    let dir = TempDir::new().unwrap();
    let output = footprint(&dir)
        .args(["--offline", "-f", "json", "estimate", "Atlantis", "Madrid"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));

    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["code_str"], "E9001");
    assert_eq!(report["category"], "Geocoding");
    assert_eq!(report["message"], "Couldn't find one or both locations: Atlantis");
    assert!(report["suggestion"].is_string());
}

#[test]
fn estimate_blank_origin_exits_2() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--synthetic", "estimate", "  ", "Madrid"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("origin"));
}

#[test]
fn estimate_unknown_mode_exits_2() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--synthetic", "estimate", "Madrid", "Bilbao", "-m", "hovercraft"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("hovercraft"));
}

#[test]
fn missing_config_file_exits_3() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--config", "nope.toml", "rates"])
        .assert()
        .code(3);
}

#[test]
fn invalid_config_exits_3() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("rojo-footprint.toml"),
        "[estimator]\nmin_distance_km = 600\nmax_distance_km = 500\n",
    )
    .unwrap();

    footprint(&dir).arg("rates").assert().code(3);
}

#[test]
fn config_file_drives_synthetic_policy() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("rojo-footprint.toml"),
        "[estimator]\npolicy = \"synthetic\"\nmin_distance_km = 42\nmax_distance_km = 42\nseed = 1\n",
    )
    .unwrap();

    footprint(&dir)
        .args(["estimate", "Anywhere", "Elsewhere", "-m", "car"])
        .assert()
        .success()
        .stdout(predicate::str::contains("42 km (synthetic)"))
        .stdout(predicate::str::contains("5.04 kg"));
}

#[test]
fn config_places_extend_gazetteer() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("rojo-footprint.toml"),
        "[geocoder]\nprovider = \"static\"\n\n[geocoder.places]\n\"Toledo\" = [39.8628, -4.0273]\n",
    )
    .unwrap();

    footprint(&dir)
        .args(["distance", "Madrid", "Toledo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Madrid → Toledo: 67 km"));
}

#[test]
fn distance_offline() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--offline", "distance", "Madrid", "Barcelona"])
        .assert()
        .success()
        .stdout(predicate::str::contains("505 km"));
}

#[test]
fn session_accumulates_and_warns() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--offline", "session"])
        .write_stdin("add Madrid ; Barcelona ; plane\nadd Home ; ; walk\nadd Madrid ; Atlantis\nsummary\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added journey from Madrid to Barcelona"))
        .stdout(predicate::str::contains("0.13 tons"))
        .stdout(predicate::str::contains("1 journey"))
        .stderr(predicate::str::contains("destination"))
        .stderr(predicate::str::contains("Couldn't find one or both locations: Atlantis"));
}

#[test]
fn session_clear_resets_total() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--synthetic", "session"])
        .write_stdin("add A ; B ; car\nadd B ; C ; bus\nclear\nsummary\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all data"))
        .stdout(predicate::str::contains("0.00 tons"))
        .stdout(predicate::str::contains("over 0 journeys"));
}

#[test]
fn session_exports_geojson() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--offline", "session"])
        .write_stdin("add Madrid ; Paris ; train\nmap trips.geojson\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 markers"));

    let text = std::fs::read_to_string(dir.path().join("trips.geojson")).unwrap();
    let geojson: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(geojson["type"], "FeatureCollection");
    assert_eq!(geojson["features"].as_array().unwrap().len(), 2);
    assert_eq!(geojson["features"][0]["properties"]["color"], "blue");
}

#[test]
fn session_rejects_unknown_command() {
    let dir = TempDir::new().unwrap();
    footprint(&dir)
        .args(["--synthetic", "session"])
        .write_stdin("teleport Madrid\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command"));
}
