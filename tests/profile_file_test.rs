// tests/profile_file_test.rs
//
// Profiles loaded from JSON files, through the library and the --profile-file flag.

mod test_utils;

use bridgeroad_traffic::testgen::SyntheticMap;
use bridgeroad_traffic::{detect, DetectionPoint, DetectionProfile, Traffic, TrafficError};
use test_utils::*;

const PROFILES_JSON: &str = r#"[
    {
        "name": "inbound",
        "description": "towards the city centre",
        "points": [
            {"x": 5, "y": 5, "weight": 0.5},
            {"x": 15, "y": 5, "weight": 0.5}
        ]
    },
    {
        "name": "junction",
        "points": [{"x": 10, "y": 15, "weight": 2.0}]
    }
]"#;

fn inbound_map() -> SyntheticMap {
    SyntheticMap::new(20, 20)
        .stroke(1)
        .traffic(5, 5, Traffic::Low)
        .traffic(15, 5, Traffic::Heavy)
        .traffic(10, 15, Traffic::Low)
}

#[test]
fn test_load_named_profile() {
    let dir = ScratchDir::new("profiles");
    let file = dir.join("profiles.json");
    std::fs::write(&file, PROFILES_JSON).unwrap();

    let inbound = DetectionProfile::load(&file, "inbound").unwrap();
    assert_eq!(inbound.points[1], DetectionPoint::new(15, 5, 0.5));

    let result = detect(&inbound_map().render(), &inbound).unwrap();
    assert_eq!(result.traffic, Traffic::Medium);

    // Weights may sum past 1.0: 1 * 2.0 = 2
    let junction = DetectionProfile::load(&file, "junction").unwrap();
    let result = detect(&inbound_map().render(), &junction).unwrap();
    assert_eq!(result.traffic, Traffic::Medium);
}

#[test]
fn test_missing_profile_name() {
    let dir = ScratchDir::new("profiles-missing");
    let file = dir.join("profiles.json");
    std::fs::write(&file, PROFILES_JSON).unwrap();

    let err = DetectionProfile::load(&file, "outbound").unwrap_err();
    assert!(matches!(err, TrafficError::UnknownProfile(name) if name == "outbound"));
}

#[test]
fn test_malformed_profile_file() {
    let dir = ScratchDir::new("profiles-bad");
    let file = dir.join("profiles.json");
    std::fs::write(&file, r#"{"name": "broken", "points": [{"x": -1}]}"#).unwrap();

    assert!(matches!(
        DetectionProfile::load(&file, "broken"),
        Err(TrafficError::ProfileParse { .. })
    ));
    assert!(matches!(
        DetectionProfile::load(&dir.join("absent.json"), "broken"),
        Err(TrafficError::ProfileFile { .. })
    ));
}

#[test]
fn test_cli_profile_file() {
    let dir = ScratchDir::new("cli-profile-file");
    let file = dir.join("profiles.json");
    let map = dir.join("map.png");
    std::fs::write(&file, PROFILES_JSON).unwrap();
    inbound_map().save(&map).unwrap();

    let output = run_bridgeroad(&map)
        .args(["--profile", "inbound", "--format", "record"])
        .arg("--profile-file")
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let lines = stdout_lines(&output);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["inbound_severity"], 2);
    assert_eq!(value["inbound_samples"], "1, 3");
}

#[test]
fn test_cli_profile_file_from_env() {
    let dir = ScratchDir::new("cli-profile-env");
    let file = dir.join("profiles.json");
    let map = dir.join("map.png");
    std::fs::write(&file, PROFILES_JSON).unwrap();
    inbound_map().save(&map).unwrap();

    let output = run_bridgeroad(&map)
        .args(["--profile", "junction", "--format", "json"])
        .env("BRIDGEROAD_PROFILE_FILE", &file)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["profile"], "junction");
    assert_eq!(value["traffic"], "medium");
}

/// Point the user config dir at `dir` and write `json` as its profiles.json.
///
/// Covers both the XDG location and the macOS one under `$HOME`.
#[cfg(unix)]
fn user_config(dir: &ScratchDir, json: &str) -> Vec<(&'static str, std::path::PathBuf)> {
    for base in [dir.path().to_path_buf(), dir.join("Library/Application Support")] {
        let app_dir = base.join("bridgeroad-traffic");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("profiles.json"), json).unwrap();
    }
    vec![
        ("XDG_CONFIG_HOME", dir.path().to_path_buf()),
        ("HOME", dir.path().to_path_buf()),
    ]
}

#[cfg(unix)]
#[test]
fn test_cli_profile_from_user_config_dir() {
    let config = ScratchDir::new("user-config");
    let env = user_config(
        &config,
        r#"{"name": "corner", "points": [{"x": 5, "y": 5, "weight": 1.0}]}"#,
    );

    let dir = ScratchDir::new("user-config-map");
    let map = dir.join("map.png");
    inbound_map().save(&map).unwrap();

    let output = run_bridgeroad(&map)
        .args(["--profile", "corner", "--format", "record"])
        .envs(env)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let lines = stdout_lines(&output);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["corner_severity"], 1);
    assert_eq!(value["corner_samples"], "1");
}

#[cfg(unix)]
#[test]
fn test_cli_profile_file_overrides_user_config_dir() {
    // The config-dir "inbound" only samples the heavy point
    let config = ScratchDir::new("user-config-override");
    let env = user_config(
        &config,
        r#"{"name": "inbound", "points": [{"x": 15, "y": 5, "weight": 1.0}]}"#,
    );

    let dir = ScratchDir::new("user-config-override-map");
    let file = dir.join("profiles.json");
    let map = dir.join("map.png");
    std::fs::write(&file, PROFILES_JSON).unwrap();
    inbound_map().save(&map).unwrap();

    let from_config = run_bridgeroad(&map)
        .args(["--profile", "inbound", "--format", "record"])
        .envs(env.clone())
        .output()
        .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&stdout_lines(&from_config)[0]).unwrap();
    assert_eq!(value["inbound_severity"], 3);

    let output = run_bridgeroad(&map)
        .args(["--profile", "inbound", "--format", "record"])
        .arg("--profile-file")
        .arg(&file)
        .envs(env)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_str(&stdout_lines(&output)[0]).unwrap();
    assert_eq!(value["inbound_severity"], 2);
    assert_eq!(value["inbound_samples"], "1, 3");
}
