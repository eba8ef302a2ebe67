#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use uuid::Uuid;

use bridgeroad_traffic::testgen::SyntheticMap;
use bridgeroad_traffic::{DetectionProfile, Traffic};

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bridgeroad-traffic"))
}

pub fn run_bridgeroad<P: AsRef<std::ffi::OsStr>>(input: P) -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.arg("--input").arg(input);
    // Keep a developer's own profile file out of the runs
    cmd.env_remove("BRIDGEROAD_PROFILE_FILE");
    cmd
}

pub fn run_json_analysis<P: AsRef<std::ffi::OsStr>>(input: P) -> Output {
    run_bridgeroad(input)
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to execute with json format")
}

pub fn run_record_analysis<P: AsRef<std::ffi::OsStr>>(input: P) -> Output {
    run_bridgeroad(input)
        .arg("--format")
        .arg("record")
        .output()
        .expect("Failed to execute with record format")
}

/// Fresh scratch directory under the system temp dir
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!("bridgeroad-{}-{}", label, Uuid::new_v4()));
        fs::create_dir_all(&path).expect("Failed to create scratch dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Write a map that paints `levels` under the outbound control points
pub fn write_outbound_map(path: &Path, levels: &[Traffic]) {
    SyntheticMap::default()
        .with_profile(&DetectionProfile::default(), levels)
        .expect("levels must match the outbound profile")
        .save(path)
        .expect("Failed to write synthetic map");
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}
