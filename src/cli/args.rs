//! CLI argument parsing with profile support

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{DetectionProfile, ProfilePreset};
use crate::error::Result;

#[derive(ValueEnum, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object per image
    Json,
    /// Row as written to the traffic table
    Record,
}

#[derive(Parser, Debug)]
#[command(name = "bridgeroad-traffic")]
#[command(version, about = "Detect road traffic severity from saved traffic map images")]
pub struct Args {
    /// Map image or directory of map images
    #[arg(short, long, required_unless_present = "list_profiles")]
    pub input: Option<PathBuf>,

    /// Detection profile name
    #[arg(short, long, default_value = "outbound")]
    pub profile: String,

    /// JSON file with one profile or a list of profiles
    #[arg(long, env = "BRIDGEROAD_PROFILE_FILE")]
    pub profile_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show per-point samples and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// List built-in profiles and exit
    #[arg(long)]
    pub list_profiles: bool,
}

impl Args {
    pub fn resolve_profile(&self) -> Result<DetectionProfile> {
        DetectionProfile::resolve(&self.profile, self.profile_file.as_deref())
    }
}

/// Print built-in profiles
pub fn print_profiles() {
    println!("Available detection profiles:\n");

    for preset in ProfilePreset::all() {
        let profile = DetectionProfile::from_preset(preset);
        println!("  {} - {}", preset.name(), preset.description());
        println!("    Total weight: {:.2}", profile.total_weight());
        for (i, point) in profile.points.iter().enumerate() {
            println!(
                "    #{} ({}, {}) weight {:.2}",
                i, point.x, point.y, point.weight
            );
        }
        println!();
    }
}
