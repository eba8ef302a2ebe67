//! bridgeroad-traffic - Detect road traffic severity from map images
//!
//! Samples fixed control points on a traffic-overlay map image, classifies
//! each pixel against the map legend and folds the samples into one
//! weighted verdict.
//!
//! ## Module Structure
//!
//! - `core` - Legend lookup, image surfaces and the weighted aggregation
//! - `config` - Detection profiles (built-in presets and JSON files)
//! - `detection` - Result and storage record types
//! - `cli` - Command-line interface
//! - `testgen` - Synthetic map generation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bridgeroad_traffic::{MapAnalyzer, TrafficRecord};
//!
//! let analyzer = MapAnalyzer::new("map.png")?;
//! let outbound = analyzer.analyze()?;
//!
//! println!("Outbound: {} ({})", outbound.traffic, outbound.samples_string());
//! let record = TrafficRecord::new(&outbound, chrono::Utc::now());
//! ```
//!
//! ## Legend
//!
//! | Level      | Severity | Colours (RGB)                   |
//! |------------|----------|---------------------------------|
//! | Unknown    | -1       | anything not listed below       |
//! | None       | 0        | (249,249,249), (255,255,255)    |
//! | Low        | 1        | (132,202,80)                    |
//! | Medium     | 2        | (240,125,2)                     |
//! | Heavy      | 3        | (230,0,0)                       |
//! | VeryHeavy  | 4        | (158,19,19)                     |
//!
//! Matching is exact, alpha included. Unknown samples are left out of the
//! weighted sum without renormalising the other weights.

// Legend lookup and aggregation
pub mod core;

// Command-line interface
pub mod cli;

// Detection profiles
pub mod config;

// Result types
pub mod detection;

pub mod error;

// Synthetic maps for tests
pub mod testgen;

pub use config::{DetectionPoint, DetectionProfile, ProfileBuilder, ProfilePreset};
pub use self::core::{
    detect, AnalyzerBuilder, ColorSurface, MapAnalyzer, Traffic, TrafficDetector,
};
pub use detection::{DetectedTraffic, TrafficRecord};
pub use error::{Result, TrafficError};
