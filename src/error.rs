//! Error types for traffic detection

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by profile handling and detection.
///
/// An unrecognised pixel colour is never an error; it classifies as
/// [`Traffic::Unknown`](crate::Traffic::Unknown).
#[derive(Debug, Error)]
pub enum TrafficError {
    /// A detection point lies outside the sampled image.
    #[error(
        "detection point #{index} at ({x}, {y}) is outside the {width}x{height} image"
    )]
    PointOutOfBounds {
        index: usize,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A detection point carries a NaN or infinite weight.
    #[error("detection point #{index} has a non-finite weight ({weight})")]
    InvalidWeight { index: usize, weight: f64 },

    /// No profile with the requested name exists.
    #[error("unknown detection profile: {0}")]
    UnknownProfile(String),

    #[error("failed to read profile file {path}: {source}")]
    ProfileFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile file {path}: {source}")]
    ProfileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The map image could not be opened or decoded.
    #[error("failed to load map image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, TrafficError>;
