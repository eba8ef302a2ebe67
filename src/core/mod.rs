//! Core classification and aggregation modules

pub mod analyzer;
pub mod detector;
pub mod surface;
pub mod traffic;

pub use analyzer::{load_map, AnalyzerBuilder, MapAnalyzer};
pub use detector::{aggregate, check_points, detect, sample_points, TrafficDetector};
pub use surface::{rgba_view, ColorSurface, SolidSurface};
pub use traffic::{color_code, rgb_code, Traffic};
