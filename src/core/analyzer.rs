// src/core/analyzer.rs
//
// High-level API: load a saved map image and run detection profiles on it.

use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};

use super::detector::detect;
use crate::config::{DetectionProfile, ProfilePreset};
use crate::detection::DetectedTraffic;
use crate::error::{Result, TrafficError};

/// Builder for MapAnalyzer configuration
pub struct AnalyzerBuilder {
    profiles: Vec<DetectionProfile>,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    pub fn profile(mut self, profile: DetectionProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn preset(self, preset: ProfilePreset) -> Self {
        self.profile(DetectionProfile::from_preset(preset))
    }

    /// Load the map and check every profile's points against its size.
    pub fn build<P: AsRef<Path>>(self, path: P) -> Result<MapAnalyzer> {
        let image = load_map(path.as_ref())?;
        let analyzer = self.build_from_image(path, image);
        let (width, height) = analyzer.image.dimensions();
        for profile in &analyzer.profiles {
            profile.check_bounds(width, height)?;
        }
        Ok(analyzer)
    }

    /// Analyse an image that is already in memory.
    pub fn build_from_image<P: AsRef<Path>>(mut self, path: P, image: DynamicImage) -> MapAnalyzer {
        if self.profiles.is_empty() {
            self.profiles.push(DetectionProfile::default());
        }
        MapAnalyzer {
            path: path.as_ref().to_path_buf(),
            image,
            profiles: self.profiles,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a map image from disk
pub fn load_map(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| TrafficError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// A decoded map image plus the profiles to run against it
pub struct MapAnalyzer {
    path: PathBuf,
    image: DynamicImage,
    profiles: Vec<DetectionProfile>,
}

impl MapAnalyzer {
    /// Analyzer for the default (outbound) profile
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        AnalyzerBuilder::new().build(path)
    }

    pub fn with_profile<P: AsRef<Path>>(path: P, profile: DetectionProfile) -> Result<Self> {
        AnalyzerBuilder::new().profile(profile).build(path)
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Run the first configured profile
    pub fn analyze(&self) -> Result<DetectedTraffic> {
        detect(&self.image, &self.profiles[0])
    }

    /// Run every configured profile, in order
    pub fn analyze_all(&self) -> Result<Vec<DetectedTraffic>> {
        self.profiles
            .iter()
            .map(|profile| detect(&self.image, profile))
            .collect()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profiles(&self) -> &[DetectionProfile] {
        &self.profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileBuilder;
    use crate::core::Traffic;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_defaults_to_outbound() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            600,
            300,
            Rgba([255, 255, 255, 255]),
        ));
        let analyzer = AnalyzerBuilder::new().build_from_image("map.png", image);
        assert_eq!(analyzer.profiles().len(), 1);

        let result = analyzer.analyze().unwrap();
        assert_eq!(result.profile, "outbound");
        assert_eq!(result.traffic, Traffic::None);
        assert_eq!(analyzer.path(), Path::new("map.png"));
    }

    #[test]
    fn test_analyze_all_keeps_profile_order() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            600,
            300,
            Rgba([240, 125, 2, 255]),
        ));
        let corner = ProfileBuilder::new().name("corner").point(0, 0, 1.0).build();
        let analyzer = MapAnalyzer::builder()
            .profile(corner)
            .preset(ProfilePreset::Outbound)
            .build_from_image("map.png", image);

        let results = analyzer.analyze_all().unwrap();
        let names: Vec<_> = results.iter().map(|r| r.profile.as_str()).collect();
        assert_eq!(names, vec!["corner", "outbound"]);
        assert!(results.iter().all(|r| r.traffic == Traffic::Medium));
    }

    #[test]
    fn test_small_map_is_out_of_bounds() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(100, 100));
        let analyzer = AnalyzerBuilder::new().build_from_image("tiny.png", image);
        assert!(matches!(
            analyzer.analyze(),
            Err(TrafficError::PointOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = MapAnalyzer::new("/definitely/not/here.png").err().unwrap();
        assert!(matches!(err, TrafficError::ImageLoad { .. }));
    }
}
