// src/config/profiles.rs
//
// Detection profiles: which map pixels to sample and how much each one counts

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::detector::check_points;
use crate::error::{Result, TrafficError};

/// A sampled pixel and its weight in the overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionPoint {
    pub x: u32,
    pub y: u32,
    /// Weights are not required to sum to 1.0 across a profile
    pub weight: f64,
}

impl DetectionPoint {
    pub const fn new(x: u32, y: u32, weight: f64) -> Self {
        Self { x, y, weight }
    }
}

/// Built-in profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfilePreset {
    /// Bridge Road, traffic leaving the city centre
    Outbound,
    /// User-defined points
    Custom,
}

impl ProfilePreset {
    pub fn all() -> Vec<Self> {
        vec![Self::Outbound]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Outbound => "outbound",
            Self::Custom => "custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Outbound => "Bridge Road outbound carriageway, six control points",
            Self::Custom => "User-defined detection points",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "outbound" => Some(Self::Outbound),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Control points along the outbound carriageway, in map pixels.
const OUTBOUND_POINTS: [DetectionPoint; 6] = [
    DetectionPoint::new(458, 10, 0.1),
    DetectionPoint::new(400, 85, 0.3),
    DetectionPoint::new(374, 114, 0.1),
    DetectionPoint::new(316, 160, 0.1),
    DetectionPoint::new(274, 212, 0.1),
    DetectionPoint::new(230, 288, 0.3),
];

/// A named, ordered set of detection points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "custom_preset")]
    pub base_preset: ProfilePreset,
    pub points: Vec<DetectionPoint>,
}

fn custom_preset() -> ProfilePreset {
    ProfilePreset::Custom
}

impl Default for DetectionProfile {
    fn default() -> Self {
        Self::from_preset(ProfilePreset::Outbound)
    }
}

impl DetectionProfile {
    pub fn from_preset(preset: ProfilePreset) -> Self {
        match preset {
            ProfilePreset::Outbound => Self::outbound(),
            ProfilePreset::Custom => Self {
                name: "custom".to_string(),
                description: preset.description().to_string(),
                base_preset: ProfilePreset::Custom,
                points: Vec::new(),
            },
        }
    }

    fn outbound() -> Self {
        Self {
            name: "outbound".to_string(),
            description: ProfilePreset::Outbound.description().to_string(),
            base_preset: ProfilePreset::Outbound,
            points: OUTBOUND_POINTS.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.points.iter().map(|p| p.weight).sum()
    }

    /// Reject NaN and infinite weights.
    pub fn validate(&self) -> Result<()> {
        for (index, point) in self.points.iter().enumerate() {
            if !point.weight.is_finite() {
                return Err(TrafficError::InvalidWeight {
                    index,
                    weight: point.weight,
                });
            }
        }
        Ok(())
    }

    /// Fail on the first point that falls outside a `width` x `height` image.
    pub fn check_bounds(&self, width: u32, height: u32) -> Result<()> {
        check_points(&self.points, width, height)
    }

    /// Load a single profile, or pick one by name from a list, out of a JSON file.
    pub fn load(path: &Path, name: &str) -> Result<Self> {
        let profiles = ProfileSet::load(path)?;
        profiles
            .find(name)
            .cloned()
            .ok_or_else(|| TrafficError::UnknownProfile(name.to_string()))
    }

    /// Resolve a profile by name: explicit file, then the user config dir, then presets.
    pub fn resolve(name: &str, profile_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = profile_file {
            return Self::load(path, name);
        }

        if let Some(path) = user_profile_path().filter(|p| p.exists()) {
            let profiles = ProfileSet::load(&path)?;
            if let Some(profile) = profiles.find(name) {
                log::debug!("Using profile '{}' from {}", name, path.display());
                return Ok(profile.clone());
            }
        }

        match ProfilePreset::from_name(name) {
            Some(ProfilePreset::Custom) | None => {
                Err(TrafficError::UnknownProfile(name.to_string()))
            }
            Some(preset) => Ok(Self::from_preset(preset)),
        }
    }
}

/// Contents of a profile file: either one profile or a list of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileSet {
    Many(Vec<DetectionProfile>),
    One(DetectionProfile),
}

impl ProfileSet {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| TrafficError::ProfileFile {
            path: path.to_path_buf(),
            source,
        })?;
        let set: Self = serde_json::from_str(&json).map_err(|source| TrafficError::ProfileParse {
            path: path.to_path_buf(),
            source,
        })?;
        for profile in set.profiles() {
            profile.validate()?;
        }
        Ok(set)
    }

    pub fn profiles(&self) -> &[DetectionProfile] {
        match self {
            Self::Many(profiles) => profiles,
            Self::One(profile) => std::slice::from_ref(profile),
        }
    }

    pub fn find(&self, name: &str) -> Option<&DetectionProfile> {
        self.profiles()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// `<config dir>/bridgeroad-traffic/profiles.json`
pub fn user_profile_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bridgeroad-traffic").join("profiles.json"))
}

/// Builder for custom profiles
pub struct ProfileBuilder {
    profile: DetectionProfile,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self {
            profile: DetectionProfile::from_preset(ProfilePreset::Custom),
        }
    }

    pub fn from_preset(preset: ProfilePreset) -> Self {
        Self {
            profile: DetectionProfile::from_preset(preset),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.profile.name = name.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.profile.description = desc.into();
        self
    }

    pub fn point(mut self, x: u32, y: u32, weight: f64) -> Self {
        self.profile.points.push(DetectionPoint::new(x, y, weight));
        self
    }

    pub fn build(mut self) -> DetectionProfile {
        self.profile.base_preset = ProfilePreset::Custom;
        self.profile
    }
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
