// src/core/traffic.rs
//
// Traffic severity levels and the exact-match colour legend of the map overlay.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Opaque alpha channel carried by every reference colour.
pub const OPAQUE: u32 = 0xFF00_0000;

/// Build an opaque `0xAARRGGBB` colour code from its channels.
pub const fn rgb_code(r: u8, g: u8, b: u8) -> u32 {
    OPAQUE | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Convert an RGBA pixel into the `0xAARRGGBB` colour code space.
pub fn color_code(pixel: Rgba<u8>) -> u32 {
    let [r, g, b, a] = pixel.0;
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Traffic conditions as rendered by the map legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Traffic {
    /// Pixel colour is not part of the legend
    Unknown,
    None,
    Low,
    Medium,
    Heavy,
    VeryHeavy,
}

static COLOR_TABLE: LazyLock<HashMap<u32, Traffic>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for traffic in Traffic::known() {
        for &code in traffic.reference_colors() {
            table.insert(code, traffic);
        }
    }
    table
});

static SEVERITY_TABLE: LazyLock<HashMap<i32, Traffic>> = LazyLock::new(|| {
    Traffic::known()
        .into_iter()
        .map(|traffic| (traffic.severity(), traffic))
        .collect()
});

impl Traffic {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Unknown,
            Self::None,
            Self::Low,
            Self::Medium,
            Self::Heavy,
            Self::VeryHeavy,
        ]
    }

    /// Levels that have a severity rank and legend colours.
    pub fn known() -> Vec<Self> {
        vec![
            Self::None,
            Self::Low,
            Self::Medium,
            Self::Heavy,
            Self::VeryHeavy,
        ]
    }

    /// Integer severity rank, `-1` for [`Traffic::Unknown`].
    pub fn severity(&self) -> i32 {
        match self {
            Self::Unknown => -1,
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::Heavy => 3,
            Self::VeryHeavy => 4,
        }
    }

    /// Legend colours for this level.
    ///
    /// See <https://maps.gstatic.com/tactile/layers/traffic-legend-20150511.png>
    pub fn reference_colors(&self) -> &'static [u32] {
        static NONE: [u32; 2] = [rgb_code(249, 249, 249), rgb_code(255, 255, 255)];
        static LOW: [u32; 1] = [rgb_code(132, 202, 80)];
        static MEDIUM: [u32; 1] = [rgb_code(240, 125, 2)];
        static HEAVY: [u32; 1] = [rgb_code(230, 0, 0)];
        static VERY_HEAVY: [u32; 1] = [rgb_code(158, 19, 19)];

        match self {
            Self::Unknown => &[],
            Self::None => &NONE,
            Self::Low => &LOW,
            Self::Medium => &MEDIUM,
            Self::Heavy => &HEAVY,
            Self::VeryHeavy => &VERY_HEAVY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::VeryHeavy => "very_heavy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "unknown" => Some(Self::Unknown),
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "heavy" => Some(Self::Heavy),
            "very_heavy" | "veryheavy" => Some(Self::VeryHeavy),
            _ => None,
        }
    }

    /// Classify a pixel colour by exact match against the legend.
    ///
    /// Anti-aliased or foreign colours resolve to [`Traffic::Unknown`].
    pub fn classify(color: u32) -> Self {
        COLOR_TABLE.get(&color).copied().unwrap_or(Self::Unknown)
    }

    /// Level with the given severity rank, [`Traffic::Unknown`] outside `0..=4`.
    pub fn level_for_severity(severity: i64) -> Self {
        i32::try_from(severity)
            .ok()
            .and_then(|s| SEVERITY_TABLE.get(&s).copied())
            .unwrap_or(Self::Unknown)
    }

    pub fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl fmt::Display for Traffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
