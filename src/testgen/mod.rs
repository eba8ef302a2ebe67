// src/testgen/mod.rs
//
// Synthetic traffic map generation for tests and demos.
// Paints legend colours under a profile's control points so the expected
// verdict is known up front.

use anyhow::{bail, Context, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::config::DetectionProfile;
use crate::core::Traffic;

/// Size of the map images served for the Bridge Road search
pub const MAP_WIDTH: u32 = 600;
pub const MAP_HEIGHT: u32 = 300;

/// Pale grey land colour, deliberately absent from the legend
pub const BACKGROUND: Rgba<u8> = Rgba([232, 228, 220, 255]);

/// Legend pixel for a level; unknown gets the background colour.
pub fn legend_pixel(traffic: Traffic) -> Rgba<u8> {
    match traffic.reference_colors().first() {
        Some(&code) => {
            let [a, r, g, b] = code.to_be_bytes();
            Rgba([r, g, b, a])
        }
        None => BACKGROUND,
    }
}

/// Builder for a synthetic map image
#[derive(Debug, Clone)]
pub struct SyntheticMap {
    width: u32,
    height: u32,
    background: Rgba<u8>,
    /// Half-width of the painted square around each point
    stroke: u32,
    paint: Vec<(u32, u32, Rgba<u8>)>,
}

impl Default for SyntheticMap {
    fn default() -> Self {
        Self::new(MAP_WIDTH, MAP_HEIGHT)
    }
}

impl SyntheticMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: BACKGROUND,
            stroke: 2,
            paint: Vec::new(),
        }
    }

    pub fn background(mut self, color: Rgba<u8>) -> Self {
        self.background = color;
        self
    }

    pub fn stroke(mut self, half_width: u32) -> Self {
        self.stroke = half_width;
        self
    }

    /// Paint a raw colour at one pixel and its stroke neighbourhood.
    pub fn color(mut self, x: u32, y: u32, color: Rgba<u8>) -> Self {
        self.paint.push((x, y, color));
        self
    }

    pub fn traffic(self, x: u32, y: u32, traffic: Traffic) -> Self {
        self.color(x, y, legend_pixel(traffic))
    }

    /// Paint `levels[i]` under the i-th point of `profile`.
    pub fn with_profile(mut self, profile: &DetectionProfile, levels: &[Traffic]) -> Result<Self> {
        if levels.len() != profile.points.len() {
            bail!(
                "profile '{}' has {} points but {} levels were given",
                profile.name,
                profile.points.len(),
                levels.len()
            );
        }
        for (point, &level) in profile.points.iter().zip(levels) {
            self = self.traffic(point.x, point.y, level);
        }
        Ok(self)
    }

    pub fn render(&self) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(self.width, self.height, self.background);
        for &(cx, cy, color) in &self.paint {
            let x0 = cx.saturating_sub(self.stroke);
            let y0 = cy.saturating_sub(self.stroke);
            let x1 = (cx + self.stroke).min(self.width.saturating_sub(1));
            let y1 = (cy + self.stroke).min(self.height.saturating_sub(1));
            for y in y0..=y1 {
                for x in x0..=x1 {
                    img.put_pixel(x, y, color);
                }
            }
        }
        img
    }

    /// Render and save; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        self.render()
            .save(path)
            .with_context(|| format!("Failed to write synthetic map: {}", path.display()))
    }
}
