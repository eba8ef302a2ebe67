// src/core/detector.rs
//
// Weighted aggregation of per-point traffic samples into one verdict.

use log::{debug, info, warn};

use super::surface::ColorSurface;
use super::traffic::Traffic;
use crate::config::{DetectionPoint, DetectionProfile};
use crate::detection::DetectedTraffic;
use crate::error::{Result, TrafficError};

/// Running weighted severity total.
///
/// Stays `Empty` until the first classified sample, so a map where every
/// point is unknown yields [`Traffic::Unknown`] rather than [`Traffic::None`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Accumulator {
    #[default]
    Empty,
    Total(f64),
}

impl Accumulator {
    fn add(self, traffic: Traffic, weight: f64) -> Self {
        if !traffic.is_known() {
            return self;
        }
        let total = match self {
            Self::Empty => 0.0,
            Self::Total(total) => total,
        };
        Self::Total(total + traffic.severity() as f64 * weight)
    }

    /// Round half away from zero and map back onto a level.
    fn verdict(self) -> Traffic {
        match self {
            Self::Total(total) if total.is_finite() => {
                Traffic::level_for_severity(total.round() as i64)
            }
            _ => Traffic::Unknown,
        }
    }
}

/// Fail on the first point that falls outside a `width` x `height` image.
pub fn check_points(points: &[DetectionPoint], width: u32, height: u32) -> Result<()> {
    match points.iter().position(|p| p.x >= width || p.y >= height) {
        Some(index) => Err(TrafficError::PointOutOfBounds {
            index,
            x: points[index].x,
            y: points[index].y,
            width,
            height,
        }),
        None => Ok(()),
    }
}

/// Sample and classify every point, in order.
///
/// Fails on the first point outside the surface; nothing is sampled in that case.
pub fn sample_points<S: ColorSurface + ?Sized>(
    surface: &S,
    points: &[DetectionPoint],
) -> Result<Vec<Traffic>> {
    let (width, height) = surface.dimensions();
    check_points(points, width, height)?;

    Ok(points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let color = surface.color_at(point.x, point.y);
            let traffic = Traffic::classify(color);
            if traffic.is_known() {
                debug!("Point #{} ({}, {}): {:#010x} -> {}", i, point.x, point.y, color, traffic);
            } else {
                warn!(
                    "Point #{} ({}, {}): colour {:#010x} is not in the legend",
                    i, point.x, point.y, color
                );
            }
            traffic
        })
        .collect())
}

/// Fold classified samples into one level using the matching point weights.
///
/// Unknown samples add nothing and the remaining weights are not renormalised.
pub fn aggregate(samples: &[Traffic], points: &[DetectionPoint]) -> Traffic {
    samples
        .iter()
        .zip(points)
        .fold(Accumulator::default(), |acc, (&traffic, point)| {
            acc.add(traffic, point.weight)
        })
        .verdict()
}

/// Detect the traffic on `surface` using the given profile.
pub fn detect<S: ColorSurface + ?Sized>(
    surface: &S,
    profile: &DetectionProfile,
) -> Result<DetectedTraffic> {
    let samples = sample_points(surface, &profile.points)?;
    let traffic = aggregate(&samples, &profile.points);
    let result = DetectedTraffic::new(profile.name.clone(), traffic, samples);

    info!(
        "Profile '{}': {} (severity {}, {} of {} points unknown)",
        result.profile,
        result.traffic,
        result.severity(),
        result.unknown_count(),
        result.samples.len()
    );

    Ok(result)
}

/// Reusable detector bound to one profile
#[derive(Debug, Clone)]
pub struct TrafficDetector {
    profile: DetectionProfile,
}

impl TrafficDetector {
    pub fn new(profile: DetectionProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &DetectionProfile {
        &self.profile
    }

    pub fn detect<S: ColorSurface + ?Sized>(&self, surface: &S) -> Result<DetectedTraffic> {
        detect(surface, &self.profile)
    }
}

impl Default for TrafficDetector {
    fn default() -> Self {
        Self {
            profile: DetectionProfile::default(),
        }
    }
}
