//! Detection result types and their persistence record

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::core::Traffic;

/// Minute-resolution UTC key used for records and archived snapshots.
pub const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Outcome of sampling one profile against one map image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedTraffic {
    /// Name of the profile that produced this result
    pub profile: String,
    /// Weighted verdict over all classified samples
    pub traffic: Traffic,
    /// One entry per detection point, in profile order
    pub samples: Vec<Traffic>,
}

impl DetectedTraffic {
    pub fn new(profile: impl Into<String>, traffic: Traffic, samples: Vec<Traffic>) -> Self {
        Self {
            profile: profile.into(),
            traffic,
            samples,
        }
    }

    pub fn severity(&self) -> i32 {
        self.traffic.severity()
    }

    pub fn sample_severities(&self) -> Vec<i32> {
        self.samples.iter().map(Traffic::severity).collect()
    }

    /// Samples as `"1, -1, 3"`, the form the row store keeps them in.
    pub fn samples_string(&self) -> String {
        join_severities(&self.samples)
    }

    pub fn unknown_count(&self) -> usize {
        self.samples.iter().filter(|s| !s.is_known()).count()
    }

    /// Object key for the archived map image this result came from.
    pub fn snapshot_name(&self, instant: DateTime<Utc>) -> String {
        format!("{}_{}.png", format_instant(instant), self.profile)
    }
}

pub fn join_severities(traffics: &[Traffic]) -> String {
    traffics
        .iter()
        .map(|t| t.severity().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

/// Row handed to the storage collaborator
///
/// Serialises to `{"instant": .., "<profile>_severity": n, "<profile>_samples": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficRecord {
    pub instant: String,
    pub profile: String,
    pub severity: i32,
    pub samples: String,
}

impl TrafficRecord {
    pub fn new(detected: &DetectedTraffic, instant: DateTime<Utc>) -> Self {
        Self {
            instant: format_instant(instant),
            profile: detected.profile.clone(),
            severity: detected.severity(),
            samples: detected.samples_string(),
        }
    }

    pub fn severity_key(&self) -> String {
        format!("{}_severity", self.profile)
    }

    pub fn samples_key(&self) -> String {
        format!("{}_samples", self.profile)
    }
}

impl Serialize for TrafficRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("instant", &self.instant)?;
        map.serialize_entry(&self.severity_key(), &self.severity)?;
        map.serialize_entry(&self.samples_key(), &self.samples)?;
        map.end()
    }
}
