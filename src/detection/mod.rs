//! Detection module for bridgeroad-traffic

mod result;

pub use result::{
    format_instant, join_severities, DetectedTraffic, TrafficRecord, INSTANT_FORMAT,
};
