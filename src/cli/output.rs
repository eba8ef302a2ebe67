//! Output formatting for CLI results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::Traffic;
use crate::detection::{DetectedTraffic, TrafficRecord};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn traffic_color(traffic: Traffic) -> &'static str {
    match traffic {
        Traffic::None => "\x1b[32m",      // green
        Traffic::Low => "\x1b[92m",       // light green
        Traffic::Medium => "\x1b[33m",    // yellow
        Traffic::Heavy => "\x1b[31m",     // red
        Traffic::VeryHeavy => "\x1b[35m", // magenta
        Traffic::Unknown => "\x1b[90m",   // gray
    }
}

/// Format a detection result for terminal output
pub fn format_result(file: &str, result: &DetectedTraffic, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}{}{} {}[{}]{}\n",
        BOLD, file, RESET, DIM, result.profile, RESET
    ));

    output.push_str(&format!(
        "  Traffic: {}{}{} (severity {})\n",
        traffic_color(result.traffic),
        result.traffic,
        RESET,
        result.severity()
    ));

    let unknown = result.unknown_count();
    if unknown > 0 {
        output.push_str(&format!(
            "  {}{} of {} points unclassified{}\n",
            DIM,
            unknown,
            result.samples.len(),
            RESET
        ));
    }

    if verbose {
        output.push_str("\n  Samples:\n");
        for (i, sample) in result.samples.iter().enumerate() {
            output.push_str(&format!(
                "    #{} {}{}{} ({})\n",
                i,
                traffic_color(*sample),
                sample,
                RESET,
                sample.severity()
            ));
        }
    }

    output
}

#[derive(Serialize)]
struct JsonResult<'a> {
    file: &'a str,
    profile: &'a str,
    traffic: &'a str,
    severity: i32,
    samples: Vec<i32>,
}

/// Format a detection result as JSON
pub fn format_json(file: &str, result: &DetectedTraffic) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonResult {
        file,
        profile: &result.profile,
        traffic: result.traffic.name(),
        severity: result.severity(),
        samples: result.sample_severities(),
    })
}

/// Format the storage row for a result as a single JSON line
pub fn format_record(result: &DetectedTraffic, instant: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string(&TrafficRecord::new(result, instant))
}

/// Format a summary for multiple images
pub fn format_summary(results: &[DetectedTraffic], failures: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}Summary:{}\n", BOLD, RESET));
    output.push_str(&format!("  {} maps analysed\n", results.len()));

    for level in Traffic::all() {
        let count = results.iter().filter(|r| r.traffic == level).count();
        if count > 0 {
            output.push_str(&format!(
                "  {}{} {}{}\n",
                traffic_color(level),
                count,
                level,
                RESET
            ));
        }
    }

    if failures > 0 {
        output.push_str(&format!("  \x1b[31m{} failed{}\n", failures, RESET));
    }

    output
}
