// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use bridgeroad_traffic::cli::{
    format_json, format_record, format_result, format_summary, print_profiles, Args,
    OutputFormat,
};
use bridgeroad_traffic::{DetectedTraffic, DetectionProfile, MapAnalyzer};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.list_profiles {
        print_profiles();
        return Ok(());
    }

    let profile = args
        .resolve_profile()
        .with_context(|| format!("Failed to resolve profile '{}'", args.profile))?;
    profile.validate()?;

    let input = args
        .input
        .as_deref()
        .context("No input given (use --input)")?;
    let map_files = collect_map_files(input)?;

    if map_files.is_empty() {
        eprintln!("{}", "No map images found!".red());
        return Ok(());
    }

    log::info!(
        "Analysing {} map(s) with profile '{}'",
        map_files.len(),
        profile.name
    );

    let show_progress = args.format == OutputFormat::Text && map_files.len() > 1;
    let outcomes = analyze_all(&map_files, &profile, show_progress);

    let mut detected = Vec::new();
    let mut failures = 0;
    for (path, outcome) in map_files.iter().zip(outcomes) {
        match outcome {
            Ok(result) => {
                print_outcome(path, &result, &args)?;
                detected.push(result);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {:#}", "✗".red(), path.display(), e);
            }
        }
    }

    if args.format == OutputFormat::Text && map_files.len() > 1 {
        print!("{}", format_summary(&detected, failures));
    }

    if failures > 0 {
        anyhow::bail!("{} of {} map(s) failed", failures, map_files.len());
    }

    Ok(())
}

fn collect_map_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && is_map_image(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
    } else {
        anyhow::bail!("Input not found: {}", path.display());
    }

    Ok(files)
}

fn is_map_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn analyze_all(
    files: &[PathBuf],
    profile: &DetectionProfile,
    show_progress: bool,
) -> Vec<Result<DetectedTraffic>> {
    let progress = if show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let outcomes = files
        .par_iter()
        .progress_with(progress.clone())
        .map(|path| analyze_file(path, profile))
        .collect();

    progress.finish_and_clear();
    outcomes
}

fn analyze_file(path: &Path, profile: &DetectionProfile) -> Result<DetectedTraffic> {
    let analyzer = MapAnalyzer::with_profile(path, profile.clone())
        .with_context(|| format!("Failed to analyse {}", path.display()))?;
    Ok(analyzer.analyze()?)
}

fn print_outcome(path: &Path, result: &DetectedTraffic, args: &Args) -> Result<()> {
    let file = path.display().to_string();
    match args.format {
        OutputFormat::Text => print!("{}", format_result(&file, result, args.verbose)),
        OutputFormat::Json => println!("{}", format_json(&file, result)?),
        OutputFormat::Record => println!("{}", format_record(result, chrono::Utc::now())?),
    }
    Ok(())
}
