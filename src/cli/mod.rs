// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::{print_profiles, Args, OutputFormat};
pub use output::{format_json, format_record, format_result, format_summary};
