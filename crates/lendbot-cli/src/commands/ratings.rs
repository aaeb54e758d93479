//! Ratings command implementation.
//!
//! Parses a rating set literal such as `["A", "B"]`.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use lendbot_core::Ratings;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_output, print_single, KeyValue};

/// Arguments for the ratings command.
#[derive(Args, Debug)]
pub struct RatingsArgs {
    /// Rating set literal, e.g. '["AAAAA", "A"]'
    pub text: String,
}

#[derive(Serialize)]
struct ParsedRatings {
    canonical: String,
    ratings: Vec<String>,
}

/// Execute the ratings command.
pub fn execute(args: RatingsArgs, format: OutputFormat) -> Result<()> {
    let ratings = Ratings::parse(&args.text).map_err(CliError::from)?;

    match format {
        OutputFormat::Json => print_single(&ParsedRatings {
            canonical: ratings.to_string(),
            ratings: ratings.iter().map(|r| r.to_string()).collect(),
        }),
        OutputFormat::Table | OutputFormat::Csv => print_output(
            &[
                KeyValue::new("Canonical", &ratings),
                KeyValue::new("Count", ratings.len()),
            ],
            format,
        ),
    }
}
