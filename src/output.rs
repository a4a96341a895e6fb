//! Diagnostic output for the CLI.
//!
//! stdout belongs to the artifact, byte for byte, so everything a human is
//! meant to read goes to **stderr**.
//!
//! # Output Format
//!
//! ## Transparency warning
//!
//! ```text
//! ************
//! WARNING! Image has transparency, see caveats in README.
//! logo.png: lossy WebP and the blur filter can smear transparent edges.
//! ************
//! ```
//!
//! ## Fatal errors
//!
//! ```text
//! error: Failed to decode photo.png: Format error decoding Png: ...
//! ```
//!
//! # Architecture
//!
//! Each message has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stderr. Format
//! functions are pure: no I/O, no side effects.

use crate::pipeline::PipelineEvent;
use std::error::Error;

const BANNER: &str = "************";

/// Format a pipeline event as diagnostic lines.
pub fn format_pipeline_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::Transparency { file_name } => vec![
            BANNER.to_string(),
            "WARNING! Image has transparency, see caveats in README.".to_string(),
            format!("{file_name}: lossy WebP and the blur filter can smear transparent edges."),
            BANNER.to_string(),
        ],
    }
}

pub fn print_pipeline_event(event: &PipelineEvent) {
    for line in format_pipeline_event(event) {
        eprintln!("{line}");
    }
}

/// Format a fatal error, followed by its `source()` chain.
pub fn format_error(err: &dyn Error) -> Vec<String> {
    let mut lines = vec![format!("error: {err}")];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("    caused by: {cause}"));
        source = cause.source();
    }
    lines
}

pub fn print_error(err: &dyn Error) {
    for line in format_error(err) {
        eprintln!("{line}");
    }
}
