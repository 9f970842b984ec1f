//! Command-line argument definitions for the modelgen CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every path argument overrides the matching value of the
//! loaded configuration file.

use clap::Parser;

/// Command-line arguments for the modelgen tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the class model (`.xml` or `.json`)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Path to the original flat JSON configuration
    #[arg(long)]
    pub original_config: Option<String>,

    /// Path to the patched flat JSON configuration
    #[arg(long)]
    pub patched_config: Option<String>,

    /// Directory all outputs are written to
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
