//! Command-line configuration for the media-slideshow tool.
//!
//! Global options can also be set via environment variables with the
//! `SLIDESHOW_` prefix:
//!
//! - `SLIDESHOW_ICON_BASE` - Directory of the generic media icons
//!   (default: public://media-icons/generic)
//! - `SLIDESHOW_MAX_DEPTH` - Maximum nested thumbnail delegations (default: 4)
//! - `SLIDESHOW_UTC_OFFSET` - Offset in seconds east of UTC used to render
//!   dates (default: 0)
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use media_slideshow::config::Cli;
//!
//! let cli = Cli::parse();
//! cli.options.validate()?;
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::ConfigError;
use crate::host::{ChronoDateFormatter, DefaultMetadata, DEFAULT_ICON_BASE};
use crate::source::DEFAULT_MAX_DEPTH;

/// Largest accepted UTC offset, in seconds.
const MAX_UTC_OFFSET: i32 = 86_399;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Inspect and validate slideshow media in a media library file.
#[derive(Parser, Debug, Clone)]
#[command(name = "media-slideshow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Directory holding the generic media icons used as fallback thumbnails.
    #[arg(long, global = true, default_value = DEFAULT_ICON_BASE, env = "SLIDESHOW_ICON_BASE")]
    pub icon_base: String,

    /// Maximum number of nested slideshow thumbnail delegations.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH, env = "SLIDESHOW_MAX_DEPTH")]
    pub max_depth: usize,

    /// Offset in seconds east of UTC used when rendering dates.
    #[arg(
        long,
        global = true,
        default_value_t = 0,
        env = "SLIDESHOW_UTC_OFFSET",
        allow_hyphen_values = true
    )]
    pub utc_offset: i32,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check source configuration and validate every media entity.
    Check(CheckConfig),

    /// Print computed metadata of one media entity as JSON.
    Metadata(MetadataConfig),

    /// Print the source field settings form of a bundle as JSON.
    Settings(SettingsConfig),
}

#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// Media library JSON file.
    pub library: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct MetadataConfig {
    /// Media library JSON file.
    pub library: PathBuf,

    /// Id of the media entity.
    pub media_id: u64,

    /// Metadata names to compute (repeatable). Defaults to the source's
    /// attributes plus default_name and thumbnail_uri.
    #[arg(long = "name")]
    pub names: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SettingsConfig {
    /// Media library JSON file.
    pub library: PathBuf,

    /// Bundle to build the form for.
    pub bundle: String,
}

impl GlobalOptions {
    /// Validate the options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.icon_base.trim().is_empty() {
            return Err(ConfigError::Settings("icon_base must not be empty".to_string()));
        }

        if self.max_depth == 0 {
            return Err(ConfigError::Settings(
                "max_depth must be greater than 0".to_string(),
            ));
        }

        if !(-MAX_UTC_OFFSET..=MAX_UTC_OFFSET).contains(&self.utc_offset) {
            return Err(ConfigError::Settings(
                "utc_offset must be less than a day".to_string(),
            ));
        }

        Ok(())
    }

    pub fn date_formatter(&self) -> Result<ChronoDateFormatter, ConfigError> {
        ChronoDateFormatter::with_offset_seconds(self.utc_offset).ok_or_else(|| {
            ConfigError::Settings(format!("invalid utc_offset {}", self.utc_offset))
        })
    }

    pub fn fallback(&self) -> DefaultMetadata {
        DefaultMetadata::new(self.icon_base.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
