//! Command-line configuration.
//!
//! Every option besides the input path can also come from a
//! `SCEL_MAKER_*` environment variable. With no options at all the
//! dictionary is written next to the input, with the extension replaced by
//! `.scel` and the file stem as title.
//!
//! # Example
//!
//! ```no_run
//! use scel_maker::MakerConfig;
//!
//! let config = MakerConfig::from_args();
//! println!("Writing {}", config.output_path().display());
//! ```

use clap::Parser;
use scel_formats::options::{DEFAULT_CATEGORY, DEFAULT_DESCRIPTION};
use scel_formats::{SCEL_EXTENSION, ScelOptions, TextOverflow};
use std::path::{Path, PathBuf};

/// Converter configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "scel-maker",
    about = "Convert a pinyin word list into a .scel cell dictionary",
    version
)]
pub struct MakerConfig {
    /// Word list with one `<code> <word>` entry per line
    pub input: PathBuf,

    /// Output path (default: input with the extension replaced by .scel)
    #[arg(short, long, env = "SCEL_MAKER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Dictionary title (default: input file stem)
    #[arg(long, env = "SCEL_MAKER_TITLE")]
    pub title: Option<String>,

    /// Category label
    #[arg(long, env = "SCEL_MAKER_CATEGORY", default_value = DEFAULT_CATEGORY)]
    pub category: String,

    /// Description
    #[arg(long, env = "SCEL_MAKER_DESCRIPTION", default_value = DEFAULT_DESCRIPTION)]
    pub description: String,

    /// Fail instead of truncating text that does not fit its header field
    #[arg(long)]
    pub strict: bool,

    /// Re-read the written file and check its checksum
    #[arg(long)]
    pub verify: bool,
}

impl MakerConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Configuration with defaults for everything but the input path.
    #[must_use]
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            title: None,
            category: DEFAULT_CATEGORY.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            strict: false,
            verify: false,
        }
    }

    /// Where the dictionary is written.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| output_path_for(&self.input))
    }

    /// Title written into the dictionary.
    #[must_use]
    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| title_for(&self.input))
    }

    /// Writer options derived from this configuration.
    #[must_use]
    pub fn scel_options(&self) -> ScelOptions {
        let overflow = if self.strict {
            TextOverflow::Reject
        } else {
            TextOverflow::Truncate
        };
        ScelOptions::new(self.title())
            .with_category(self.category.clone())
            .with_description(self.description.clone())
            .with_overflow(overflow)
    }
}

/// Input path with its extension replaced by `.scel`.
#[must_use]
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension(SCEL_EXTENSION)
}

/// File name of `input` without its extension.
#[must_use]
pub fn title_for(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
