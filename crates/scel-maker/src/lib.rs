//! Convert pinyin word lists into `.scel` cell dictionaries.
//!
//! This crate is the command-line front end for [`scel_formats`]. It
//! handles argument parsing, input and output files, and atomic replacement
//! of the output path. The binary in `bin/scel-maker.rs` only adds logging
//! setup and exit code handling.
//!
//! # Example
//!
//! ```no_run
//! use scel_maker::{MakerConfig, convert};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let conversion = convert(&MakerConfig::for_input("成语.txt"))?;
//! println!(
//!     "{} words written to {}",
//!     conversion.report.summary.word_count,
//!     conversion.output.display()
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod convert;
pub mod error;

pub use config::{MakerConfig, output_path_for, title_for};
pub use convert::{Conversion, convert, write_dictionary};
pub use error::{MakerError, Result};
