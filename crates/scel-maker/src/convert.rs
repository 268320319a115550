//! Word list to cell dictionary conversion.
//!
//! The dictionary is written to a temporary file in the output directory
//! and renamed over the output path only once it is complete, so a failed
//! run never leaves a partial dictionary behind.

use crate::config::MakerConfig;
use crate::error::{MakerError, Result};
use scel_formats::{LineSource, ScelOptions, ScelReport, ScelWriter, SeekSink, SyllableTable};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Result of a completed conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Path the dictionary was written to
    pub output: PathBuf,
    /// Details reported by the writer
    pub report: ScelReport,
}

/// Convert the word list named by `config`.
pub fn convert(config: &MakerConfig) -> Result<Conversion> {
    let input = File::open(&config.input).map_err(|source| MakerError::InputOpen {
        path: config.input.clone(),
        source,
    })?;
    let output = config.output_path();
    info!(
        "Converting {} to {}",
        config.input.display(),
        output.display()
    );

    let table = SyllableTable::builtin()?;
    let report = write_dictionary(
        BufReader::new(input),
        &config.input,
        &output,
        &table,
        config.scel_options(),
    )?;

    if config.verify {
        let mut written = File::open(&output).map_err(|source| MakerError::OutputCreate {
            path: output.clone(),
            source,
        })?;
        scel_formats::verify(&mut written)?;
        info!("Verified checksum {}", report.checksum);
    }

    Ok(Conversion { output, report })
}

/// Write a dictionary from `input` to `output` atomically.
///
/// `input_path` is only used in error reports.
pub fn write_dictionary<R: Read>(
    input: R,
    input_path: &Path,
    output: &Path,
    table: &SyllableTable,
    options: ScelOptions,
) -> Result<ScelReport> {
    let output_error = |source| MakerError::OutputCreate {
        path: output.to_path_buf(),
        source,
    };

    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(directory).map_err(output_error)?;
    debug!("Writing to temporary file {}", temp.path().display());

    let mut writer = ScelWriter::new(SeekSink::new(temp.as_file_mut()), table, options)?;
    let lines = LineSource::new(input).map_err(|e| input_error(input_path, e))?;
    for line in lines {
        let line = line.map_err(|e| input_error(input_path, e))?;
        writer.push_line(&line)?;
    }
    let (file, report) = writer.finish()?;
    file.sync_all().map_err(output_error)?;

    temp.persist(output).map_err(|e| output_error(e.error))?;
    Ok(report)
}

/// Read failures on the input are reported against the input path.
fn input_error(path: &Path, error: scel_formats::ScelError) -> MakerError {
    match error {
        scel_formats::ScelError::Io(source) => MakerError::InputOpen {
            path: path.to_path_buf(),
            source,
        },
        other => MakerError::Format(other),
    }
}
