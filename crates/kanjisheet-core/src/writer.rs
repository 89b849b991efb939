use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use kanjisheet_types::{OUTPUT_COLUMNS, OutputRecord};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("cannot create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("flush failed: {0}")]
    Flush(#[from] io::Error),
}

/// Serialize the header and `records` into `out`, returning it flushed
pub fn write_records<W: io::Write>(
    out: W,
    records: &[OutputRecord],
    delimiter: u8,
) -> Result<W, WriteError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    // Always write header, even with zero rows
    writer.write_record(OUTPUT_COLUMNS)?;

    for record in records {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|e| WriteError::Flush(e.into_error()))
}

/// Write the output sheet to `path`, replacing any existing file
pub fn write_output(path: &Path, records: &[OutputRecord], delimiter: u8) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let file = write_records(file, records, delimiter)?;
    file.sync_all()?;

    tracing::info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
