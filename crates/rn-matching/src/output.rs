//! CSV output of matching results.
//!
//! Columns: `lon,lat,matched_lon,matched_lat,distance,link_id`, followed by
//! any attribute columns named in the header.  Invalid results leave the
//! matched columns empty.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use rn_graph::Network;

use crate::{MatchingResult, OutputError, OutputResult};

const RESULT_COLUMNS: [&str; 6] = ["lon", "lat", "matched_lon", "matched_lat", "distance", "link_id"];

/// Streams [`MatchingResult`]s as CSV rows.
pub struct CsvMatchWriter<W: Write> {
    writer:   Writer<W>,
    finished: bool,
}

impl CsvMatchWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path, attribute_columns: &[&str]) -> OutputResult<Self> {
        Self::new(Writer::from_path(path)?, attribute_columns)
    }
}

impl<W: Write> CsvMatchWriter<W> {
    pub fn from_writer(inner: W, attribute_columns: &[&str]) -> OutputResult<Self> {
        Self::new(Writer::from_writer(inner), attribute_columns)
    }

    fn new(mut writer: Writer<W>, attribute_columns: &[&str]) -> OutputResult<Self> {
        writer.write_record(RESULT_COLUMNS.iter().chain(attribute_columns))?;
        Ok(Self { writer, finished: false })
    }

    /// Write one row.  Link keys are resolved against `network`.
    pub fn write(&mut self, network: &Network, result: &MatchingResult) -> OutputResult<()> {
        self.writer.write_record(result.fields(network))?;
        Ok(())
    }

    pub fn write_all(&mut self, network: &Network, results: &[MatchingResult]) -> OutputResult<()> {
        for r in results {
            self.write(network, r)?;
        }
        Ok(())
    }

    /// Flush buffered rows.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.finish()?;
        self.writer.into_inner().map_err(|e| {
            let err = e.error();
            OutputError::Io(std::io::Error::new(err.kind(), err.to_string()))
        })
    }
}
