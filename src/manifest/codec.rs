//! Line-oriented encoding and decoding of signature records.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace, warn};

use crate::catalog::SignatureRecord;
use crate::error::{IoResultExt, Result, SigError};

/// File name of the manifest inside a backup root.
pub const MANIFEST_FILE_NAME: &str = "sql.txt";

/// Writes one line per record to `writer`.
pub fn encode<W: Write>(writer: &mut W, records: &[SignatureRecord]) -> std::io::Result<()> {
    for record in records {
        writeln!(writer, "{}", record.manifest_line())?;
    }
    writer.flush()
}

/// Creates or truncates `path` and writes the manifest.
#[instrument(skip(records), fields(path = %path.display(), count = records.len()))]
pub fn write_manifest(path: &Path, records: &[SignatureRecord]) -> Result<()> {
    let file = File::create(path).at_path(path)?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer, records).at_path(path)?;
    debug!("Manifest written");
    Ok(())
}

/// Opens `path` for lazy decoding.
pub fn read_manifest(path: &Path) -> Result<ManifestReader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SigError::BackupNotFound {
                path: path.display().to_string(),
            }
        } else {
            SigError::io(path, e)
        }
    })?;
    Ok(ManifestReader::new(BufReader::new(file), path))
}

/// Iterator over the records of a manifest.
///
/// Yields records in file order. After the first error the iterator is
/// fused and yields nothing more; a fresh reader starts from the top.
pub struct ManifestReader<R> {
    lines: std::io::Lines<R>,
    source: PathBuf,
    line_number: usize,
    failed: bool,
}

impl<R: BufRead> ManifestReader<R> {
    /// Wraps a reader. `source` is only used in error messages.
    pub fn new(reader: R, source: &Path) -> Self {
        Self {
            lines: reader.lines(),
            source: source.to_path_buf(),
            line_number: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for ManifestReader<R> {
    type Item = Result<SignatureRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                self.failed = true;
                self.line_number += 1;
                return Some(Err(SigError::MalformedManifest {
                    line: self.line_number,
                    content: String::new(),
                    reason: "line is not valid UTF-8".to_string(),
                }));
            }
            Err(e) => {
                self.failed = true;
                return Some(Err(SigError::io(&self.source, e)));
            }
        };
        self.line_number += 1;

        match SignatureRecord::parse_line(&line) {
            Ok((record, truncated)) => {
                if truncated {
                    warn!(line = self.line_number, "Manifest line has extra fields, ignoring them");
                }
                trace!(line = self.line_number, record_id = %record.record_id, "Decoded manifest entry");
                Some(Ok(record))
            }
            Err(reason) => {
                self.failed = true;
                Some(Err(SigError::MalformedManifest {
                    line: self.line_number,
                    content: line,
                    reason: reason.to_string(),
                }))
            }
        }
    }
}
