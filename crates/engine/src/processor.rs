use crate::error::{EngineError, Result};
use crate::stats::FilePartial;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read one log file and tally its lines.
///
/// # Errors
///
/// Returns [`EngineError::FileRead`] if the file cannot be opened or read.
pub fn process_file(path: &Path) -> Result<FilePartial> {
    let file = File::open(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    let partial = tally_reader(&mut reader, path)?;

    tracing::debug!(
        path = %path.display(),
        lines = partial.lines,
        db_queries = partial.db_queries,
        routes = partial.table.len(),
        "tallied file"
    );
    Ok(partial)
}

/// Tally lines from any buffered reader.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Invalid UTF-8 is decoded
/// lossily so binary content never fails the run.
pub fn tally_reader<R: BufRead>(reader: &mut R, path: &Path) -> Result<FilePartial> {
    let mut partial = FilePartial::new(path);
    let mut line_buf = Vec::new();

    loop {
        line_buf.clear();
        match reader.read_until(b'\n', &mut line_buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line_buf);
                for line in split_line_endings(&text) {
                    partial.push_line(line);
                }
            }
            Err(e) => {
                return Err(EngineError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        }
    }

    Ok(partial)
}

/// Split a chunk ending in at most one `\n` into lines without terminators.
fn split_line_endings(chunk: &str) -> impl Iterator<Item = &str> {
    let body = chunk.strip_suffix('\n').unwrap_or(chunk);
    let body = body.strip_suffix('\r').unwrap_or(body);
    body.split('\r')
}
