//! Reverse line reader for tail operations

use chrono::{DateTime, Utc};
use logwarden_core::{constants::REVERSE_CHUNK_SIZE, Error, Result};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use tracing::debug;

/// The last lines of a file, captured against the length seen at open time
#[derive(Debug, Clone)]
pub struct TailSnapshot {
    /// Raw lines in file order, each with its own terminator (if any)
    pub lines: Vec<Vec<u8>>,
    /// File length when the file was opened
    pub len: u64,
    pub modified: DateTime<Utc>,
}

impl TailSnapshot {
    /// Lines joined back together with their original terminators
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.lines.concat()).into_owned()
    }

    /// Lines with trailing `\n` / `\r\n` removed
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| decode_line(l)).collect()
    }
}

/// Strip one trailing line terminator and decode lossily
pub(crate) fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Reads the last N lines of a file by seeking backwards from the end
pub struct ReverseLineReader {
    path: PathBuf,
}

impl ReverseLineReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the last `n` lines with their terminators stripped
    pub fn tail_lines(&self, n: usize) -> Result<Vec<String>> {
        Ok(self.read_tail(n)?.lines())
    }

    /// Read the last `n` lines without loading the whole file.
    ///
    /// Only the newline byte (0x0A) is treated as a boundary, so UTF-8 input
    /// is split correctly and other bytes pass through untouched. Bytes
    /// appended after the file is opened are not part of the result.
    pub fn read_tail(&self, n: usize) -> Result<TailSnapshot> {
        let mut file = File::open(&self.path).map_err(|e| Error::from_open(&self.path, e))?;
        let metadata = file.metadata()?;
        let len = metadata.len();
        let modified = DateTime::<Utc>::from(metadata.modified()?);

        if n == 0 || len == 0 {
            return Ok(TailSnapshot {
                lines: Vec::new(),
                len,
                modified,
            });
        }

        let start = find_tail_start(&mut file, len, n)?;

        file.seek(SeekFrom::Start(start))?;
        let mut buffer = Vec::with_capacity((len - start) as usize);
        file.by_ref().take(len - start).read_to_end(&mut buffer)?;

        let lines: Vec<Vec<u8>> = buffer
            .split_inclusive(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect();

        debug!(
            "Tailed {} of {} requested lines from {} (offset {}/{})",
            lines.len(),
            n,
            self.path.display(),
            start,
            len
        );

        Ok(TailSnapshot {
            lines,
            len,
            modified,
        })
    }
}

/// Offset of the first byte of the last `n` lines.
///
/// The final byte is skipped since it is normally the last line's own
/// newline. Scanning stops at the `n`-th newline before it, or at byte 0
/// when the file holds fewer lines.
fn find_tail_start(file: &mut File, len: u64, n: usize) -> Result<u64> {
    let mut end = len - 1;
    let mut found = 0usize;
    let mut chunk = vec![0u8; REVERSE_CHUNK_SIZE];

    while end > 0 {
        let read_size = std::cmp::min(REVERSE_CHUNK_SIZE as u64, end) as usize;
        let start = end - read_size as u64;

        file.seek(SeekFrom::Start(start))?;
        file.read_exact(&mut chunk[..read_size])?;

        for (i, &byte) in chunk[..read_size].iter().enumerate().rev() {
            if byte == b'\n' {
                found += 1;
                if found == n {
                    return Ok(start + i as u64 + 1);
                }
            }
        }

        end = start;
    }

    Ok(0)
}
