//! Ledger storage - where chain records live
//!
//! The writer only needs to read the current tail and append after it.
//! `FileStore` keeps one JSON object per line; `MemoryStore` backs tests and
//! embedders that persist records elsewhere.

use crate::error::{LedgerError, LedgerResult};
use crate::hash::is_well_formed;
use crate::record::LedgerRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Append-only record storage.
///
/// Implementations must never rewrite or drop existing records.
pub trait LedgerStore: Send {
    /// Last record, `None` for an empty ledger.
    ///
    /// An unreadable tail is `LedgerError::CorruptTail`, never `None`.
    fn read_tail(&self) -> LedgerResult<Option<LedgerRecord>>;

    /// Append one record after the current tail.
    ///
    /// On failure nothing is persisted.
    fn append(&mut self, record: &LedgerRecord) -> LedgerResult<()>;

    /// Every record, oldest first
    fn read_all(&self) -> LedgerResult<Vec<LedgerRecord>>;
}

/// Bytes read per step when scanning backwards for the tail
const TAIL_CHUNK: u64 = 4096;

/// Append-only JSONL file
///
/// Each line is a JSON-serialized LedgerRecord.
/// The file is append-only and should never be modified.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (or prepare to create) a chain file at the given path
    pub fn new(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { path })
    }

    /// Get the path to the chain file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last non-blank line and the byte offset where it starts.
    ///
    /// Reads backwards from the end of the file in fixed-size chunks, so the
    /// cost does not grow with the length of the chain.
    fn read_last_line(&self) -> LedgerResult<Option<(u64, Vec<u8>)>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut pos = file.metadata()?.len();
        // Bytes from `pos` to the end of the file
        let mut buf: Vec<u8> = Vec::new();

        loop {
            match buf.iter().rposition(|b| !b.is_ascii_whitespace()) {
                Some(last) => {
                    let end = last + 1;
                    if let Some(nl) = buf[..end].iter().rposition(|&b| b == b'\n') {
                        return Ok(Some((pos + nl as u64 + 1, buf[nl + 1..end].to_vec())));
                    }
                    if pos == 0 {
                        return Ok(Some((0, buf[..end].to_vec())));
                    }
                }
                None if pos == 0 => return Ok(None),
                None => {}
            }

            let step = TAIL_CHUNK.min(pos);
            pos -= step;

            let mut chunk = vec![0u8; step as usize];
            file.seek(SeekFrom::Start(pos))?;
            file.read_exact(&mut chunk)?;
            chunk.extend_from_slice(&buf);
            buf = chunk;
        }
    }

    /// 1-based line number of the line starting at `offset`
    fn line_number_at(&self, offset: u64) -> LedgerResult<usize> {
        let mut head = Vec::new();
        File::open(&self.path)?.take(offset).read_to_end(&mut head)?;
        Ok(head.iter().filter(|&&b| b == b'\n').count() + 1)
    }
}

impl LedgerStore for FileStore {
    fn read_tail(&self) -> LedgerResult<Option<LedgerRecord>> {
        let Some((offset, line)) = self.read_last_line()? else {
            return Ok(None);
        };

        match parse_record(&line) {
            Ok(record) => Ok(Some(record)),
            Err(reason) => Err(LedgerError::CorruptTail {
                line: self.line_number_at(offset)?,
                reason,
            }),
        }
    }

    fn append(&mut self, record: &LedgerRecord) -> LedgerResult<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        let original_len = file.metadata()?.len();

        // A previous writer may have left the last line unterminated
        if original_len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::Start(original_len - 1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                line.insert(0, '\n');
            }
        }

        if let Err(e) = write_durably(&mut file, line.as_bytes()) {
            // Roll back whatever part of the line made it to disk
            if let Err(rollback) = file.set_len(original_len) {
                tracing::error!(
                    path = %self.path.display(),
                    error = %rollback,
                    "Failed to roll back partial ledger append"
                );
            }
            return Err(e.into());
        }

        Ok(())
    }

    fn read_all(&self) -> LedgerResult<Vec<LedgerRecord>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (idx, line) in contents.split(|&b| b == b'\n').enumerate() {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let record = parse_record(line).map_err(|reason| LedgerError::CorruptRecord {
                line: idx + 1,
                reason,
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

fn write_durably(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_data()
}

/// Parse one line and check its hashes are well formed
fn parse_record(line: &[u8]) -> Result<LedgerRecord, String> {
    let line = std::str::from_utf8(line).map_err(|e| format!("invalid UTF-8: {}", e))?;
    let record: LedgerRecord = serde_json::from_str(line).map_err(|e| e.to_string())?;

    for (field, value) in [
        ("prev_hash", &record.prev_hash),
        ("payload_hash", &record.payload_hash),
        ("block_hash", &record.block_hash),
    ] {
        if !is_well_formed(value) {
            return Err(format!("malformed {}: {:?}", field, value));
        }
    }

    Ok(record)
}

/// In-memory store (for testing and embedding)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<LedgerRecord>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records
    pub fn with_records(records: Vec<LedgerRecord>) -> Self {
        Self { records }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no record has been appended
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LedgerStore for MemoryStore {
    fn read_tail(&self) -> LedgerResult<Option<LedgerRecord>> {
        Ok(self.records.last().cloned())
    }

    fn append(&mut self, record: &LedgerRecord) -> LedgerResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> LedgerResult<Vec<LedgerRecord>> {
        Ok(self.records.clone())
    }
}
