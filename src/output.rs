//! Candidate output: sink abstraction and buffered writing.
//!
//! The generator pushes raw fixed-length words; the sink owns framing
//! (one trailing newline per word) and flush policy. Candidates are
//! coalesced in a large internal buffer that is drained only when full,
//! at the end of each length pass and at the end of the run.

use anyhow::Context;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Default buffer size for candidate output (64KB)
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Receives candidates as they are produced.
pub trait Sink {
    /// Accept one candidate word (no terminator).
    fn push(&mut self, word: &[u8]) -> anyhow::Result<()>;

    /// Drain any buffered candidates to the underlying target.
    fn flush(&mut self) -> anyhow::Result<()>;
}

/// Buffered candidate writer.
///
/// Appends a newline after each word and writes the buffer out only when
/// it fills or on an explicit flush. Output is binary-safe: words may
/// contain any byte value.
pub struct CandidateWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
    capacity: usize,
    words_written: u64,
    bytes_written: u64,
}

impl<W: Write> CandidateWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_capacity(inner, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(inner: W, capacity: usize) -> Self {
        Self {
            inner,
            // headroom for one max-length word so push never splits
            buf: Vec::with_capacity(capacity + 257),
            capacity,
            words_written: 0,
            bytes_written: 0,
        }
    }

    /// Number of candidates written
    pub fn words_written(&self) -> u64 {
        self.words_written
    }

    /// Bytes written including terminators
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    fn drain(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl<W: Write> Sink for CandidateWriter<W> {
    fn push(&mut self, word: &[u8]) -> anyhow::Result<()> {
        self.buf.extend_from_slice(word);
        self.buf.push(b'\n');
        self.words_written += 1;
        self.bytes_written += word.len() as u64 + 1;

        if self.buf.len() >= self.capacity {
            self.drain().context("failed to write candidates")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.drain().context("failed to write candidates")?;
        self.inner.flush().context("failed to flush output")?;
        Ok(())
    }
}

impl<W: Write> Drop for CandidateWriter<W> {
    fn drop(&mut self) {
        let _ = self.drain();
        let _ = self.inner.flush();
    }
}

/// In-memory sink for tests and exhaustive cross-checks.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub words: Vec<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Lossy string view of the collected words, convenient in tests.
    pub fn as_strings(&self) -> Vec<String> {
        self.words
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }
}

impl Sink for MemorySink {
    fn push(&mut self, word: &[u8]) -> anyhow::Result<()> {
        self.words.push(word.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Open the output target: an append-mode file, or locked stdout.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .with_context(|| format!("cannot open output file {:?}", p))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_candidate_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        let mut writer = CandidateWriter::new(File::create(&path).unwrap());
        writer.push(b"ab").unwrap();
        writer.push(b"cd").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.words_written(), 2);
        assert_eq!(writer.bytes_written(), 6);

        let content = std::fs::read(&path).unwrap();
        assert_eq!(content, b"ab\ncd\n");
    }

    #[test]
    fn test_flush_on_full_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        let mut writer = CandidateWriter::with_capacity(File::create(&path).unwrap(), 8);
        writer.push(b"one").unwrap();
        writer.push(b"two").unwrap();

        // 8 bytes buffered >= capacity, drained without an explicit flush
        let content = std::fs::read(&path).unwrap();
        assert_eq!(content, b"one\ntwo\n");
    }

    #[test]
    fn test_binary_safe_words() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");

        let mut writer = CandidateWriter::new(File::create(&path).unwrap());
        writer.push(&[0x00, 0xff, 0x41]).unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![0x00, 0xff, 0x41, b'\n']);
    }

    #[test]
    fn test_flush_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        {
            let mut writer = CandidateWriter::new(File::create(&path).unwrap());
            writer.push(b"word").unwrap();
        }

        assert_eq!(std::fs::read(&path).unwrap(), b"word\n");
    }

    #[test]
    fn test_open_output_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        for _ in 0..2 {
            let out = open_output(Some(&path)).unwrap();
            let mut writer = CandidateWriter::new(out);
            writer.push(b"run").unwrap();
            writer.flush().unwrap();
        }

        assert_eq!(std::fs::read(&path).unwrap(), b"run\nrun\n");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.push(b"00").unwrap();
        sink.push(b"01").unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.as_strings(), vec!["00", "01"]);
    }
}
