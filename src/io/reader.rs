//! Delimited-text reader.
//!
//! Wraps a data file and yields the fields of one logical line at a time,
//! using caller-supplied delimiter, quote, and escape characters. Quoted
//! fields may contain the delimiter, line breaks, doubled quotes, and
//! escaped quotes. Blanks between the start of a field and its opening
//! quote are dropped, so ` "a,b" ` still reads as one quoted field.

use crate::io::options::CsvControl;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Raw (untrimmed) fields of one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    /// 1-based line where the record starts.
    pub line: u64,
    /// Parsed fields.
    pub fields: Vec<String>,
}

/// Line-oriented delimited-text reader.
///
/// The underlying file handle is owned by the reader and released when it is
/// dropped, whether reading finished normally or stopped on an error.
pub struct DelimitedReader<R: Read = BufReader<File>> {
    /// CSV reader.
    reader: csv::Reader<PaddedQuotes<R>>,
    /// Path used in error reports.
    path: PathBuf,
    /// Reused record buffer.
    record: csv::StringRecord,
}

impl DelimitedReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file does not exist,
    /// [`Error::Io`] if it cannot be opened, or [`Error::Configuration`] if
    /// a control character is not ASCII.
    pub fn open(path: impl AsRef<Path>, control: &CsvControl) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::from_reader(BufReader::new(file), path, control)
    }
}

impl<R: Read> DelimitedReader<R> {
    /// Wraps an arbitrary reader; `path` is only used in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a control character is not ASCII.
    pub fn from_reader(reader: R, path: impl Into<PathBuf>, control: &CsvControl) -> Result<Self> {
        let (delimiter, quote, escape) = control.as_bytes()?;

        let reader = csv::ReaderBuilder::new()
            .has_headers(false) // Header handling belongs to RecordBuilder
            .flexible(true) // Width policy belongs to RecordBuilder
            .delimiter(delimiter)
            .quote(quote)
            .escape(Some(escape))
            .double_quote(true)
            .from_reader(PaddedQuotes::new(reader, delimiter, quote, escape));

        Ok(Self {
            reader,
            path: path.into(),
            record: csv::StringRecord::new(),
        })
    }

    /// Returns the path being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the next logical line.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on read failure, or [`Error::MalformedRow`] if
    /// the line cannot be decoded.
    pub fn read_line(&mut self) -> Result<Option<RawFields>> {
        let has_record = self
            .reader
            .read_record(&mut self.record)
            .map_err(|e| self.csv_error(e))?;
        if !has_record {
            return Ok(None);
        }

        let line = self.record.position().map_or(0, csv::Position::line);
        Ok(Some(RawFields {
            line,
            fields: self.record.iter().map(String::from).collect(),
        }))
    }

    fn csv_error(&self, err: csv::Error) -> Error {
        let line = err.position().map_or(0, csv::Position::line);
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Error::Io {
                path: self.path.clone(),
                source,
            },
            _ => Error::MalformedRow {
                path: self.path.clone(),
                line,
                reason,
            },
        }
    }
}

impl<R: Read> Iterator for DelimitedReader<R> {
    type Item = Result<RawFields>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

/// Where [`PaddedQuotes`] is within the current record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    /// At the start of a field, possibly after some held-back blanks.
    Start,
    /// Inside an unquoted field.
    Unquoted,
    /// Inside a quoted field.
    Quoted,
    /// Right after an escape character inside a quoted field.
    Escaped,
    /// Right after a quote inside a quoted field: either a doubled quote or
    /// the closing one.
    QuoteSeen,
}

/// Byte filter that drops spaces and tabs between the start of a field and
/// its opening quote.
///
/// The `csv` parser only recognizes a quote as the first byte of a field.
/// Blanks that are not followed by a quote are passed through untouched and
/// trimmed later with the rest of the field. Newlines are never removed, so
/// line positions are unchanged.
struct PaddedQuotes<R> {
    inner: R,
    delimiter: u8,
    quote: u8,
    escape: u8,
    state: FieldState,
    /// Blanks seen at a field start, waiting to learn whether a quote follows.
    held: Vec<u8>,
    out: Vec<u8>,
    pos: usize,
    chunk: Box<[u8]>,
}

impl<R: Read> PaddedQuotes<R> {
    const CHUNK: usize = 8 * 1024;

    fn new(inner: R, delimiter: u8, quote: u8, escape: u8) -> Self {
        Self {
            inner,
            delimiter,
            quote,
            escape,
            state: FieldState::Start,
            held: Vec::new(),
            out: Vec::new(),
            pos: 0,
            chunk: vec![0; Self::CHUNK].into_boxed_slice(),
        }
    }

    fn push(&mut self, b: u8) {
        let is_break = b == self.delimiter || b == b'\n' || b == b'\r';
        self.state = match self.state {
            FieldState::Start if is_break => {
                self.out.append(&mut self.held);
                FieldState::Start
            },
            FieldState::Start if b == b' ' || b == b'\t' => {
                self.held.push(b);
                return;
            },
            FieldState::Start if b == self.quote => {
                self.held.clear();
                FieldState::Quoted
            },
            FieldState::Start => {
                self.out.append(&mut self.held);
                FieldState::Unquoted
            },
            FieldState::Unquoted | FieldState::QuoteSeen if is_break => FieldState::Start,
            FieldState::Unquoted => FieldState::Unquoted,
            FieldState::Quoted if b == self.quote => FieldState::QuoteSeen,
            FieldState::Quoted if b == self.escape => FieldState::Escaped,
            FieldState::Quoted | FieldState::Escaped => FieldState::Quoted,
            FieldState::QuoteSeen if b == self.quote => FieldState::Quoted,
            FieldState::QuoteSeen => FieldState::Unquoted,
        };
        self.out.push(b);
    }

    /// Refills `out`; returns `false` at end of input.
    fn fill(&mut self) -> std::io::Result<bool> {
        self.out.clear();
        self.pos = 0;
        let mut chunk = std::mem::take(&mut self.chunk);
        while self.out.is_empty() {
            let n = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(e) => {
                    self.chunk = chunk;
                    return Err(e);
                },
            };
            if n == 0 {
                self.out.append(&mut self.held);
                break;
            }
            for &b in &chunk[..n] {
                self.push(b);
            }
        }
        self.chunk = chunk;
        Ok(!self.out.is_empty())
    }
}

impl<R: Read> Read for PaddedQuotes<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.pos >= self.out.len() && !self.fill()? {
            return Ok(0);
        }
        let n = buf.len().min(self.out.len() - self.pos);
        buf[..n].copy_from_slice(&self.out[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
