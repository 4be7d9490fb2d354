use std::io::{BufRead, BufReader, Read};

use crate::error::{Error, ErrorKind, Result};

/// A source of textual lines with the terminator already stripped.
pub trait LineRead {
    fn read_line(&mut self) -> Result<String>;
}

/// Buffered line reader with typed-parse conveniences on top.
///
/// Not thread-safe: every operation takes `&mut self`, so a reader has a
/// single owner at a time. The underlying stream is only ever read from,
/// never opened or closed.
pub struct LineReader<R> {
    inner: BufReader<R>,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
        }
    }

    /// `capacity` sizes the internal buffer used to batch underlying reads.
    /// It does not bound the line length: longer lines are assembled across
    /// multiple fills.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner: BufReader::with_capacity(capacity, inner),
        }
    }

    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    pub fn get_mut(&mut self) -> &mut R {
        self.inner.get_mut()
    }

    /// Unwraps the underlying stream. Bytes already pulled into the internal
    /// buffer but not yet consumed are discarded.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    /// Splits the next line on `sep`, keeping empty fields between
    /// consecutive separators. An empty `sep` splits the line into one field
    /// per character, with no leading or trailing empty field.
    pub fn read_line_split(&mut self, sep: &str) -> Result<Vec<String>> {
        let line = self.read_line()?;

        if sep.is_empty() {
            return Ok(line.chars().map(|c| c.to_string()).collect());
        }

        Ok(line.split(sep).map(|field| field.to_owned()).collect())
    }

    /// Splits the next line on `sep` and parses every field as a base-10
    /// integer. No partial result: one bad field fails the whole call.
    pub fn read_line_int_split(&mut self, sep: &str) -> Result<Vec<i64>> {
        self.read_line_split(sep)?
            .into_iter()
            .map(|field| {
                field
                    .parse::<i64>()
                    .map_err(|e| Error::parse("couldn't parse field into i64", e))
            })
            .collect()
    }

    /// Parses the whole next line as a base-10 integer. Any surrounding
    /// whitespace or extra token is an error.
    pub fn read_line_int(&mut self) -> Result<i64> {
        self.read_line()?
            .parse::<i64>()
            .map_err(|e| Error::parse("couldn't parse line into i64", e))
    }

    pub fn read_line_float64(&mut self) -> Result<f64> {
        self.read_line()?
            .parse::<f64>()
            .map_err(|e| Error::parse("couldn't parse line into f64", e))
    }

    /// Parses the whole next line as exactly `true` or `false`.
    pub fn read_line_bool(&mut self) -> Result<bool> {
        self.read_line()?
            .parse::<bool>()
            .map_err(|e| Error::parse("couldn't parse line into bool", e))
    }
}

impl<R: Read> LineRead for LineReader<R> {
    /// Reads the next line, stripping the `\n` or `\r\n` terminator. An
    /// empty terminated line yields `""`; a stream exhausted before any byte
    /// is an `EndOfInput` error. A final unterminated line is returned
    /// as-is.
    fn read_line(&mut self) -> Result<String> {
        let mut buf = Vec::new();

        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Err(Error::end_of_input());
        }

        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }

        String::from_utf8(buf).map_err(|e| Error::parse("couldn't decode UTF-8 line", e))
    }
}

impl<R: Read> std::iter::Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(line) => Some(Ok(line)),
            Err(e) if e.kind() == ErrorKind::EndOfInput => None,
            Err(e) => Some(Err(e)),
        }
    }
}
