//! Edge reading operations.
//!
//! This module provides async functionality for reading integer pairs
//! with buffering and line number tracking for error reporting.

use std::collections::VecDeque;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::{Error, Result};

/// A single dependency edge: `from` depends on `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// The dependent entity.
    pub from: i64,
    /// The entity depended upon.
    pub to: i64,
}

impl Edge {
    /// Creates a new edge.
    #[must_use]
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }
}

/// Async reader for whitespace-separated integer pairs.
///
/// `EdgeReader` wraps an async reader and yields one [`Edge`] per pair of
/// integers. Pairs are not bound to lines: `1 2 3 4` on one line and `1\n2`
/// across two lines are both valid. Line numbers are tracked so that format
/// errors point at the offending input.
///
/// # Examples
///
/// ```no_run
/// use depcycles_edges::EdgeReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("deps.txt").await?;
/// let edges = EdgeReader::new(file).read_all().await?;
/// # Ok(())
/// # }
/// ```
pub struct EdgeReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Current line number (1-based, 0 before any lines are read).
    line_number: usize,
    /// Identifiers read but not yet paired, with the line they came from.
    pending: VecDeque<(i64, usize)>,
    /// Reusable line buffer.
    line: String,
    eof: bool,
}

impl<R: AsyncRead + Unpin> EdgeReader<R> {
    /// Creates a new `EdgeReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::from_buf_reader(BufReader::new(reader))
    }

    /// Creates a new `EdgeReader` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self::from_buf_reader(BufReader::with_capacity(capacity, reader))
    }

    fn from_buf_reader(reader: BufReader<R>) -> Self {
        Self {
            reader,
            line_number: 0,
            pending: VecDeque::new(),
            line: String::new(),
            eof: false,
        }
    }

    /// Returns the current line number.
    ///
    /// Returns 0 before any lines have been read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next edge.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidToken`] if a token is not an integer
    /// - [`Error::UnpairedId`] if the input ends after an odd number of integers
    /// - [`Error::Io`] if the underlying reader fails
    pub async fn read_edge(&mut self) -> Result<Option<Edge>> {
        while self.pending.len() < 2 && !self.eof {
            self.fill().await?;
        }
        take_edge(&mut self.pending)
    }

    /// Reads all remaining edges.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed token or I/O error; see [`Self::read_edge`].
    pub async fn read_all(mut self) -> Result<Vec<Edge>> {
        let mut edges = Vec::new();
        while let Some(edge) = self.read_edge().await? {
            edges.push(edge);
        }
        tracing::debug!(edges = edges.len(), lines = self.line_number, "Read edge list");
        Ok(edges)
    }

    /// Reads one more line into the pending queue.
    async fn fill(&mut self) -> Result<()> {
        self.line.clear();
        let read = self.reader.read_line(&mut self.line).await?;
        if read == 0 {
            self.eof = true;
            return Ok(());
        }
        self.line_number += 1;
        tokenize_line(&self.line, self.line_number, &mut self.pending)
    }
}

/// Parses an in-memory edge list.
///
/// # Errors
///
/// Returns a format error for non-integer tokens or an unpaired trailing integer.
pub fn parse_edges(input: &str) -> Result<Vec<Edge>> {
    let mut pending = VecDeque::new();
    let mut edges = Vec::new();

    for (index, line) in input.lines().enumerate() {
        tokenize_line(line, index + 1, &mut pending)?;
        while pending.len() >= 2 {
            if let Some(edge) = take_edge(&mut pending)? {
                edges.push(edge);
            }
        }
    }

    // Only a dangling id can remain here.
    take_edge(&mut pending)?;
    Ok(edges)
}

fn tokenize_line(line: &str, line_number: usize, pending: &mut VecDeque<(i64, usize)>) -> Result<()> {
    for token in line.split_whitespace() {
        let id = token.parse::<i64>().map_err(|_| Error::InvalidToken {
            line: line_number,
            token: token.to_string(),
        })?;
        pending.push_back((id, line_number));
    }
    Ok(())
}

fn take_edge(pending: &mut VecDeque<(i64, usize)>) -> Result<Option<Edge>> {
    match (pending.pop_front(), pending.pop_front()) {
        (Some((from, _)), Some((to, _))) => Ok(Some(Edge::new(from, to))),
        (Some((id, line)), None) => Err(Error::UnpairedId { line, id }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[test]
    fn new_reader_starts_at_line_zero() {
        let reader = EdgeReader::new(Cursor::new(b""));
        assert_eq!(reader.line_number(), 0);
    }

    #[test]
    fn with_capacity_creates_reader() {
        let reader = EdgeReader::with_capacity(Cursor::new(b"1 2"), 8192);
        assert_eq!(reader.line_number(), 0);
    }

    #[tokio::test]
    async fn reads_one_pair_per_line() {
        let reader = EdgeReader::new(Cursor::new(b"1 2\n2 3\n3 1\n"));
        let edges = reader.read_all().await.unwrap();
        assert_eq!(
            edges,
            vec![Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)]
        );
    }

    #[tokio::test]
    async fn pairs_may_span_lines() {
        let mut reader = EdgeReader::new(Cursor::new(b"1\n2 3\n\n4"));
        assert_eq!(reader.read_edge().await.unwrap(), Some(Edge::new(1, 2)));
        assert_eq!(reader.line_number(), 2);
        assert_eq!(reader.read_edge().await.unwrap(), Some(Edge::new(3, 4)));
        assert_eq!(reader.line_number(), 4);
        assert_eq!(reader.read_edge().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unpaired_trailing_id_is_rejected() {
        let reader = EdgeReader::new(Cursor::new(b"1 2\n3\n"));
        let err = reader.read_all().await.unwrap_err();
        assert!(matches!(err, Error::UnpairedId { line: 2, id: 3 }));
    }

    #[tokio::test]
    async fn non_integer_token_is_rejected() {
        let reader = EdgeReader::new(Cursor::new(b"1 2\n2 x\n"));
        let err = reader.read_all().await.unwrap_err();
        match err {
            Error::InvalidToken { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_input_yields_no_edges() {
        let reader = EdgeReader::new(Cursor::new(b"  \n\n"));
        assert!(reader.read_all().await.unwrap().is_empty());
    }

    #[rstest]
    #[case("", vec![])]
    #[case("1 2", vec![Edge::new(1, 2)])]
    #[case("1 2\n2 3\n", vec![Edge::new(1, 2), Edge::new(2, 3)])]
    #[case("1\t2 2\n3", vec![Edge::new(1, 2), Edge::new(2, 3)])]
    #[case("-1 2", vec![Edge::new(-1, 2)])]
    fn parse_edges_accepts_valid_input(#[case] input: &str, #[case] expected: Vec<Edge>) {
        assert_eq!(parse_edges(input).unwrap(), expected);
    }

    #[rstest]
    #[case("1")]
    #[case("1 2 3")]
    #[case("1 two")]
    #[case("1 2\n3.5 4")]
    fn parse_edges_rejects_malformed_input(#[case] input: &str) {
        let err = parse_edges(input).unwrap_err();
        assert!(err.is_format_error(), "expected format error, got {err}");
    }
}
