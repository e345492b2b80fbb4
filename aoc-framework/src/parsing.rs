//! Utility functions and errors for parsing input.

use std::str::FromStr;

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// Wrap an error caused by the line at `line_index`.
    pub fn new(line_index: usize, source: impl Into<DynamicError>) -> Self {
        Self {
            line_index,
            source: source.into(),
        }
    }

    /// The zero based index of the line that failed.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// Parse lines with a closure, mapping any line's error with an [`InvalidLine`].
///
/// # Arguments
/// - `input` - The input string to parse.
/// - `offset` - An offset to add to the line index passed to the closure and reported by
///   [`InvalidLine`]. Useful when parsing a later slice of input. Set to `0` if no offset is
///   needed.
/// - `parser` - A closure that takes the (offset) line index and line string.
///
/// # Returns
///
/// An iterable of parsing results for each line.
pub fn parse_lines_with_offset<'a, T, E, F>(
    input: &'a str,
    offset: usize,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &'a str) -> Result<T, E>,
{
    input.lines().enumerate().map(move |(index, line)| {
        let line_index = index.saturating_add(offset);
        parser(line_index, line).map_err(|source| InvalidLine::new(line_index, source))
    })
}

/// Parse every line of input with a closure taking the line index and line.
///
/// Same as [`parse_lines_with_offset`] with an offset of `0`.
pub fn parse_input_lines<'a, T, E, F>(
    input: &'a str,
    parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &'a str) -> Result<T, E>,
{
    parse_lines_with_offset(input, 0, parser)
}

/// Check whether a line has no content besides whitespace.
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A cursor over input lines, for inputs formatted as blocks of lines separated by blank lines.
///
/// ```
/// # use aoc_framework::parsing::InputScanner;
/// # use aoc_framework::DynamicResult;
/// # fn main() -> DynamicResult<()> {
/// let mut scanner = InputScanner::new("3-5\n10-14\n\n1\n5\n");
/// let ranges = scanner.collect_sequence(|_, line| -> DynamicResult<_> { Ok(line.to_owned()) })?;
/// assert_eq!(ranges, ["3-5", "10-14"]);
///
/// assert_eq!(scanner.skip_empty(), Some(3));
/// let ids: Vec<u32> = scanner.collect_sequence(|_, line| line.parse())?;
/// assert_eq!(ids, [1, 5]);
/// assert_eq!(scanner.skip_empty(), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InputScanner<'a> {
    lines: Vec<&'a str>,
    /// Index of the next line to consume.
    position: usize,
}

impl<'a> InputScanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().collect(),
            position: 0,
        }
    }

    /// The index of the next line to consume.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unconsumed lines, unmodified.
    #[must_use]
    pub fn remaining(&self) -> &[&'a str] {
        self.lines.get(self.position..).unwrap_or_default()
    }

    /// Skip over blank lines.
    ///
    /// Returns the index of the next non-blank line, or `None` if the input is exhausted.
    pub fn skip_empty(&mut self) -> Option<usize> {
        while self
            .lines
            .get(self.position)
            .is_some_and(|line| is_blank(line))
        {
            self.position += 1;
        }
        (self.position < self.lines.len()).then_some(self.position)
    }

    /// Parse the next line if it continues the current block (it is not blank).
    ///
    /// Returns `None` without consuming anything when at a blank line or the end of input.
    ///
    /// # Errors
    ///
    /// An error from the parser is returned as an [`InvalidLine`].
    pub fn next_in_sequence<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &'a str) -> Result<T, E>,
    {
        let Some(&line) = self.lines.get(self.position) else {
            return Ok(None);
        };
        if is_blank(line) {
            return Ok(None);
        }

        let line_index = self.position;
        self.position += 1;
        parser(line_index, line)
            .map(Some)
            .map_err(|source| InvalidLine::new(line_index, source))
    }

    /// Parse consecutive non-blank lines, stopping at a blank line or the end of input.
    ///
    /// The stopping blank line is not consumed.
    ///
    /// # Errors
    ///
    /// The first error from the parser is returned as an [`InvalidLine`].
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnMut(usize, &'a str) -> Result<T, E>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }
}
