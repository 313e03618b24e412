use crate::digest::{DigestAlgorithm, DigestWriter};
use crate::header::{parse_header_line, HeaderMap};
use crate::policy::FilterMode;
use std::io::{self, BufRead, BufReader, Read, Write};

/// Where the scanner is inside the current game record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Reading `[Tag "value"]` lines
    Header,
    /// Reading movetext after the header/body blank line
    Body,
}

/// Running totals for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Complete (blank-terminated) records seen
    pub total_games: u64,
    /// Records written to the output
    pub kept_games: u64,
}

/// Result of [`filter_games_streaming`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    pub stats: FilterStats,
    /// Hex checksum of the written output, when requested
    pub digest: Option<String>,
}

/// Incremental scanner over PGN lines.
///
/// Each record is buffered byte-for-byte until its terminating blank line,
/// then written whole or dropped. Headers are parsed only to make the
/// decision; the output is always the original bytes.
pub struct GameStreamFilter<'a> {
    mode: FilterMode<'a>,
    state: ScanState,
    headers: HeaderMap,
    raw: Vec<u8>,
    stats: FilterStats,
}

impl<'a> GameStreamFilter<'a> {
    pub fn new(mode: FilterMode<'a>) -> Self {
        GameStreamFilter {
            mode,
            state: ScanState::Header,
            headers: HeaderMap::default(),
            raw: Vec::new(),
            stats: FilterStats::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// Feed one line, including its line terminator if it had one
    pub fn push_line<W: Write>(&mut self, line: &[u8], output: &mut W) -> io::Result<()> {
        self.raw.extend_from_slice(line);

        let blank = line.trim_ascii().is_empty();
        match (self.state, blank) {
            (ScanState::Header, false) => {
                // Non-UTF-8 lines are copied but never parsed
                if let Some(tag) = std::str::from_utf8(line).ok().and_then(parse_header_line) {
                    self.headers
                        .insert(tag.name.to_string(), tag.value.into_owned());
                }
            }
            (ScanState::Header, true) => self.state = ScanState::Body,
            (ScanState::Body, false) => {}
            (ScanState::Body, true) => self.finalize_record(output)?,
        }

        Ok(())
    }

    /// Stop scanning. A record without its closing blank line is dropped.
    pub fn finish(self) -> FilterStats {
        if !self.raw.is_empty() {
            tracing::debug!(
                bytes = self.raw.len(),
                state = ?self.state,
                "dropping incomplete trailing record"
            );
        }
        self.stats
    }

    fn finalize_record<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        self.stats.total_games += 1;

        match self.mode.evaluate(&self.headers) {
            Ok(()) => {
                output.write_all(&self.raw)?;
                self.stats.kept_games += 1;
                tracing::trace!(game = self.stats.total_games, "kept");
            }
            Err(reason) => {
                tracing::trace!(game = self.stats.total_games, %reason, "discarded");
            }
        }

        self.headers.clear();
        self.raw.clear();
        self.state = ScanState::Header;
        Ok(())
    }
}

/// Stream a PGN database and copy the games accepted by `mode` to `output`.
///
/// This function:
/// - Reads input line by line, holding only the current game in memory
/// - Writes kept games verbatim, in input order
/// - Drops a trailing game that lacks its final blank line
/// - Optionally computes a checksum of everything written
///
/// I/O errors are returned as soon as they happen; games already written
/// stay written.
pub fn filter_games_streaming<R: Read, W: Write>(
    input: R,
    output: &mut W,
    mode: FilterMode,
    digest_algorithm: Option<DigestAlgorithm>,
) -> io::Result<FilterReport> {
    let mut reader = BufReader::new(input);

    match digest_algorithm {
        Some(algorithm) => {
            let mut digest_writer = DigestWriter::new(output, algorithm);
            let stats = scan_games(&mut reader, &mut digest_writer, mode)?;
            Ok(FilterReport {
                stats,
                digest: Some(digest_writer.finalize()),
            })
        }
        None => {
            let stats = scan_games(&mut reader, output, mode)?;
            Ok(FilterReport { stats, digest: None })
        }
    }
}

fn scan_games<R: BufRead, W: Write>(
    reader: &mut R,
    output: &mut W,
    mode: FilterMode,
) -> io::Result<FilterStats> {
    let mut filter = GameStreamFilter::new(mode);
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            break; // EOF
        }
        filter.push_line(&line, output)?;
    }

    output.flush()?;
    let stats = filter.finish();
    tracing::debug!(
        total = stats.total_games,
        kept = stats.kept_games,
        "scan complete"
    );
    Ok(stats)
}
