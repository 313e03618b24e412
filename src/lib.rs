//! pgn-game-filter - Fast streaming filter for PGN chess game databases
//!
//! This library scans large PGN files (such as the monthly Lichess database
//! dumps) one line at a time, rebuilds each game's header tags, and copies the
//! games that pass a keep policy to an output stream.
//!
//! # Key Features
//!
//! - **True streaming**: Only the game currently being scanned is held in memory
//! - **Verbatim output**: Kept games are written byte-for-byte as they were read
//! - **Order preservation**: Kept games appear in their original order
//! - **Configurable policy**: Rating, time control and termination thresholds,
//!   or any closure over the header tags
//! - **Checksums**: Optional SHA-256/SHA-512 digest of the filtered output
//!
//! # Examples
//!
//! **Default policy** - both players 2400+, 10 minute base time, normal termination:
//!
//! ```no_run
//! use pgn_game_filter::{filter_games_streaming, FilterConfig, FilterMode};
//! use std::fs::File;
//!
//! let input = File::open("lichess_db_standard_rated_2020-10.pgn").unwrap();
//! let mut output = File::create("filter.pgn").unwrap();
//! let config = FilterConfig::default();
//! let report = filter_games_streaming(input, &mut output, FilterMode::Policy(&config), None).unwrap();
//! println!("Read {} games, kept {}.", report.stats.total_games, report.stats.kept_games);
//! ```
//!
//! **Custom predicate** - any `Fn(&HeaderMap) -> bool` works as a policy:
//!
//! ```
//! use pgn_game_filter::{filter_games_streaming, FilterMode, HeaderMap};
//!
//! let pgn = "[White \"Carlsen\"]\n\n1. e4 1-0\n\n[White \"Anand\"]\n\n1. d4 0-1\n\n";
//! let only_carlsen = |h: &HeaderMap| h.get("White").is_some_and(|w| w == "Carlsen");
//! let mut output = Vec::new();
//! let report = filter_games_streaming(pgn.as_bytes(), &mut output, FilterMode::Policy(&only_carlsen), None).unwrap();
//! assert_eq!(report.stats.total_games, 2);
//! assert_eq!(report.stats.kept_games, 1);
//! assert_eq!(output, b"[White \"Carlsen\"]\n\n1. e4 1-0\n\n");
//! ```

pub mod digest;
pub mod filter;
pub mod header;
pub mod input;
pub mod policy;

pub use digest::{DigestAlgorithm, DigestWriter};
pub use filter::{filter_games_streaming, FilterReport, FilterStats, GameStreamFilter, ScanState};
pub use header::{parse_header_line, HeaderMap, HeaderTag};
pub use input::open_input;
pub use policy::{FilterConfig, FilterMode, KeepPolicy, Rejection};
