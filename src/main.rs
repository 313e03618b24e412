use anyhow::{Context, Result};
use clap::Parser;
use pgn_game_filter::{filter_games_streaming, open_input, DigestAlgorithm, FilterConfig, FilterMode};
use std::fs::File;
use std::io::{self, BufWriter};
use tracing_subscriber::EnvFilter;

/// Copy the games of a PGN database that pass rating, time control and
/// termination thresholds.
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(after_help = "Examples:
  pgn-game-filter lichess_db_standard_rated_2020-10.pgn filter.pgn
  pgn-game-filter --min-elo 2000 --min-time-control 180 games.pgn.zst > strong.pgn
  zstdcat games.pgn.zst | pgn-game-filter --digest sha256 - filtered.pgn")]
struct Args {
    /// PGN input file (`-` for stdin, `.zst` files are decompressed)
    input: String,

    /// Output file (defaults to stdout)
    output: Option<String>,

    /// Minimum WhiteElo and BlackElo
    #[arg(long, default_value_t = 2400)]
    min_elo: i64,

    /// Minimum base time in seconds (leading number of TimeControl)
    #[arg(long, value_name = "SECONDS", default_value_t = 600)]
    min_time_control: u64,

    /// Required Termination tag value
    #[arg(long, value_name = "VALUE", default_value = "Normal")]
    termination: String,

    /// Keep every complete game, ignoring the thresholds
    #[arg(long)]
    passthrough: bool,

    /// Compute a checksum of the filtered output (sha256, sha512)
    #[arg(long, value_name = "ALGORITHM")]
    digest: Option<DigestAlgorithm>,
}

impl Args {
    fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            minimum_elo: self.min_elo,
            minimum_time_control_seconds: self.min_time_control,
            required_termination: self.termination.clone(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.filter_config();
    let mode = if args.passthrough {
        FilterMode::Passthrough
    } else {
        FilterMode::Policy(&config)
    };
    tracing::info!(?config, passthrough = args.passthrough, "starting filter");

    let input =
        open_input(&args.input).with_context(|| format!("Failed to open {}", args.input))?;

    let report = if let Some(output_path) = args.output.as_deref() {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create {}", output_path))?;
        let mut output = BufWriter::new(file);
        let report = filter_games_streaming(input, &mut output, mode, args.digest)
            .context("Failed to filter games")?;
        eprintln!("Written to {}", output_path);
        report
    } else {
        let mut output = BufWriter::new(io::stdout().lock());
        filter_games_streaming(input, &mut output, mode, args.digest)
            .context("Failed to filter games")?
    };

    if let (Some(algorithm), Some(checksum)) = (args.digest, &report.digest) {
        eprintln!("{}: {}", algorithm.name(), checksum);
    }
    eprintln!(
        "Read {} games, kept {}.",
        report.stats.total_games, report.stats.kept_games
    );

    Ok(())
}
