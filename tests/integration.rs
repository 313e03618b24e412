use pgn_game_filter::{
    filter_games_streaming, open_input, DigestAlgorithm, FilterConfig, FilterMode, FilterStats,
};
use std::io::Write;

fn game(white_elo: &str, black_elo: &str, time_control: &str, termination: &str) -> String {
    format!(
        r#"[Event "Rated Classical game"]
[Site "https://lichess.org/MgNy9lzj"]
[White "alice"]
[Black "bob"]
[Result "1-0"]
[WhiteElo "{white_elo}"]
[BlackElo "{black_elo}"]
[TimeControl "{time_control}"]
[Termination "{termination}"]

1. e4 {{ [%clk 0:10:00] }} e5 {{ [%clk 0:10:00] }} 2. Bc4 c6 3. Qf3 b5 4. Qxf7# 1-0

"#
    )
}

fn valid_game() -> String {
    game("2500", "2450", "600+5", "Normal")
}

fn filter(input: &str) -> (String, FilterStats) {
    let config = FilterConfig::default();
    let mut output = Vec::new();
    let report =
        filter_games_streaming(input.as_bytes(), &mut output, FilterMode::Policy(&config), None)
            .unwrap();
    (String::from_utf8(output).unwrap(), report.stats)
}

fn counts(stats: FilterStats) -> (u64, u64) {
    (stats.total_games, stats.kept_games)
}

#[test]
fn test_single_valid_game_kept() {
    let input = valid_game();
    let (output, stats) = filter(&input);
    assert_eq!(output, input);
    assert_eq!(counts(stats), (1, 1));
}

#[test]
fn test_abnormal_termination_discarded() {
    let (output, stats) = filter(&game("2500", "2450", "600+5", "Time forfeit"));
    assert!(output.is_empty());
    assert_eq!(counts(stats), (1, 0));
}

#[test]
fn test_low_rating_discarded() {
    let (output, stats) = filter(&game("2100", "2450", "600+5", "Normal"));
    assert!(output.is_empty());
    assert_eq!(counts(stats), (1, 0));
}

#[test]
fn test_fast_time_control_discarded() {
    let (output, stats) = filter(&game("2500", "2450", "300+0", "Normal"));
    assert!(output.is_empty());
    assert_eq!(counts(stats), (1, 0));
}

#[test]
fn test_valid_and_invalid_back_to_back() {
    let valid = valid_game();
    let invalid = game("2500", "2450", "600+5", "Abandoned");

    let (output, stats) = filter(&format!("{invalid}{valid}"));
    assert_eq!(output, valid);
    assert_eq!(counts(stats), (2, 1));

    let (output, stats) = filter(&format!("{valid}{invalid}"));
    assert_eq!(output, valid);
    assert_eq!(counts(stats), (2, 1));
}

#[test]
fn test_dangling_record_excluded_from_counts() {
    let complete = valid_game();
    let dangling = complete.trim_end_matches('\n').to_string() + "\n";

    let (output, stats) = filter(&format!("{complete}{dangling}"));
    assert_eq!(output, complete);
    assert_eq!(counts(stats), (1, 1));

    // Adding back the final blank line brings the game into both counts
    let (output, stats) = filter(&format!("{complete}{dangling}\n"));
    assert_eq!(output, format!("{complete}{complete}"));
    assert_eq!(counts(stats), (2, 2));
}

#[test]
fn test_order_preservation() {
    let games = [
        game("2600", "2600", "900+0", "Normal"),
        game("1500", "2600", "900+0", "Normal"),
        game("2401", "2700", "600+0", "Normal"),
        game("2600", "2600", "60+0", "Normal"),
        game("2800", "2750", "5400+30", "Normal"),
    ];
    let input: String = games.concat();

    let (output, stats) = filter(&input);
    assert_eq!(output, format!("{}{}{}", games[0], games[2], games[4]));
    assert_eq!(counts(stats), (5, 3));
}

#[test]
fn test_filtering_is_idempotent() {
    let input = [
        valid_game(),
        game("2000", "2450", "600+5", "Normal"),
        game("2900", "2850", "1800+0", "Normal"),
    ]
    .concat();

    let (first, first_stats) = filter(&input);
    let (second, second_stats) = filter(&first);

    assert_eq!(first, second);
    assert_eq!(second_stats.total_games, second_stats.kept_games);
    assert_eq!(second_stats.total_games, first_stats.kept_games);
}

#[test]
fn test_custom_config() {
    let config = FilterConfig {
        minimum_elo: 1200,
        minimum_time_control_seconds: 300,
        required_termination: "Time forfeit".to_string(),
    };
    let input = [
        game("1254", "1262", "300+0", "Time forfeit"),
        game("1254", "1262", "300+0", "Normal"),
    ]
    .concat();

    let mut output = Vec::new();
    let report =
        filter_games_streaming(input.as_bytes(), &mut output, FilterMode::Policy(&config), None)
            .unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        game("1254", "1262", "300+0", "Time forfeit")
    );
    assert_eq!(counts(report.stats), (2, 1));
}

#[test]
fn test_digest_consistency() {
    let input = [valid_game(), game("1000", "1000", "600+5", "Normal")].concat();
    let config = FilterConfig::default();

    let mut output1 = Vec::new();
    let report1 = filter_games_streaming(
        input.as_bytes(),
        &mut output1,
        FilterMode::Policy(&config),
        Some(DigestAlgorithm::Sha256),
    )
    .unwrap();

    let mut output2 = Vec::new();
    let report2 = filter_games_streaming(
        valid_game().as_bytes(),
        &mut output2,
        FilterMode::Passthrough,
        Some(DigestAlgorithm::Sha256),
    )
    .unwrap();

    // Same written bytes give the same checksum regardless of what was dropped
    assert_eq!(output1, output2);
    assert_eq!(report1.digest, report2.digest);
    assert_eq!(report1.digest.unwrap().len(), 64);
}

#[test]
fn test_zstd_input_matches_plain_input() {
    let input = [valid_game(), game("2500", "2450", "120+1", "Normal")].concat();
    let compressed = zstd::stream::encode_all(input.as_bytes(), 3).unwrap();

    let mut file = tempfile::Builder::new().suffix(".pgn.zst").tempfile().unwrap();
    file.write_all(&compressed).unwrap();
    file.flush().unwrap();

    let config = FilterConfig::default();
    let mut output = Vec::new();
    let report = filter_games_streaming(
        open_input(file.path().to_str().unwrap()).unwrap(),
        &mut output,
        FilterMode::Policy(&config),
        None,
    )
    .unwrap();

    let (plain_output, plain_stats) = filter(&input);
    assert_eq!(String::from_utf8(output).unwrap(), plain_output);
    assert_eq!(report.stats, plain_stats);
}
