use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use zstd::stream::read::Decoder as ZstdDecoder;

/// Open a PGN source.
///
/// `-` reads stdin. Paths ending in `.zst` (the format the Lichess database
/// is published in) are decompressed while streaming.
pub fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        return Ok(Box::new(io::stdin()));
    }

    let file = File::open(path)?;
    if is_zstd_path(Path::new(path)) {
        tracing::debug!(path, "decoding zstd input");
        Ok(Box::new(ZstdDecoder::new(file)?))
    } else {
        Ok(Box::new(file))
    }
}

fn is_zstd_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zst"))
}
