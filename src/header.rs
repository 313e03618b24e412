use rustc_hash::FxHashMap;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Tag name to tag value for the game currently being scanned
pub type HeaderMap = FxHashMap<String, String>;

static TAG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\[\s*([A-Za-z0-9_]+)\s*"((?:\\[\\"]|[^"])*)"\s*\]\s*$"#)
        .expect("valid PGN tag line regex")
});

/// A single `[Name "value"]` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTag<'a> {
    pub name: &'a str,
    pub value: Cow<'a, str>,
}

/// Parse one PGN header line.
///
/// Returns `None` for anything that is not a well-formed tag pair; callers
/// treat such lines as opaque text. Only `\\` and `\"` are decoded inside the
/// value, every other backslash is kept as written.
pub fn parse_header_line(line: &str) -> Option<HeaderTag<'_>> {
    let caps = TAG_LINE_RE.captures(line)?;
    let name = caps.get(1)?.as_str();
    let raw_value = caps.get(2)?.as_str();

    Some(HeaderTag {
        name,
        value: unescape_value(raw_value),
    })
}

fn unescape_value(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '"' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}
