//! Line classification.
//!
//! A normalized line is one of: blank, a quoted key/value pair, a quoted
//! tag, a lone brace, or something unrecognized. Quoted segments are found
//! with a small scanner rather than a pattern engine.

/// Characters allowed between the quotes of a segment, besides ASCII
/// letters and digits.
pub const QUOTED_PUNCTUATION: &[u8] = b"\\:-() _.";

/// What a single normalized line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// Two quoted segments: `"key" "value"`
    Pair { key: &'a str, value: &'a str },
    /// One quoted segment, expected to introduce a block
    Tag(&'a str),
    /// A lone `{`
    Open,
    /// A lone `}`
    Close,
    Other,
}

fn is_quoted_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || QUOTED_PUNCTUATION.contains(&b)
}

/// Find every quoted segment in `line`, returning the text between the quotes.
///
/// Segments are matched left to right without overlapping. A `"` that does
/// not begin a valid segment is skipped and scanning resumes on the next
/// character, so `"a!"b"` yields the single segment `b`. Text between
/// segments is ignored.
pub fn quoted_segments(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'"' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && is_quoted_byte(bytes[end]) {
                end += 1;
            }
            if end < bytes.len() && bytes[end] == b'"' {
                segments.push(&line[start..end]);
                i = end + 1;
                continue;
            }
        }
        i += 1;
    }

    segments
}

/// Classify an already-normalized line.
pub fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }

    match *quoted_segments(line).as_slice() {
        [key, value] => Line::Pair { key, value },
        [tag] => Line::Tag(tag),
        [] => match line {
            "{" => Line::Open,
            "}" => Line::Close,
            _ => Line::Other,
        },
        _ => Line::Other,
    }
}
