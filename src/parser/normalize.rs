//! Raw line cleanup applied before classification.

/// The two-character escape marker (backslash, `t`) stripped from line ends.
/// It is matched as a whole sequence, not as a set of characters, so a lone
/// `t` or `\` at either end is kept (`t}` stays `t}`).
const TAB_MARKER: &str = "\\t";

/// Strip surrounding whitespace and any literal `\t` markers from both ends.
///
/// Only the escape text is removed. Real tab characters are handled by the
/// whitespace trim.
pub fn normalize_line(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches(TAB_MARKER)
        .trim_end_matches(TAB_MARKER)
}
