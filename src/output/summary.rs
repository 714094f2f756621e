//! Scanner output summarizing and chunking

/// Number of trailing scanner lines worth showing
pub const SUMMARY_LINES: usize = 12;

/// Maximum bytes per printed message
pub const CHUNK_SIZE: usize = 2000;

const LABEL_SEPARATOR: &str = ": ";

/// Keep the last [`SUMMARY_LINES`] lines, each without its `label: ` prefix.
///
/// Output shorter than that is returned unchanged.
pub fn summarize(output: &str) -> String {
    let lines: Vec<&str> = output.split('\n').collect();
    if lines.len() < SUMMARY_LINES {
        return output.to_string();
    }

    lines[lines.len() - SUMMARY_LINES..]
        .iter()
        .map(|line| match line.find(LABEL_SEPARATOR) {
            Some(idx) => &line[idx + LABEL_SEPARATOR.len()..],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split `text` into pieces of at most `size` bytes, remainder last.
///
/// Splits never fall inside a UTF-8 sequence, so a piece may be a few bytes
/// short. Empty text yields a single empty piece.
pub fn chunks(text: &str, size: usize) -> Vec<&str> {
    if text.is_empty() {
        return vec![text];
    }

    let mut pieces = Vec::with_capacity(text.len() / size.max(1) + 1);
    let mut rest = text;
    while !rest.is_empty() {
        let mut end = size.min(rest.len());
        while end > 0 && !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            // size smaller than the next character
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (head, tail) = rest.split_at(end);
        pieces.push(head);
        rest = tail;
    }
    pieces
}
