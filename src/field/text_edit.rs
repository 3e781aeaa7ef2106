//! Char-indexed edits that produce the raw text handed to the formatter.

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

/// `value` with `text` inserted at char position `cursor`.
pub fn inserted(value: &str, cursor: usize, text: &str) -> String {
    let byte_pos = byte_index_at_char(value, clamp_cursor(cursor, value));
    let mut out = String::with_capacity(value.len() + text.len());
    out.push_str(&value[..byte_pos]);
    out.push_str(text);
    out.push_str(&value[byte_pos..]);
    out
}

/// `value` without the char before `cursor`, or `None` at the start.
pub fn without_prev(value: &str, cursor: usize) -> Option<String> {
    let pos = clamp_cursor(cursor, value);
    if pos == 0 {
        return None;
    }
    without_char_at(value, pos - 1)
}

/// `value` without the char at `cursor`, or `None` at the end.
pub fn without_char_at(value: &str, cursor: usize) -> Option<String> {
    let start = byte_index_at_char(value, cursor);
    let ch = value[start..].chars().next()?;
    let mut out = String::with_capacity(value.len());
    out.push_str(&value[..start]);
    out.push_str(&value[start + ch.len_utf8()..]);
    Some(out)
}

pub fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}
