use super::Pattern;
use super::model::{Matcher, Segment};

/// Result of one formatting pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formatted {
    pub value: String,
    /// Raw characters discarded because no segment could use them.
    pub dropped: usize,
    /// Literals inserted without a matching raw delimiter.
    pub synthesized: usize,
    /// Every segment of the pattern was satisfied.
    pub complete: bool,
    /// Char offset in `value` that corresponds to the raw cursor.
    pub cursor: usize,
}

pub fn format(pattern: &Pattern, raw: &str) -> String {
    apply(pattern, raw).value
}

/// Consumes `raw` against the pattern segments in order, with the raw cursor
/// taken to be at the end of the input.
pub fn apply(pattern: &Pattern, raw: &str) -> Formatted {
    apply_with_cursor(pattern, raw, raw.chars().count())
}

/// Consumes `raw` against the pattern segments in order and maps `cursor`
/// (a char offset into `raw`) onto the formatted value.
///
/// Raw exhaustion is checked before every segment, so nothing (in particular
/// no delimiter) is appended once the input has run out. A failed match drops
/// a single raw character and retries the same segment.
///
/// The cursor follows the last raw character before it: a kept character maps
/// to its output position, a dropped one to wherever output stood when it was
/// dropped. Synthesized literals never hold the cursor back, so a character
/// typed right before a delimiter lands the cursor after it.
pub fn apply_with_cursor(pattern: &Pattern, raw: &str, cursor: usize) -> Formatted {
    let segments = pattern.segments();
    let mut out = Formatted {
        value: String::with_capacity(raw.len()),
        ..Formatted::default()
    };
    let mut rest = raw;
    let mut idx = 0usize;
    let mut raw_pos = 0usize;
    let mut out_pos = 0usize;
    let mut mapped = (cursor == 0).then_some(0usize);

    while idx < segments.len() && !rest.is_empty() {
        match &segments[idx] {
            Segment::Match(matcher) => match accepted_len(matcher.as_ref(), rest) {
                Some(len) => {
                    let (head, tail) = rest.split_at(len);
                    let taken = head.chars().count();
                    if mapped.is_none()
                        && let Some(offset) = offset_within(cursor, raw_pos, taken)
                    {
                        mapped = Some(out_pos + offset);
                    }
                    out.value.push_str(head);
                    rest = tail;
                    raw_pos += taken;
                    out_pos += taken;
                    idx += 1;
                }
                None => {
                    rest = skip_char(rest);
                    raw_pos += 1;
                    if mapped.is_none() && cursor == raw_pos {
                        mapped = Some(out_pos);
                    }
                    out.dropped += 1;
                }
            },
            Segment::Literal(text) => {
                let width = text.chars().count();
                out.value.push_str(text);
                match rest.strip_prefix(text.as_str()) {
                    Some(tail) => {
                        if mapped.is_none()
                            && let Some(offset) = offset_within(cursor, raw_pos, width)
                        {
                            mapped = Some(out_pos + offset);
                        }
                        rest = tail;
                        raw_pos += width;
                    }
                    None => out.synthesized += 1,
                }
                out_pos += width;
                idx += 1;
            }
        }
    }

    out.dropped += rest.chars().count();
    out.complete = idx == segments.len();
    out.cursor = mapped.unwrap_or(out_pos);

    tracing::trace!(
        segments = segments.len(),
        raw_len = raw.len(),
        dropped = out.dropped,
        synthesized = out.synthesized,
        complete = out.complete,
        cursor = out.cursor,
        "formatted raw input"
    );
    out
}

fn offset_within(cursor: usize, start: usize, len: usize) -> Option<usize> {
    (cursor > start && cursor <= start + len).then(|| cursor - start)
}

fn accepted_len(matcher: &dyn Matcher, rest: &str) -> Option<usize> {
    matcher
        .match_prefix(rest)
        .filter(|&len| len > 0 && rest.is_char_boundary(len))
}

fn skip_char(rest: &str) -> &str {
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}
