use super::model::{CharClass, ClassRun, Segment};
use crate::error::PatternError;

/// Parses the mask shorthand into segments.
///
/// `#` digit, `A` letter, `*` letter or digit, `?` any character, each with an
/// optional `{n}`, `{m,n}`, `{m,}` or `{}` quantifier. `YYYY`, `MM`, `DD`,
/// `HH`, `mm` and `ss` are digit runs of up to their own width. `\` escapes
/// the next character. Everything else is literal text.
pub(super) fn parse_mask(mask: &str) -> Result<Vec<Segment>, PatternError> {
    let mut segments = Vec::<Segment>::new();
    let mut literal = String::new();
    let chars: Vec<char> = mask.chars().collect();
    let mut idx = 0usize;

    while idx < chars.len() {
        let ch = chars[idx];

        if ch == '\\' {
            let Some(escaped) = chars.get(idx + 1).copied() else {
                return Err(PatternError::invalid_mask(idx, "escape at end of mask"));
            };
            literal.push(escaped);
            idx += 2;
            continue;
        }

        let short_class = match ch {
            '#' => Some(CharClass::Digit),
            'A' => Some(CharClass::Alpha),
            '*' => Some(CharClass::Alnum),
            '?' => Some(CharClass::Any),
            _ => None,
        };

        if let Some(class) = short_class {
            let (min_len, max_len, next_idx) = parse_quantifier(&chars, idx + 1)?;
            flush_literal(&mut literal, &mut segments);
            segments.push(Segment::class(ClassRun::new(class, min_len, max_len)));
            idx = next_idx;
            continue;
        }

        if ch.is_alphabetic() {
            let start = idx;
            while idx < chars.len() && chars[idx].is_alphabetic() {
                idx += 1;
            }
            let token: String = chars[start..idx].iter().collect();
            if let Some(width) = date_token_width(token.as_str()) {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::class(ClassRun::up_to(CharClass::Digit, width)));
            } else {
                literal.push_str(token.as_str());
            }
            continue;
        }

        literal.push(ch);
        idx += 1;
    }

    flush_literal(&mut literal, &mut segments);
    Ok(segments)
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn date_token_width(token: &str) -> Option<usize> {
    match token {
        "YYYY" => Some(4),
        "MM" | "DD" | "HH" | "mm" | "ss" => Some(2),
        _ => None,
    }
}

fn parse_quantifier(
    chars: &[char],
    mut idx: usize,
) -> Result<(usize, Option<usize>, usize), PatternError> {
    if idx >= chars.len() || chars[idx] != '{' {
        return Ok((1, Some(1), idx));
    }
    let open = idx;
    idx += 1;
    let start = idx;

    while idx < chars.len() && chars[idx] != '}' {
        idx += 1;
    }
    if idx >= chars.len() {
        return Err(PatternError::invalid_mask(open, "unterminated quantifier"));
    }

    let inner: String = chars[start..idx].iter().collect();
    idx += 1;

    if inner.is_empty() {
        return Ok((1, None, idx));
    }

    let (min_len, max_len) = match inner.split_once(',') {
        Some((min, max)) => {
            let min_len = if min.trim().is_empty() {
                1
            } else {
                parse_len(min, open)?
            };
            let max_len = if max.trim().is_empty() {
                None
            } else {
                Some(parse_len(max, open)?)
            };
            (min_len, max_len)
        }
        None => {
            let len = parse_len(inner.as_str(), open)?;
            (len, Some(len))
        }
    };

    if min_len == 0 {
        return Err(PatternError::invalid_mask(
            open,
            "a run must match at least one character",
        ));
    }
    if let Some(max_len) = max_len
        && max_len < min_len
    {
        return Err(PatternError::invalid_mask(
            open,
            format!("maximum {max_len} is below minimum {min_len}"),
        ));
    }

    Ok((min_len, max_len, idx))
}

fn parse_len(text: &str, position: usize) -> Result<usize, PatternError> {
    text.trim()
        .parse::<usize>()
        .map_err(|_| PatternError::invalid_mask(position, format!("`{text}` is not a length")))
}
