use super::attrs::FieldAttrs;
use unicode_width::UnicodeWidthStr;

/// Snapshot of what the host element should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub value: String,
    pub attrs: FieldAttrs,
    /// Cursor position in terminal columns.
    pub cursor_col: usize,
    pub complete: bool,
}

impl FieldView {
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.value.as_str())
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut json = serde_json::json!({
            "value": self.value,
            "cursor": {
                "col": self.cursor_col,
            },
            "width": self.width(),
            "complete": self.complete,
        });
        if let (Some(object), Ok(serde_json::Value::Object(attrs))) =
            (json.as_object_mut(), serde_json::to_value(&self.attrs))
        {
            object.extend(attrs);
        }
        json
    }
}

pub(super) fn cursor_col(value: &str, cursor: usize) -> usize {
    value
        .chars()
        .take(cursor)
        .map(|ch| unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}
