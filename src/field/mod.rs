mod attrs;
mod text_edit;
mod view;

pub use attrs::FieldAttrs;
pub use view::FieldView;

use crate::pattern::{Formatted, Pattern};
use std::fmt;

pub type ChangeCallback = Box<dyn FnMut(&str) + Send>;

/// Raw text reported by the host element after a user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    pub value: String,
}

impl EditEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A text field whose displayed value always conforms to its pattern.
///
/// Every edit is reformatted and the formatted text, never the raw text, is
/// reported to the change callback, once per edit. Without a pattern the
/// field passes values through unchanged.
pub struct FormattedInput {
    pattern: Option<Pattern>,
    value: String,
    cursor: usize,
    complete: bool,
    attrs: FieldAttrs,
    on_change: Option<ChangeCallback>,
}

impl FormattedInput {
    pub fn new(pattern: Pattern) -> Self {
        Self::initialize(Some(pattern), "")
    }

    pub fn plain() -> Self {
        Self::initialize(None, "")
    }

    /// Builds a field showing `raw` formatted by `pattern`. Does not notify.
    pub fn initialize(pattern: Option<Pattern>, raw: &str) -> Self {
        let mut field = Self {
            pattern,
            value: String::new(),
            cursor: 0,
            complete: false,
            attrs: FieldAttrs::default(),
            on_change: None,
        };
        field.set_value(raw);
        field
    }

    pub fn with_value(mut self, raw: &str) -> Self {
        self.set_value(raw);
        self
    }

    pub fn with_on_change(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn with_attrs(mut self, attrs: FieldAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.attrs.name = Some(name.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.attrs.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.attrs.class_name = Some(class_name.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.extra.insert(key.into(), value.into());
        self
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn attrs(&self) -> &FieldAttrs {
        &self.attrs
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Replaces the displayed value without notifying. The cursor moves to
    /// the end.
    pub fn set_value(&mut self, raw: &str) {
        let formatted = self.reformat(raw, text_edit::char_count(raw));
        self.store(formatted);
    }

    /// Formats `raw`, displays it and reports it to the change callback.
    ///
    /// The host replaced the whole text, so the cursor moves to the end of
    /// the formatted value.
    pub fn on_raw_edit(&mut self, raw: &str) -> &str {
        self.commit(raw, text_edit::char_count(raw))
    }

    pub fn handle_event(&mut self, event: EditEvent) -> &str {
        self.on_raw_edit(event.value.as_str())
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf))
    }

    /// Inserts `text` at the cursor, as typing or pasting would.
    pub fn insert_str(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let raw = text_edit::inserted(&self.value, self.cursor, text);
        let target = self.cursor + text_edit::char_count(text);
        self.edit(raw, target)
    }

    pub fn backspace(&mut self) -> bool {
        let Some(raw) = text_edit::without_prev(&self.value, self.cursor) else {
            return false;
        };
        let target = self.cursor.saturating_sub(1);
        self.edit(raw, target)
    }

    pub fn delete(&mut self) -> bool {
        let Some(raw) = text_edit::without_char_at(&self.value, self.cursor) else {
            return false;
        };
        let target = self.cursor;
        self.edit(raw, target)
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= text_edit::char_count(&self.value) {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = text_edit::char_count(&self.value);
    }

    pub fn view(&self) -> FieldView {
        FieldView {
            value: self.value.clone(),
            attrs: self.attrs.clone(),
            cursor_col: view::cursor_col(&self.value, self.cursor),
            complete: self.complete,
        }
    }

    /// Routes a locally edited raw string through the formatter. `target` is
    /// the cursor in `raw` and is carried over to the formatted text.
    fn edit(&mut self, raw: String, target: usize) -> bool {
        self.commit(raw.as_str(), target);
        true
    }

    fn commit(&mut self, raw: &str, raw_cursor: usize) -> &str {
        let formatted = self.reformat(raw, raw_cursor);
        tracing::debug!(
            field = self.attrs.name.as_deref().unwrap_or(""),
            dropped = formatted.dropped,
            synthesized = formatted.synthesized,
            complete = formatted.complete,
            cursor = formatted.cursor,
            "raw edit formatted"
        );
        self.store(formatted);

        if let Some(callback) = self.on_change.as_mut() {
            callback(self.value.as_str());
        }
        self.value.as_str()
    }

    fn reformat(&self, raw: &str, raw_cursor: usize) -> Formatted {
        match &self.pattern {
            Some(pattern) => pattern.apply_with_cursor(raw, raw_cursor),
            None => Formatted {
                value: raw.to_string(),
                complete: true,
                cursor: raw_cursor,
                ..Formatted::default()
            },
        }
    }

    fn store(&mut self, formatted: Formatted) {
        self.cursor = text_edit::clamp_cursor(formatted.cursor, &formatted.value);
        self.value = formatted.value;
        self.complete = formatted.complete;
    }
}

impl Default for FormattedInput {
    fn default() -> Self {
        Self::plain()
    }
}

impl fmt::Debug for FormattedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedInput")
            .field("pattern", &self.pattern)
            .field("value", &self.value)
            .field("cursor", &self.cursor)
            .field("complete", &self.complete)
            .field("attrs", &self.attrs)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn digit_colon_letter() -> Pattern {
        Pattern::builder()
            .regex("[0-9]{1}")
            .literal(":")
            .regex_case_insensitive("[a-z]{1}")
            .build()
            .expect("pattern")
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(&str) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: &str| {
            sink.lock().expect("lock").push(value.to_string())
        })
    }

    #[test]
    fn initialize_formats_without_notifying() {
        let (seen, callback) = recorder();
        let field = FormattedInput::initialize(Some(digit_colon_letter()), "3a")
            .with_on_change(callback);
        assert_eq!(field.value(), "3:a");
        assert!(field.is_complete());
        assert!(seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn plain_field_passes_values_through() {
        let mut field = FormattedInput::plain().with_value("test value");
        assert_eq!(field.value(), "test value");
        assert_eq!(field.on_raw_edit("anything goes"), "anything goes");
    }

    #[test]
    fn every_edit_notifies_once_with_formatted_text() {
        let (seen, callback) = recorder();
        let mut field = FormattedInput::new(digit_colon_letter()).with_on_change(callback);

        field.handle_event(EditEvent::new("3a"));
        field.handle_event(EditEvent::new("3a"));
        field.handle_event(EditEvent::new(""));

        assert_eq!(*seen.lock().expect("lock"), vec!["3:a", "3:a", ""]);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn typing_steps_over_synthesized_delimiters() {
        let mut field = FormattedInput::new(digit_colon_letter());
        assert!(field.insert_char('7'));
        assert_eq!(field.value(), "7");
        assert!(field.insert_char('q'));
        assert_eq!(field.value(), "7:q");
        assert_eq!(field.cursor(), 3);
        assert!(field.is_complete());
    }

    #[test]
    fn rejected_keystroke_still_notifies() {
        let (seen, callback) = recorder();
        let mut field = FormattedInput::new(digit_colon_letter()).with_on_change(callback);
        field.insert_char('x');
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor(), 0);
        assert_eq!(*seen.lock().expect("lock"), vec![""]);
    }

    #[test]
    fn backspace_and_delete_reformat() {
        let mut field = FormattedInput::new(Pattern::card_number()).with_value("12345678");
        assert_eq!(field.value(), "1234-5678");

        assert!(field.backspace());
        assert_eq!(field.value(), "1234-567");

        field.move_home();
        assert!(field.delete());
        assert_eq!(field.value(), "234-567");
        assert_eq!(field.cursor(), 0);
        assert!(!field.backspace());
    }

    #[test]
    fn paste_in_the_middle_clamps_cursor() {
        let mut field = FormattedInput::new(Pattern::card_number()).with_value("1111");
        field.move_home();
        assert!(field.move_right());
        assert!(field.insert_str("22"));
        assert_eq!(field.value(), "1221-11");
        assert_eq!(field.cursor(), 3);
        assert!(!field.insert_str(""));
    }

    #[test]
    fn insert_before_a_delimiter_lands_after_the_new_char() {
        let mut field = FormattedInput::new(Pattern::card_number()).with_value("12345678");
        field.move_home();
        for _ in 0..4 {
            assert!(field.move_right());
        }
        assert!(field.insert_char('9'));
        assert_eq!(field.value(), "1234-9-5678");
        assert_eq!(field.cursor(), 6);
    }

    #[test]
    fn host_edit_moves_cursor_to_the_end() {
        let mut field = FormattedInput::new(digit_colon_letter());
        assert_eq!(field.cursor(), 0);
        field.handle_event(EditEvent::new("3a"));
        assert_eq!(field.value(), "3:a");
        assert_eq!(field.cursor(), 3);
        assert_eq!(field.view().cursor_col, 3);

        field.move_home();
        field.handle_event(EditEvent::new("4b"));
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn cursor_movement_is_bounded() {
        let mut field = FormattedInput::plain().with_value("ab");
        assert!(!field.move_right());
        assert!(field.move_left());
        assert!(field.move_left());
        assert!(!field.move_left());
        field.move_end();
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn view_forwards_attributes_unchanged() {
        let field = FormattedInput::plain()
            .with_name("myInput")
            .with_placeholder("Your text here")
            .with_class_name("class1 class2");
        let view = field.view();
        assert_eq!(view.attrs.name.as_deref(), Some("myInput"));
        assert_eq!(view.attrs.placeholder.as_deref(), Some("Your text here"));
        assert_eq!(view.attrs.class_name.as_deref(), Some("class1 class2"));
        assert_eq!(view.value, "");
    }
}
