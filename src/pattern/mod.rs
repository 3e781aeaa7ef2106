mod engine;
mod model;
mod parser;
mod spec;

pub use engine::{Formatted, apply, apply_with_cursor, format};
pub use model::{CharClass, ClassRun, FnMatcher, Matcher, Segment};
pub use spec::{ExactlySpec, MatchSpec, PatternSpec, SegmentSpec};

use crate::error::PatternError;

/// Ordered segments describing the required shape of a formatted value.
///
/// A pattern is immutable once built and cheap to clone; matchers are shared.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn builder() -> PatternBuilder {
        PatternBuilder::default()
    }

    pub fn parse_mask(mask: &str) -> Result<Self, PatternError> {
        parser::parse_mask(mask).map(Self::new)
    }

    pub fn segments(&self) -> &[Segment] {
        self.segments.as_slice()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn format(&self, raw: &str) -> String {
        engine::format(self, raw)
    }

    pub fn apply(&self, raw: &str) -> Formatted {
        engine::apply(self, raw)
    }

    pub fn apply_with_cursor(&self, raw: &str, cursor: usize) -> Formatted {
        engine::apply_with_cursor(self, raw, cursor)
    }

    /// `####-####-####-####`, each group up to four digits.
    pub fn card_number() -> Self {
        grouped(CharClass::Digit, &[4, 4, 4, 4], "-")
    }

    pub fn date_dd_mm_yyyy() -> Self {
        grouped(CharClass::Digit, &[2, 2, 4], "/")
    }

    pub fn time_hh_mm() -> Self {
        grouped(CharClass::Digit, &[2, 2], ":")
    }

    /// `(###) ###-####`
    pub fn phone_us() -> Self {
        Self::new(vec![
            Segment::Literal("(".to_string()),
            Segment::class(ClassRun::exactly(CharClass::Digit, 3)),
            Segment::Literal(") ".to_string()),
            Segment::class(ClassRun::exactly(CharClass::Digit, 3)),
            Segment::Literal("-".to_string()),
            Segment::class(ClassRun::exactly(CharClass::Digit, 4)),
        ])
    }

    pub fn zip_us() -> Self {
        Self::new(vec![Segment::class(ClassRun::exactly(CharClass::Digit, 5))])
    }
}

fn grouped(class: CharClass, widths: &[usize], delimiter: &str) -> Pattern {
    let mut segments = Vec::with_capacity(widths.len() * 2);
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            segments.push(Segment::Literal(delimiter.to_string()));
        }
        segments.push(Segment::class(ClassRun::up_to(class, *width)));
    }
    Pattern::new(segments)
}

/// Collects segments; the first invalid one is reported by [`build`](Self::build).
#[derive(Default)]
pub struct PatternBuilder {
    segments: Vec<Segment>,
    error: Option<PatternError>,
}

impl PatternBuilder {
    pub fn segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn matcher(self, matcher: impl Matcher + 'static) -> Self {
        self.segment(Segment::matcher(matcher))
    }

    pub fn matching<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> Option<usize> + Send + Sync + 'static,
    {
        self.segment(Segment::matching(f))
    }

    pub fn digits(self, len: usize) -> Self {
        self.segment(Segment::class(ClassRun::exactly(CharClass::Digit, len)))
    }

    pub fn letters(self, len: usize) -> Self {
        self.segment(Segment::class(ClassRun::exactly(CharClass::Alpha, len)))
    }

    pub fn alnum(self, len: usize) -> Self {
        self.segment(Segment::class(ClassRun::exactly(CharClass::Alnum, len)))
    }

    pub fn class(self, run: ClassRun) -> Self {
        self.segment(Segment::class(run))
    }

    pub fn literal(self, text: impl Into<String>) -> Self {
        self.try_segment(Segment::literal(text))
    }

    pub fn regex(self, expr: &str) -> Self {
        self.try_segment(Segment::regex(expr))
    }

    pub fn regex_case_insensitive(self, expr: &str) -> Self {
        self.try_segment(Segment::regex_with(expr, true))
    }

    pub fn build(self) -> Result<Pattern, PatternError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Pattern::new(self.segments)),
        }
    }

    fn try_segment(mut self, segment: Result<Segment, PatternError>) -> Self {
        match segment {
            Ok(segment) => self.segments.push(segment),
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }
}
