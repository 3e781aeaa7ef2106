use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;

/// Something that can claim a prefix of the remaining raw input.
///
/// `match_prefix` returns the byte length of the prefix it consumes. The
/// length must be non-zero and land on a char boundary; anything else is
/// handled by the engine exactly like `None`.
pub trait Matcher: Send + Sync {
    fn match_prefix(&self, input: &str) -> Option<usize>;

    /// Short human readable form used in `Debug` output and logs.
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

/// A match only counts when it starts at the head of `input`.
impl Matcher for Regex {
    fn match_prefix(&self, input: &str) -> Option<usize> {
        self.find(input)
            .filter(|found| found.start() == 0)
            .map(|found| found.end())
    }

    fn describe(&self) -> String {
        format!("/{}/", self.as_str())
    }
}

/// Adapts a closure into a [`Matcher`].
pub struct FnMatcher<F>(pub F);

impl<F> Matcher for FnMatcher<F>
where
    F: Fn(&str) -> Option<usize> + Send + Sync,
{
    fn match_prefix(&self, input: &str) -> Option<usize> {
        (self.0)(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Alpha,
    Alnum,
    Any,
}

impl CharClass {
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Digit => ch.is_ascii_digit(),
            Self::Alpha => ch.is_ascii_alphabetic(),
            Self::Alnum => ch.is_ascii_alphanumeric(),
            Self::Any => true,
        }
    }

    fn symbol(self) -> char {
        match self {
            Self::Digit => '#',
            Self::Alpha => 'A',
            Self::Alnum => '*',
            Self::Any => '?',
        }
    }
}

/// A greedy run of `min..=max` characters from one [`CharClass`].
///
/// `min` is at least one so a run never matches empty input. `max: None`
/// means the run takes every accepted character that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRun {
    class: CharClass,
    min: usize,
    max: Option<usize>,
}

impl ClassRun {
    pub fn new(class: CharClass, min: usize, max: Option<usize>) -> Self {
        let min = min.max(1);
        Self {
            class,
            min,
            max: max.map(|max| max.max(min)),
        }
    }

    pub fn exactly(class: CharClass, len: usize) -> Self {
        Self::new(class, len, Some(len))
    }

    pub fn up_to(class: CharClass, max: usize) -> Self {
        Self::new(class, 1, Some(max))
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }
}

impl Matcher for ClassRun {
    fn match_prefix(&self, input: &str) -> Option<usize> {
        let mut count = 0usize;
        let mut len = 0usize;
        for ch in input.chars() {
            if self.max.is_some_and(|max| count >= max) || !self.class.accepts(ch) {
                break;
            }
            count += 1;
            len += ch.len_utf8();
        }
        (count >= self.min).then_some(len)
    }

    fn describe(&self) -> String {
        let symbol = self.class.symbol();
        match self.max {
            Some(max) if max == self.min => format!("{symbol}{{{max}}}"),
            Some(max) => format!("{symbol}{{{},{max}}}", self.min),
            None => format!("{symbol}{{{},}}", self.min),
        }
    }
}

/// One element of a [`Pattern`](super::Pattern).
///
/// `Literal` text is expected to be non-empty; the checked constructors
/// enforce that, and an empty literal that slips through is a no-op.
#[derive(Clone)]
pub enum Segment {
    Match(Arc<dyn Matcher>),
    Literal(String),
}

impl Segment {
    pub fn matcher(matcher: impl Matcher + 'static) -> Self {
        Self::Match(Arc::new(matcher))
    }

    pub fn matching<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<usize> + Send + Sync + 'static,
    {
        Self::matcher(FnMatcher(f))
    }

    pub fn class(run: ClassRun) -> Self {
        Self::matcher(run)
    }

    pub fn literal(text: impl Into<String>) -> Result<Self, PatternError> {
        let text = text.into();
        if text.is_empty() {
            return Err(PatternError::EmptyLiteral);
        }
        Ok(Self::Literal(text))
    }

    /// Compiles `expr` anchored at the head of the remaining input.
    pub fn regex(expr: &str) -> Result<Self, PatternError> {
        Self::regex_with(expr, false)
    }

    pub fn regex_with(expr: &str, case_insensitive: bool) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(&format!("^(?:{expr})"))
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|err| PatternError::invalid_regex(expr, &err))?;
        Ok(Self::matcher(regex))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match(matcher) => f.debug_tuple("Match").field(&matcher.describe()).finish(),
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
        }
    }
}
