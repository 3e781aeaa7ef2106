//! Pattern-driven formatting for single-line text fields.
//!
//! A [`Pattern`] is an ordered list of segments: matchers that consume raw
//! characters and literal delimiters that are consumed when typed or inserted
//! when missing. [`format`] turns any raw text into text that conforms to the
//! pattern; [`FormattedInput`] keeps a field's displayed value formatted across
//! edits and reports each formatted value to a change callback.
//!
//! ```
//! use formatted_input::Pattern;
//!
//! let pattern = Pattern::builder()
//!     .digits(2)
//!     .literal("/")
//!     .regex("[12][0-9]{3}")
//!     .build()
//!     .unwrap();
//! assert_eq!(pattern.format("bad19/2005extra"), "19/2005");
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod pattern;

pub use config::FieldConfig;
pub use error::{ConfigError, PatternError};
pub use field::{EditEvent, FieldAttrs, FieldView, FormattedInput};
pub use pattern::{
    CharClass, ClassRun, ExactlySpec, Formatted, MatchSpec, Matcher, Pattern, PatternSpec, Segment,
    SegmentSpec, apply, apply_with_cursor, format,
};
