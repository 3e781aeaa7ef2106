use super::Pattern;
use super::model::Segment;
use crate::error::PatternError;
use serde::{Deserialize, Deserializer, Serialize};

/// Declarative form of one segment, as written in configuration files.
///
/// ```yaml
/// - match: "[0-9]{2}"
/// - exactly: "/"
/// - match: "[a-z]"
///   case_insensitive: true
/// ```
///
/// An entry carries either `match` or `exactly`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentSpec {
    Match(MatchSpec),
    Exactly(ExactlySpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchSpec {
    #[serde(rename = "match")]
    pub expr: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExactlySpec {
    pub exactly: String,
}

impl SegmentSpec {
    pub fn matching(expr: impl Into<String>) -> Self {
        Self::Match(MatchSpec {
            expr: expr.into(),
            case_insensitive: false,
        })
    }

    pub fn matching_case_insensitive(expr: impl Into<String>) -> Self {
        Self::Match(MatchSpec {
            expr: expr.into(),
            case_insensitive: true,
        })
    }

    pub fn exactly(text: impl Into<String>) -> Self {
        Self::Exactly(ExactlySpec {
            exactly: text.into(),
        })
    }

    pub fn compile(&self) -> Result<Segment, PatternError> {
        match self {
            Self::Match(spec) => Segment::regex_with(&spec.expr, spec.case_insensitive),
            Self::Exactly(spec) => Segment::literal(spec.exactly.as_str()),
        }
    }
}

/// A pattern as found in configuration: a mask string or a segment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    Mask(String),
    Segments(Vec<SegmentSpec>),
}

impl PatternSpec {
    pub fn compile(&self) -> Result<Pattern, PatternError> {
        match self {
            Self::Mask(mask) => Pattern::parse_mask(mask),
            Self::Segments(specs) => specs
                .iter()
                .map(SegmentSpec::compile)
                .collect::<Result<Vec<_>, _>>()
                .map(Pattern::new),
        }
    }
}

impl TryFrom<&PatternSpec> for Pattern {
    type Error = PatternError;

    fn try_from(spec: &PatternSpec) -> Result<Self, Self::Error> {
        spec.compile()
    }
}

/// Patterns deserialize from the same forms as [`PatternSpec`] and are
/// compiled on the spot, so an invalid mask or regex is a deserialization
/// error.
impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        PatternSpec::deserialize(deserializer)?
            .compile()
            .map_err(serde::de::Error::custom)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_segment_list_from_json() {
        let spec: PatternSpec = serde_json::from_str(
            r#"[{"match": "[0-9]{1}"}, {"exactly": ":"}, {"match": "[a-z]{1}", "case_insensitive": true}]"#,
        )
        .expect("spec");
        assert_eq!(
            spec,
            PatternSpec::Segments(vec![
                SegmentSpec::matching("[0-9]{1}"),
                SegmentSpec::exactly(":"),
                SegmentSpec::matching_case_insensitive("[a-z]{1}"),
            ])
        );

        let pattern = spec.compile().expect("pattern");
        assert_eq!(pattern.format("3A"), "3:A");
    }

    #[test]
    fn deserializes_mask_string_from_yaml() {
        let spec: PatternSpec = serde_yaml::from_str("\"#{2}/#{4}\"").expect("spec");
        assert_eq!(spec, PatternSpec::Mask("#{2}/#{4}".to_string()));
        assert_eq!(spec.compile().expect("pattern").format("122030"), "12/2030");
    }

    #[test]
    fn serializes_without_default_flags() {
        let json = serde_json::to_string(&SegmentSpec::matching("[0-9]")).expect("json");
        assert_eq!(json, r#"{"match":"[0-9]"}"#);
    }

    #[test]
    fn compile_rejects_empty_literal_and_bad_regex() {
        let empty = PatternSpec::Segments(vec![SegmentSpec::exactly("")]);
        assert_eq!(empty.compile().unwrap_err(), PatternError::EmptyLiteral);

        let bad = PatternSpec::Segments(vec![SegmentSpec::matching("(")]);
        assert!(matches!(
            Pattern::try_from(&bad),
            Err(PatternError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn segment_entry_with_both_keys_is_rejected() {
        let both = serde_json::from_str::<SegmentSpec>(r#"{"match": "[0-9]", "exactly": "/"}"#);
        assert!(both.is_err());

        let typo = serde_json::from_str::<SegmentSpec>(r#"{"match": "[0-9]", "case": true}"#);
        assert!(typo.is_err());
    }

    #[test]
    fn pattern_deserializes_directly() {
        let from_list: Pattern =
            serde_json::from_str(r#"[{"match": "[0-9]{2}"}, {"exactly": "/"}, {"match": "[0-9]{4}"}]"#)
                .expect("list pattern");
        assert_eq!(from_list.format("122030"), "12/2030");

        let from_mask: Pattern = serde_yaml::from_str("\"#{2}:#{2}\"").expect("mask pattern");
        assert_eq!(from_mask.format("0930"), "09:30");
    }

    #[test]
    fn pattern_deserialization_reports_compile_errors() {
        let err = serde_json::from_str::<Pattern>(r#"[{"match": "("}]"#).expect_err("bad regex");
        assert!(err.to_string().contains("invalid match expression"), "{err}");

        assert!(serde_json::from_str::<Pattern>("\"#{0}\"").is_err());
    }
}
