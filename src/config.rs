use crate::error::ConfigError;
use crate::field::{FieldAttrs, FormattedInput};
use crate::pattern::{Pattern, PatternSpec};
use serde::{Deserialize, Serialize};

/// Declarative description of one field.
///
/// ```yaml
/// pattern:
///   - match: "[0-9]{2}"
///   - exactly: "/"
///   - match: "[12][0-9]{3}"
/// value: "0"
/// attrs:
///   name: expiry
///   placeholder: MM/YYYY
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternSpec>,
    pub value: String,
    pub attrs: FieldAttrs,
}

impl FieldConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(input)?;
        tracing::debug!(
            has_pattern = config.pattern.is_some(),
            name = config.attrs.name.as_deref().unwrap_or(""),
            "loaded yaml field config"
        );
        Ok(config)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        tracing::debug!(
            has_pattern = config.pattern.is_some(),
            name = config.attrs.name.as_deref().unwrap_or(""),
            "loaded json field config"
        );
        Ok(config)
    }

    pub fn compile_pattern(&self) -> Result<Option<Pattern>, ConfigError> {
        Ok(self.pattern.as_ref().map(PatternSpec::compile).transpose()?)
    }

    /// Builds the field; the initial value is formatted, not reported.
    pub fn into_field(self) -> Result<FormattedInput, ConfigError> {
        let pattern = self.compile_pattern()?;
        Ok(FormattedInput::initialize(pattern, self.value.as_str()).with_attrs(self.attrs))
    }
}
