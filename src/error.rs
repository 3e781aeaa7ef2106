use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    EmptyLiteral,
    InvalidRegex { source: String, message: String },
    InvalidMask { position: usize, message: String },
}

impl PatternError {
    pub(crate) fn invalid_mask(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidMask {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_regex(source: &str, err: &regex::Error) -> Self {
        Self::InvalidRegex {
            source: source.to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLiteral => f.write_str("literal segment must not be empty"),
            Self::InvalidRegex { source, message } => {
                write!(f, "invalid match expression `{source}`: {message}")
            }
            Self::InvalidMask { position, message } => {
                write!(f, "invalid mask at {position}: {message}")
            }
        }
    }
}

impl std::error::Error for PatternError {}

#[derive(Debug)]
pub enum ConfigError {
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
    Pattern(PatternError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml(err) => write!(f, "failed to parse yaml field config: {err}"),
            Self::Json(err) => write!(f, "failed to parse json field config: {err}"),
            Self::Pattern(err) => write!(f, "invalid field pattern: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Pattern(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<PatternError> for ConfigError {
    fn from(err: PatternError) -> Self {
        Self::Pattern(err)
    }
}
