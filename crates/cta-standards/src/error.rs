use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid rules manifest: {message}")]
    InvalidManifest { message: String },

    #[error("invalid prefix '{prefix}' in family {family} (expected 2-4 uppercase letters)")]
    InvalidPrefix { prefix: String, family: String },

    #[error("prefix '{prefix}' is listed in both {first} and {second}")]
    DuplicatePrefix {
        prefix: String,
        first: String,
        second: String,
    },

    #[error("exempt prefix entries must not be blank")]
    BlankExemption,

    #[error("invalid extension token '{token}' (expected letters and digits only)")]
    InvalidExtensionToken { token: String },

    #[error("max_stem_len must be greater than zero")]
    InvalidBudget,
}

impl RulesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
