// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    I18n(I18nError),
}

/// Failures raised by the locale catalog and the translation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// The catalog is malformed, or the default/fallback locale is not part
    /// of it. Fatal at start-up.
    Configuration(String),

    /// The requested locale is not in the catalog. The active locale is kept.
    UnsupportedLocale(String),

    /// Neither the active nor the fallback locale defines the key.
    MissingTranslation(String),
}

impl I18nError {
    /// Stable identifier for this error kind, usable as a message key.
    pub fn message_key(&self) -> &'static str {
        match self {
            I18nError::Configuration(_) => "error.configuration",
            I18nError::UnsupportedLocale(_) => "error.unsupportedLocale",
            I18nError::MissingTranslation(_) => "error.missingTranslation",
        }
    }
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I18nError::Configuration(msg) => write!(f, "Invalid locale catalog: {}", msg),
            I18nError::UnsupportedLocale(locale) => write!(f, "Unsupported locale: {}", locale),
            I18nError::MissingTranslation(key) => write!(f, "Missing translation: {}", key),
        }
    }
}

impl std::error::Error for I18nError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::I18n(e) => write!(f, "I18n Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<I18nError> for Error {
    fn from(err: I18nError) -> Self {
        Error::I18n(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
