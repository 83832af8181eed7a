// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(CatalogError),
}

/// Failures while fetching, parsing or activating a message catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No catalog resource exists for the requested locale.
    NotFound(String),

    /// The catalog exists but is not valid Fluent syntax.
    Parse { locale: String, message: String },

    /// The locale code cannot be parsed as a language identifier.
    InvalidLocale(String),

    /// Activation was requested for a locale that was never loaded.
    NotLoaded(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound(locale) => write!(f, "No catalog for locale '{}'", locale),
            CatalogError::Parse { locale, message } => {
                write!(f, "Invalid catalog for locale '{}': {}", locale, message)
            }
            CatalogError::InvalidLocale(locale) => write!(f, "Invalid locale code '{}'", locale),
            CatalogError::NotLoaded(locale) => write!(f, "Locale '{}' is not loaded", locale),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn catalog_error_converts_and_names_locale() {
        let err: Error = CatalogError::NotFound("de".to_string()).into();
        assert_eq!(err, Error::Catalog(CatalogError::NotFound("de".to_string())));
        assert_eq!(format!("{}", err), "Catalog Error: No catalog for locale 'de'");
    }

    #[test]
    fn toml_error_maps_to_config_variant() {
        let parse_err = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
