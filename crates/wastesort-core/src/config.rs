//! Backend configuration passed to the controller and transport.

use url::Url;

/// Errors that can occur when validating a [`ClassifierConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The backend base URL could not be parsed.
    #[error("invalid backend URL {input:?}: {source}")]
    InvalidUrl {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        source: url::ParseError,
    },

    /// The backend base URL is not `http` or `https`.
    #[error("backend URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    /// The backend base URL carries a query string or fragment, which
    /// cannot be combined with endpoint paths.
    #[error("backend URL must not contain a query or fragment: {0:?}")]
    UnexpectedSuffix(String),
}

/// Where the remote classifier lives.
///
/// Constructed once (from build-time configuration in the web app, from
/// flags or environment in the CLI) and handed to the controller so no
/// component reads process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Normalized base URL, never ending in `/`.
    base: String,
}

impl ClassifierConfig {
    /// Base URL used when none is configured.
    pub const DEFAULT_BACKEND_URL: &'static str = "http://localhost:8000";

    /// Path of the classification endpoint, relative to the base URL.
    pub const PREDICT_PATH: &'static str = "/predict";

    /// Validate and normalize a backend base URL.
    ///
    /// Surrounding whitespace and trailing slashes are ignored, so
    /// `http://host:8000/` and `http://host:8000` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the input is not an absolute URL.
    /// Returns [`ConfigError::UnsupportedScheme`] for schemes other than http(s).
    /// Returns [`ConfigError::UnexpectedSuffix`] if a query or fragment is present.
    pub fn new(backend_base_url: &str) -> Result<Self, ConfigError> {
        let input = backend_base_url.trim();
        let url = Url::parse(input).map_err(|source| ConfigError::InvalidUrl {
            input: input.to_owned(),
            source,
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_owned()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::UnexpectedSuffix(input.to_owned()));
        }

        Ok(Self {
            base: url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// The normalized base URL (no trailing slash).
    #[must_use]
    pub fn backend_base_url(&self) -> &str {
        &self.base
    }

    /// Full URL of the classification endpoint.
    #[must_use]
    pub fn predict_url(&self) -> String {
        format!("{}{}", self.base, Self::PREDICT_PATH)
    }

    /// Full URL of the service root, which reports the service status.
    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}/", self.base)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BACKEND_URL.to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn predict_url_appends_endpoint() {
        let config = ClassifierConfig::new("http://localhost:8000").unwrap();
        assert_eq!(config.predict_url(), "http://localhost:8000/predict");
        assert_eq!(config.health_url(), "http://localhost:8000/");
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        let a = ClassifierConfig::new("https://api.example.com/waste/").unwrap();
        let b = ClassifierConfig::new("  https://api.example.com/waste  ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.predict_url(), "https://api.example.com/waste/predict");
    }

    #[test]
    fn default_matches_default_constant() {
        let parsed = ClassifierConfig::new(ClassifierConfig::DEFAULT_BACKEND_URL).unwrap();
        assert_eq!(parsed, ClassifierConfig::default());
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = ClassifierConfig::new("/predict").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(matches!(
            ClassifierConfig::new(""),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = ClassifierConfig::new("ftp://files.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(ref s) if s == "ftp"));
    }

    #[test]
    fn query_is_rejected() {
        let err = ClassifierConfig::new("http://localhost:8000/?key=1").unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedSuffix(_)));
    }
}
