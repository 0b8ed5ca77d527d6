//! API key resolution for the distance service.
//!
//! Precedence, highest first: an explicit value, a configured value, then the
//! [`GOOGLE_MAPS_API_KEY_ENV`] environment variable. Blank values count as
//! absent at every level.

use tripsheet_core::DistanceError;

/// Environment variable consulted last for the API key.
pub const GOOGLE_MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Where the resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Passed directly by the caller.
    Explicit,
    /// Read from layered configuration.
    Configured,
    /// Read from [`GOOGLE_MAPS_API_KEY_ENV`].
    Environment,
}

/// The API key, if any, for the distance service.
///
/// # Examples
/// ```
/// use tripsheet_data::DistanceCredentials;
/// use tripsheet_data::credentials::CredentialSource;
///
/// let creds = DistanceCredentials::resolve_with(None, Some("from-config"), |_| {
///     Some("from-env".to_string())
/// });
/// assert_eq!(creds.api_key(), Some("from-config"));
/// assert_eq!(creds.source(), Some(CredentialSource::Configured));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DistanceCredentials {
    api_key: Option<(String, CredentialSource)>,
}

impl std::fmt::Debug for DistanceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("source", &self.source())
            .finish()
    }
}

impl DistanceCredentials {
    /// Resolve against the process environment.
    #[must_use]
    pub fn resolve(explicit: Option<&str>, configured: Option<&str>) -> Self {
        Self::resolve_with(explicit, configured, |name| std::env::var(name).ok())
    }

    /// Resolve using `env` to read environment variables.
    #[must_use]
    pub fn resolve_with<F>(explicit: Option<&str>, configured: Option<&str>, env: F) -> Self
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_owned)
        };
        let api_key = present(explicit)
            .map(|key| (key, CredentialSource::Explicit))
            .or_else(|| present(configured).map(|key| (key, CredentialSource::Configured)))
            .or_else(|| {
                present(env(GOOGLE_MAPS_API_KEY_ENV).as_deref())
                    .map(|key| (key, CredentialSource::Environment))
            });
        Self { api_key }
    }

    /// The resolved key.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|(key, _)| key.as_str())
    }

    /// Where the key came from.
    #[must_use]
    pub fn source(&self) -> Option<CredentialSource> {
        self.api_key.as_ref().map(|(_, source)| *source)
    }

    /// The key, or [`DistanceError::MissingCredential`].
    pub fn require(&self) -> Result<&str, DistanceError> {
        self.api_key().ok_or(DistanceError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn env_with(value: Option<&'static str>) -> impl FnOnce(&str) -> Option<String> {
        move |name| {
            assert_eq!(name, GOOGLE_MAPS_API_KEY_ENV);
            value.map(str::to_owned)
        }
    }

    #[rstest]
    #[case(Some("cli"), Some("file"), Some("env"), Some("cli"), Some(CredentialSource::Explicit))]
    #[case(None, Some("file"), Some("env"), Some("file"), Some(CredentialSource::Configured))]
    #[case(Some("  "), None, Some("env"), Some("env"), Some(CredentialSource::Environment))]
    #[case(None, Some(""), Some(" "), None, None)]
    #[case(None, None, None, None, None)]
    fn precedence(
        #[case] explicit: Option<&str>,
        #[case] configured: Option<&str>,
        #[case] env: Option<&'static str>,
        #[case] expected: Option<&str>,
        #[case] source: Option<CredentialSource>,
    ) {
        let creds = DistanceCredentials::resolve_with(explicit, configured, env_with(env));
        assert_eq!(creds.api_key(), expected);
        assert_eq!(creds.source(), source);
    }

    #[rstest]
    fn keys_are_trimmed() {
        let creds = DistanceCredentials::resolve_with(Some(" abc "), None, env_with(None));
        assert_eq!(creds.api_key(), Some("abc"));
    }

    #[rstest]
    fn require_reports_missing_credential() {
        let creds = DistanceCredentials::default();
        assert_eq!(creds.require(), Err(DistanceError::MissingCredential));
    }

    #[rstest]
    fn debug_hides_key() {
        let creds = DistanceCredentials::resolve_with(Some("hunter2"), None, env_with(None));
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
