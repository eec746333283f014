//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "VIBES_API_URL";

/// A validated API base URL.
///
/// This type ensures the URL is absolute, uses HTTPS (or HTTP for localhost),
/// and is normalized so endpoint paths can be appended to it.
///
/// # Example
///
/// ```
/// use vibes_core::ApiUrl;
///
/// let api = ApiUrl::new("https://api.vibesbnb.com/v1/").unwrap();
/// assert_eq!(
///     api.endpoint("/auth/refresh").unwrap(),
///     "https://api.vibesbnb.com/v1/auth/refresh"
/// );
/// assert!(api.endpoint("https://elsewhere.example/steal").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Read the base URL from `VIBES_API_URL`.
    pub fn from_env() -> Result<Self, Error> {
        let value = std::env::var(API_URL_ENV).map_err(|_| InvalidInputError::ApiUrl {
            value: String::new(),
            reason: format!("{} is not set", API_URL_ENV),
        })?;
        Self::new(value)
    }

    /// Returns the absolute URL for a path relative to the base.
    ///
    /// Absolute URLs are accepted only on the base's origin.
    ///
    /// # Errors
    ///
    /// Returns an error for an absolute URL on a different origin.
    pub fn endpoint(&self, path: &str) -> Result<String, Error> {
        if let Ok(absolute) = Url::parse(path) {
            if absolute.origin() != self.0.origin() {
                return Err(InvalidInputError::ApiUrl {
                    value: path.to_string(),
                    reason: format!("must be relative to {}", self.0),
                }
                .into());
            }
            return Ok(absolute.into());
        }
        let base = self.0.as_str().trim_end_matches('/');
        Ok(format!("{}/{}", base, path.trim_start_matches('/')))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // HTTPS, or HTTP for local development servers
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
