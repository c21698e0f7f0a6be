use crate::error::FetchError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use url::Url;

/// Hosts that are reached over plain http when no scheme is given:
/// localhost, IPv4 loopback, the unspecified address, IPv4/IPv6 link-local and ::1.
static LOCAL_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(localhost|127(\.\d{1,3}){3}|0\.0\.0\.0|169\.254(\.\d{1,3}){2}|\[(::1|fe80:[0-9a-f:%.]*)\])(:\d+)?([/?#]|$)",
    )
    .expect("local host pattern should be valid")
});

/// An absolute http(s) URL produced by [`normalize`]
///
/// The string is kept exactly as normalized; it is not re-serialized through
/// [`Url`], so `example.com` becomes `https://example.com` without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed form, used as the base for resolving relative links
    pub fn to_url(&self) -> Result<Url, FetchError> {
        Url::parse(&self.0).map_err(|e| FetchError::invalid_url(&self.0, e.to_string()))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turn user input into an absolute http(s) URL.
///
/// - surrounding whitespace is trimmed
/// - `http://` and `https://` inputs are kept as-is (scheme matched case-insensitively)
/// - protocol-relative `//host/...` gets `https:`
/// - loopback and link-local hosts get `http://`
/// - anything else gets `https://`
///
/// Normalizing an already normalized URL returns it unchanged.
pub fn normalize(raw: &str) -> Result<NormalizedUrl, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::invalid_url(raw, "empty input"));
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if trimmed.starts_with("//") {
        format!("https:{}", trimmed)
    } else if LOCAL_HOST.is_match(trimmed) {
        format!("http://{}", trimmed)
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).map_err(|e| FetchError::invalid_url(raw, e.to_string()))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::invalid_url(raw, "missing host"));
    }

    ::log::debug!("Normalized {:?} to {}", raw, candidate);
    Ok(NormalizedUrl(candidate))
}

fn has_http_scheme(s: &str) -> bool {
    let prefix = |p: &str| s.get(..p.len()).is_some_and(|head| head.eq_ignore_ascii_case(p));
    prefix("http://") || prefix("https://")
}
