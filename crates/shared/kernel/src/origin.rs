use crate::error::KernelError;
use std::fmt;
use url::Url;

/// Scheme, host and port of the request being served, e.g. `https://example.com`.
///
/// Contributors receive it to build absolute links; aggregators resolve
/// relative fragments against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestOrigin(Url);

impl RequestOrigin {
    /// Parses an origin, dropping any path, query or fragment.
    ///
    /// # Errors
    /// Returns [`KernelError::Internal`] when the value is not an absolute
    /// `http`/`https` URL with a host.
    pub fn parse(raw: &str) -> Result<Self, KernelError> {
        let url = Url::parse(raw.trim()).map_err(|e| KernelError::Internal {
            message: format!("invalid request origin `{raw}`: {e}").into(),
            context: None,
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(KernelError::Internal {
                message: format!("request origin `{raw}` must be an http(s) URL with a host").into(),
                context: None,
            });
        }

        Self::from_url(&url)
    }

    /// Builds an origin from a scheme and a `Host` header value (`example.com:8080`).
    ///
    /// # Errors
    /// Same as [`RequestOrigin::parse`].
    pub fn from_host(scheme: &str, host: &str) -> Result<Self, KernelError> {
        Self::parse(&format!("{scheme}://{host}"))
    }

    fn from_url(url: &Url) -> Result<Self, KernelError> {
        let mut origin = url.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);
        if origin.set_username("").is_err() || origin.set_password(None).is_err() {
            return Err(KernelError::Internal {
                message: format!("request origin `{url}` cannot carry credentials").into(),
                context: None,
            });
        }
        Ok(Self(origin))
    }

    /// Resolves `reference` against the origin. Absolute URLs are returned as-is.
    ///
    /// # Errors
    /// Fails when `reference` cannot be parsed as a URL reference.
    pub fn resolve(&self, reference: &str) -> Result<Url, url::ParseError> {
        match Url::parse(reference) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => self.0.join(reference),
            Err(e) => Err(e),
        }
    }

    /// The origin without a trailing slash, suitable for string concatenation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for RequestOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_path_and_query() {
        let origin = RequestOrigin::parse("https://example.com:8443/blog?x=1#top").unwrap();
        assert_eq!(origin.as_str(), "https://example.com:8443");
    }

    #[test]
    fn builds_from_host_header() {
        let origin = RequestOrigin::from_host("http", "localhost:4583").unwrap();
        assert_eq!(origin.to_string(), "http://localhost:4583");
    }

    #[test]
    fn rejects_non_http_origins() {
        assert!(RequestOrigin::parse("ftp://example.com").is_err());
        assert!(RequestOrigin::parse("/relative").is_err());
    }

    #[test]
    fn resolves_relative_and_keeps_absolute() {
        let origin = RequestOrigin::parse("https://example.com").unwrap();
        assert_eq!(origin.resolve("/a").unwrap().as_str(), "https://example.com/a");
        assert_eq!(origin.resolve("blog/post-1").unwrap().as_str(), "https://example.com/blog/post-1");
        assert_eq!(
            origin.resolve("https://cdn.example.com/x").unwrap().as_str(),
            "https://cdn.example.com/x"
        );
    }
}
