// src/middleware/csrf.rs - anti-forgery token read from the session cookie

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Token Django expects back in the `X-CSRFToken` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_cookies(cookie_header: &str, name: &str) -> Option<Self> {
        get_cookie(cookie_header, name).filter(|v| !v.is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Looks up `name` in a `k=v; k2=v2` cookie string and percent-decodes the value.
/// First match wins.
pub fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    if cookie_header.is_empty() || name.is_empty() {
        return None;
    }

    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| {
            cookie
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(|raw| match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            // Not valid UTF-8 once decoded; hand back the raw value
            Err(_) => raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_cookie_among_others() {
        let header = "sessionid=s3cr3t; csrftoken=abc123; theme=dark";
        assert_eq!(get_cookie(header, "csrftoken").as_deref(), Some("abc123"));
        assert_eq!(get_cookie(header, "theme").as_deref(), Some("dark"));
    }

    #[test]
    fn prefix_of_another_name_does_not_match() {
        let header = "csrftokenx=nope; csrftoken=yes";
        assert_eq!(get_cookie(header, "csrftoken").as_deref(), Some("yes"));
    }

    #[test]
    fn value_is_percent_decoded() {
        let header = "csrftoken=a%2Bb%3D";
        assert_eq!(get_cookie(header, "csrftoken").as_deref(), Some("a+b="));
    }

    #[test]
    fn missing_or_empty_cookie() {
        assert_eq!(get_cookie("", "csrftoken"), None);
        assert_eq!(get_cookie("sessionid=1", "csrftoken"), None);
        assert!(CsrfToken::from_cookies("csrftoken=", CSRF_COOKIE).is_none());
    }
}
