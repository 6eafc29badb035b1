use std::env;
use anyhow::{Context, Result};

use crate::middleware::csrf::{CsrfToken, CSRF_COOKIE};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Raw cookie string as the browser would send it, e.g. `sessionid=..; csrftoken=..`
    pub session_cookie: Option<String>,
    pub csrf_cookie_name: String,
    pub user_agent: String,
}

/// Accepts absolute http(s) URLs only. Returns the trimmed URL.
pub fn validate_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim();
    let parsed = reqwest::Url::parse(trimmed)
        .with_context(|| format!("base URL is not a valid URL: {}", base_url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("base URL must be an http(s) URL, got {}", base_url);
    }
    Ok(trimmed.to_string())
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            session_cookie: None,
            csrf_cookie_name: CSRF_COOKIE.to_string(),
            user_agent: default_user_agent(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let base_url = env::var("SOULINE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let base_url = validate_base_url(&base_url).context("SOULINE_BASE_URL")?;

        let mut cfg = Self::new(base_url);
        cfg.session_cookie = env::var("SOULINE_COOKIE")
            .ok()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if let Ok(name) = env::var("SOULINE_CSRF_COOKIE") {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("SOULINE_CSRF_COOKIE is set but empty");
            }
            cfg.csrf_cookie_name = name.to_string();
        }
        if let Ok(ua) = env::var("SOULINE_USER_AGENT") {
            cfg.user_agent = ua;
        }
        Ok(cfg)
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn csrf_token(&self) -> Option<CsrfToken> {
        self.session_cookie
            .as_deref()
            .and_then(|c| CsrfToken::from_cookies(c, &self.csrf_cookie_name))
    }
}

fn default_user_agent() -> String {
    format!("souline-client/{}", env!("CARGO_PKG_VERSION"))
}

pub fn mask_secret(k: &str) -> String {
    let chars: Vec<char> = k.chars().collect();
    if chars.len() <= 8 { "[REDACTED]".to_string() }
    else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let cfg = ClientConfig::new("http://localhost:8000/ ");
        assert_eq!(cfg.base_url, "http://localhost:8000");
        assert_eq!(cfg.csrf_cookie_name, "csrftoken");
    }

    #[test]
    fn csrf_token_comes_from_cookie() {
        let cfg = ClientConfig::new("http://x").with_cookie("sessionid=abc; csrftoken=tok123");
        assert_eq!(cfg.csrf_token().map(|t| t.as_str().to_string()), Some("tok123".into()));
    }

    #[test]
    fn base_url_must_be_absolute_http() {
        assert_eq!(validate_base_url(" https://souline.example/ ").unwrap(), "https://souline.example/");
        assert!(validate_base_url("ftp://souline.example").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("").is_err());
    }

    #[test]
    fn mask_secret_hides_middle() {
        assert_eq!(mask_secret("short"), "[REDACTED]");
        assert_eq!(mask_secret("sessionid=abcdef"), "sess***cdef");
    }
}
