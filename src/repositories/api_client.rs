// src/repositories/api_client.rs - shared reqwest client for the Souline backend

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::middleware::csrf::CSRF_HEADER;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    csrf_header: Option<HeaderValue>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(ref cookie) = config.session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }

        let csrf_header = match config.csrf_token() {
            Some(token) => Some(HeaderValue::from_str(token.as_str())?),
            None => {
                debug!("no {} cookie configured; timeline mutations go without it", config.csrf_cookie_name);
                None
            }
        };

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a path against the base URL. Absolute form actions pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// A mutating timeline request: anti-forgery header plus JSON accept.
    pub fn protected(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .request(method, path)
            .header(ACCEPT, "application/json");
        match self.csrf_header {
            Some(ref token) => builder.header(CSRF_HEADER, token.clone()),
            None => builder,
        }
    }

    /// Decodes the body as `T` whatever the status: Django answers refusals with
    /// 400/403 and a JSON envelope. A non-2xx body that does not decode is a status error.
    pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;

        match serde_json::from_str::<T>(&body) {
            Ok(value) => {
                if !status.is_success() {
                    debug!("decoded {} response envelope", status.as_u16());
                }
                Ok(value)
            }
            Err(e) if status.is_success() => Err(ClientError::Serde(e)),
            Err(_) => {
                warn!("request failed: {} - {}", status, snippet(&body));
                Err(ClientError::Status {
                    status: status.as_u16(),
                    body: snippet(&body).to_string(),
                })
            }
        }
    }
}

fn snippet(body: &str) -> &str {
    match body.char_indices().nth(300) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
