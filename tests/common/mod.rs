#![allow(dead_code)]

use serde_json::{json, Value};
use souline_client::config::ClientConfig;
use souline_client::repositories::api_client::ApiClient;
use wiremock::MockServer;

pub const COOKIE: &str = "sessionid=s3ss10n; csrftoken=abc123";

pub fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(&ClientConfig::new(server.uri()).with_cookie(COOKIE))
        .expect("api client")
}

pub fn anonymous_api(server: &MockServer) -> ApiClient {
    ApiClient::new(&ClientConfig::new(server.uri())).expect("api client")
}

pub fn resource_json(id: i64, title: &str, level: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("about {}", title),
        "youtube_url": format!("https://youtu.be/vid{}", id),
        "video_id": format!("vid{}", id),
        "thumbnail_url": format!("https://img.youtube.com/vi/vid{}/hqdefault.jpg", id),
        "level": level,
    })
}

pub fn post_html(id: i64, text: &str) -> String {
    format!(r#"<article id="post-{}" class="post"><div class="post-body"><p>{}</p></div></article>"#, id, text)
}

/// `METHOD /path` for every request the server saw, in order.
pub async fn request_log(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| format!("{} {}", r.method.as_str(), r.url.path()))
        .collect()
}
