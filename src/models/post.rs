use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timeline post as the page knows it when it is first rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub is_own_post: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub post_id: i64,
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl Post {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            like_count: 0,
            liked: false,
            is_own_post: false,
            author: None,
            created_at: None,
            image_url: None,
            video_url: None,
            comments: Vec::new(),
        }
    }

    pub fn owned(mut self) -> Self {
        self.is_own_post = true;
        self
    }
}
