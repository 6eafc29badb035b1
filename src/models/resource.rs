use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Error)]
#[error("unknown level '{0}', expected beginner/intermediate/advanced")]
pub struct ParseLevelError(String);

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// A catalogued video as returned by `GET /resources/api/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "youtube_url")]
    pub youtube_link: String,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub level: Level,
}

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:embed/|[?&]v=|youtu\.be/)([A-Za-z0-9_-]+)").expect("static regex")
});

/// Pulls the video id out of `embed/<id>`, `v=<id>` or `youtu.be/<id>` links.
pub fn extract_video_id(link: &str) -> Option<String> {
    VIDEO_ID_RE
        .captures(link)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

impl Resource {
    /// Player source for the card iframe.
    pub fn embed_url(&self) -> String {
        let id = self
            .video_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| extract_video_id(&self.youtube_link));

        match id {
            Some(id) => format!("https://www.youtube.com/embed/{}", id),
            None => self.youtube_link.clone(),
        }
    }
}
