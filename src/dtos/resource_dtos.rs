use serde::{Deserialize, Serialize};

use crate::models::resource::Level;

/// The four fields the add and edit endpoints accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceFields {
    pub title: String,
    pub description: String,
    pub youtube_link: String,
    pub level: Level,
}

impl ResourceFields {
    /// Stricter than a plain emptiness check: a whitespace-only title
    /// counts as missing and the edit is abandoned.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// `{status, id}` from add, `{status}` from edit/delete. Only logged.
#[derive(Debug, Deserialize)]
pub struct ResourceStatusOut {
    pub status: String,
    #[serde(default)]
    pub id: Option<i64>,
}
