use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;

pub const CREATE_POST_ACTION: &str = "/timeline/post/create/";

pub fn comment_action(post_id: i64) -> String {
    format!("/timeline/post/{}/comment/", post_id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn content_type(&self) -> mime::Mime {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => mime::IMAGE_PNG,
            "jpg" | "jpeg" => mime::IMAGE_JPEG,
            "gif" => mime::IMAGE_GIF,
            "bmp" => mime::IMAGE_BMP,
            "svg" => mime::IMAGE_SVG,
            _ => mime::APPLICATION_OCTET_STREAM,
        }
    }
}

/// The composer form (`#postForm`): posted as multipart to `action`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostForm {
    pub action: String,
    pub text: String,
    pub video_url: Option<String>,
    pub image: Option<ImageUpload>,
}

impl PostForm {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            action: CREATE_POST_ACTION.to_string(),
            text: text.into(),
            video_url: None,
            image: None,
        }
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Back to an empty composer, keeping the action.
    pub fn reset(&mut self) {
        self.text.clear();
        self.video_url = None;
        self.image = None;
    }
}

/// A post's `.comment-form`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentForm {
    pub action: String,
    pub post_id: i64,
    pub text: String,
}

impl CommentForm {
    pub fn new(post_id: i64, text: impl Into<String>) -> Self {
        Self {
            action: comment_action(post_id),
            post_id,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Liked,
    Unliked,
}

/// `{success, html}` returned by create, comment and edit.
#[derive(Debug, Deserialize)]
pub struct FragmentOut {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LikeOut {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub action: Option<LikeAction>,
    #[serde(default)]
    pub like_count: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteOut {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub action: LikeAction,
    pub like_count: u32,
}

fn refusal(error: Option<String>, errors: Option<Value>) -> ClientError {
    match (error, errors) {
        (Some(code), _) => ClientError::from_code(&code),
        (None, Some(errors)) => ClientError::Rejected(errors.to_string()),
        (None, None) => ClientError::Rejected("unsuccessful".to_string()),
    }
}

impl FragmentOut {
    pub fn into_html(self) -> Result<String, ClientError> {
        match (self.success, self.html) {
            (true, Some(html)) => Ok(html),
            (true, None) => Err(ClientError::Other("success without html".into())),
            (false, _) => Err(refusal(self.error, self.errors)),
        }
    }
}

impl LikeOut {
    pub fn into_toggle(self) -> Result<LikeToggle, ClientError> {
        if !self.success {
            return Err(refusal(self.error, None));
        }
        match (self.action, self.like_count) {
            (Some(action), Some(like_count)) => Ok(LikeToggle { action, like_count }),
            _ => Err(ClientError::Other("like response missing action or count".into())),
        }
    }
}

impl DeleteOut {
    pub fn into_result(self) -> Result<(), ClientError> {
        if self.success {
            Ok(())
        } else {
            Err(refusal(self.error, None))
        }
    }
}
