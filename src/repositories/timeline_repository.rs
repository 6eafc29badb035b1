// src/repositories/timeline_repository.rs - /timeline/ AJAX endpoints

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::dtos::timeline_dtos::{
    CommentForm, DeleteOut, FragmentOut, LikeOut, LikeToggle, PostForm,
};
use crate::error::ClientError;
use crate::repositories::api_client::ApiClient;

#[derive(Clone)]
pub struct TimelineRepository {
    api: ApiClient,
}

impl TimelineRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Returns the server-rendered markup of the new post.
    pub async fn create_post(&self, form: &PostForm) -> Result<String, ClientError> {
        let mut body = Form::new().text("text", form.text.clone());
        if let Some(ref video_url) = form.video_url {
            body = body.text("video_url", video_url.clone());
        }
        if let Some(ref image) = form.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(image.content_type().as_ref())?;
            body = body.part("image", part);
        }

        let response = self
            .api
            .protected(Method::POST, &form.action)
            .multipart(body)
            .send()
            .await?;

        // Any non-2xx is a failed post, whatever the body says
        let status = response.status();
        let out: FragmentOut = ApiClient::read_json(response).await?;
        if !status.is_success() && out.success {
            return Err(ClientError::Status { status: status.as_u16(), body: String::new() });
        }
        out.into_html()
    }

    pub async fn toggle_like(&self, post_id: i64) -> Result<LikeToggle, ClientError> {
        let response = self
            .api
            .protected(Method::POST, &format!("/timeline/post/{}/like/", post_id))
            .send()
            .await?;

        let out: LikeOut = ApiClient::read_json(response).await?;
        out.into_toggle()
    }

    /// Returns the markup of the new comment.
    pub async fn add_comment(&self, form: &CommentForm) -> Result<String, ClientError> {
        let body = Form::new().text("text", form.text.clone());
        let response = self
            .api
            .protected(Method::POST, &form.action)
            .multipart(body)
            .send()
            .await?;

        let out: FragmentOut = ApiClient::read_json(response).await?;
        out.into_html()
    }

    /// Returns the re-rendered post.
    pub async fn edit_post(&self, post_id: i64, text: &str) -> Result<String, ClientError> {
        let response = self
            .api
            .protected(Method::POST, &format!("/timeline/post/{}/edit/", post_id))
            .form(&[("text", text)])
            .send()
            .await?;

        let out: FragmentOut = ApiClient::read_json(response).await?;
        out.into_html()
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<(), ClientError> {
        let response = self
            .api
            .protected(Method::POST, &format!("/timeline/post/{}/delete/", post_id))
            .send()
            .await?;

        let out: DeleteOut = ApiClient::read_json(response).await?;
        out.into_result()
    }
}
