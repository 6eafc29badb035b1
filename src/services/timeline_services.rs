// src/services/timeline_services.rs - timeline posts, likes, comments, inline edit, delete

use log::{info, warn};
use tokio::sync::{Mutex, MutexGuard};

use crate::dtos::timeline_dtos::{CommentForm, LikeAction, PostForm};
use crate::error::ClientError;
use crate::models::post::Post;
use crate::repositories::api_client::ApiClient;
use crate::repositories::timeline_repository::TimelineRepository;
use crate::services::in_flight::{ActionKey, InFlight};
use crate::services::Outcome;
use crate::views::timeline_view::{post_id_from_fragment, TimelineView};
use crate::views::toast::{Toast, ToastKind, ToastSlot};

pub const MSG_POSTED: &str = "Posted successfully!";
pub const MSG_POST_FAILED: &str = "Failed to post.";
pub const MSG_LIKED: &str = "You liked a post!";
pub const MSG_UNLIKED: &str = "Like removed";
pub const MSG_LIKE_LOGIN: &str = "Please log in to like posts.";
pub const MSG_LIKE_FAILED: &str = "Error toggling like";
pub const MSG_COMMENTED: &str = "Comment added!";
pub const MSG_COMMENT_LOGIN: &str = "Please log in to comment.";
pub const MSG_COMMENT_FAILED: &str = "Failed to comment";
pub const MSG_UPDATED: &str = "Post updated!";
pub const MSG_EDIT_REFUSED: &str = "Failed to edit post";
pub const MSG_EDIT_FAILED: &str = "Error editing post";
pub const MSG_DELETED: &str = "Post deleted!";
pub const MSG_DELETE_REFUSED: &str = "You can only delete your own posts";
pub const MSG_DELETE_FAILED: &str = "Error deleting post";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";

/// Yes/no question asked before a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

pub struct TimelineService {
    repo: TimelineRepository,
    view: Mutex<TimelineView>,
    toasts: Mutex<ToastSlot>,
    in_flight: InFlight,
}

impl TimelineService {
    pub fn new(api: ApiClient, posts: Vec<Post>) -> Self {
        Self {
            repo: TimelineRepository::new(api),
            view: Mutex::new(TimelineView::from_posts(posts)),
            toasts: Mutex::new(ToastSlot::default()),
            in_flight: InFlight::default(),
        }
    }

    /// Direct access to the view-model. Do not hold across a request.
    pub async fn view(&self) -> MutexGuard<'_, TimelineView> {
        self.view.lock().await
    }

    pub async fn show_toast(&self, message: &str, kind: ToastKind) {
        self.toasts.lock().await.show(message, kind);
    }

    pub async fn last_toast(&self) -> Option<Toast> {
        self.toasts.lock().await.last().cloned()
    }

    pub async fn visible_toast(&self) -> Option<Toast> {
        self.toasts.lock().await.visible().cloned()
    }

    pub async fn render(&self) -> String {
        self.view.lock().await.render()
    }

    pub async fn create_post(&self, form: PostForm) -> Outcome {
        let Some(_guard) = self.in_flight.try_begin(ActionKey::CreatePost) else {
            return Outcome::Ignored;
        };

        let created = self.repo.create_post(&form).await.and_then(|html| {
            post_id_from_fragment(&html)
                .map(|id| (id, html))
                .ok_or_else(|| ClientError::Other("post markup without a post id".into()))
        });

        match created {
            Ok((id, html)) => {
                let mut post = Post::new(id, form.text.trim()).owned();
                post.video_url = form.video_url.clone().filter(|u| !u.trim().is_empty());
                {
                    let mut view = self.view.lock().await;
                    view.prepend(post, html);
                    view.composer_mut().reset();
                }
                info!("created post {}", id);
                self.show_toast(MSG_POSTED, ToastKind::Success).await;
                Outcome::Applied
            }
            Err(e) => {
                warn!("create post failed: {}", e);
                self.show_toast(MSG_POST_FAILED, ToastKind::Error).await;
                Outcome::Failed
            }
        }
    }

    /// Submits whatever is in the composer.
    pub async fn submit_composer(&self) -> Outcome {
        let form = self.view.lock().await.composer_mut().clone();
        self.create_post(form).await
    }

    pub async fn toggle_like(&self, post_id: i64) -> Outcome {
        let Some(_guard) = self.in_flight.try_begin(ActionKey::ToggleLike(post_id)) else {
            return Outcome::Ignored;
        };

        match self.repo.toggle_like(post_id).await {
            Ok(toggle) => {
                self.view.lock().await.apply_like(post_id, toggle);
                match toggle.action {
                    LikeAction::Liked => self.show_toast(MSG_LIKED, ToastKind::Success).await,
                    LikeAction::Unliked => self.show_toast(MSG_UNLIKED, ToastKind::Warning).await,
                }
                Outcome::Applied
            }
            Err(ClientError::LoginRequired) => {
                self.show_toast(MSG_LIKE_LOGIN, ToastKind::Warning).await;
                Outcome::Failed
            }
            Err(e) => {
                warn!("toggle like on post {} failed: {}", post_id, e);
                self.show_toast(MSG_LIKE_FAILED, ToastKind::Error).await;
                Outcome::Failed
            }
        }
    }

    /// Blank comments are dropped without a request.
    pub async fn submit_comment(&self, form: CommentForm) -> Outcome {
        if form.text.trim().is_empty() {
            return Outcome::Ignored;
        }
        let Some(_guard) = self.in_flight.try_begin(ActionKey::Comment(form.post_id)) else {
            return Outcome::Ignored;
        };

        match self.repo.add_comment(&form).await {
            Ok(html) => {
                self.view.lock().await.append_comment(form.post_id, html);
                self.show_toast(MSG_COMMENTED, ToastKind::Success).await;
                Outcome::Applied
            }
            Err(ClientError::LoginRequired) => {
                self.show_toast(MSG_COMMENT_LOGIN, ToastKind::Warning).await;
                Outcome::Failed
            }
            Err(e) => {
                warn!("comment on post {} failed: {}", form.post_id, e);
                self.show_toast(MSG_COMMENT_FAILED, ToastKind::Error).await;
                Outcome::Failed
            }
        }
    }

    pub async fn begin_edit(&self, post_id: i64) -> bool {
        self.view.lock().await.begin_edit(post_id)
    }

    pub async fn set_edit_draft(&self, post_id: i64, text: &str) -> bool {
        self.view.lock().await.set_edit_draft(post_id, text)
    }

    pub async fn cancel_edit(&self, post_id: i64) -> bool {
        self.view.lock().await.cancel_edit(post_id)
    }

    /// Only a node in editing mode can be saved.
    pub async fn save_edit(&self, post_id: i64) -> Outcome {
        let draft = {
            let view = self.view.lock().await;
            view.edit_draft(post_id).map(|d| d.trim().to_string())
        };
        let Some(text) = draft else {
            return Outcome::Ignored;
        };
        let Some(_guard) = self.in_flight.try_begin(ActionKey::SaveEdit(post_id)) else {
            return Outcome::Ignored;
        };

        match self.repo.edit_post(post_id, &text).await {
            Ok(html) => {
                self.view.lock().await.finish_edit(post_id, text, html);
                self.show_toast(MSG_UPDATED, ToastKind::Success).await;
                Outcome::Applied
            }
            Err(e) => {
                warn!("edit post {} failed: {}", post_id, e);
                let message = if e.is_transport() { MSG_EDIT_FAILED } else { MSG_EDIT_REFUSED };
                self.show_toast(message, ToastKind::Error).await;
                Outcome::Failed
            }
        }
    }

    pub async fn delete_post(&self, post_id: i64, confirm: &impl Confirm) -> Outcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return Outcome::Ignored;
        }
        let Some(_guard) = self.in_flight.try_begin(ActionKey::DeletePost(post_id)) else {
            return Outcome::Ignored;
        };

        match self.repo.delete_post(post_id).await {
            Ok(()) => {
                self.view.lock().await.remove(post_id);
                self.show_toast(MSG_DELETED, ToastKind::Warning).await;
                Outcome::Applied
            }
            Err(e) => {
                warn!("delete post {} failed: {}", post_id, e);
                let message = if e.is_transport() { MSG_DELETE_FAILED } else { MSG_DELETE_REFUSED };
                self.show_toast(message, ToastKind::Error).await;
                Outcome::Failed
            }
        }
    }
}
