// src/handlers/timeline_handlers.rs - user events on the timeline page

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::dtos::timeline_dtos::{CommentForm, PostForm};
use crate::services::timeline_services::{Confirm, TimelineService};
use crate::services::Outcome;

#[derive(Debug, Clone)]
pub enum TimelineEvent {
    SubmitPost(PostForm),
    /// Composer submitted as currently filled in.
    SubmitComposer,
    ToggleLike(i64),
    SubmitComment(CommentForm),
    /// A post's comment form submitted with its current input.
    SubmitCommentInput(i64),
    BeginEdit(i64),
    EditInput { post_id: i64, text: String },
    CancelEdit(i64),
    SaveEdit(i64),
    DeletePost(i64),
}

/// Event registration scoped to one timeline page, with explicit teardown.
pub struct TimelineHandlers<C> {
    service: Arc<TimelineService>,
    confirm: C,
    attached: AtomicBool,
}

impl<C: Confirm> TimelineHandlers<C> {
    pub fn attach(service: Arc<TimelineService>, confirm: C) -> Self {
        Self { service, confirm, attached: AtomicBool::new(true) }
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    pub fn service(&self) -> &TimelineService {
        &self.service
    }

    pub async fn handle(&self, event: TimelineEvent) -> Outcome {
        if !self.is_attached() {
            debug!("timeline detached, dropping {:?}", event);
            return Outcome::Ignored;
        }

        match event {
            TimelineEvent::SubmitPost(form) => self.service.create_post(form).await,
            TimelineEvent::SubmitComposer => self.service.submit_composer().await,
            TimelineEvent::ToggleLike(id) => self.service.toggle_like(id).await,
            TimelineEvent::SubmitComment(form) => self.service.submit_comment(form).await,
            TimelineEvent::SubmitCommentInput(id) => {
                let form = self.service.view().await.comment_form(id);
                match form {
                    Some(form) => self.service.submit_comment(form).await,
                    None => Outcome::Ignored,
                }
            }
            TimelineEvent::BeginEdit(id) => applied(self.service.begin_edit(id).await),
            TimelineEvent::EditInput { post_id, text } => {
                applied(self.service.set_edit_draft(post_id, &text).await)
            }
            TimelineEvent::CancelEdit(id) => applied(self.service.cancel_edit(id).await),
            TimelineEvent::SaveEdit(id) => self.service.save_edit(id).await,
            TimelineEvent::DeletePost(id) => self.service.delete_post(id, &self.confirm).await,
        }
    }
}

fn applied(changed: bool) -> Outcome {
    if changed { Outcome::Applied } else { Outcome::Ignored }
}
