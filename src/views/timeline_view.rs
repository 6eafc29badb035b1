use std::sync::LazyLock;

use regex::Regex;

use crate::dtos::timeline_dtos::{comment_action, CommentForm, LikeAction, LikeToggle, PostForm};
use crate::models::post::{Comment, Post};
use crate::views::html::escape;

pub const LIKED_ICON: &str = "♥";
pub const NOT_LIKED_ICON: &str = "♡";

static POST_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"id\s*=\s*["']post-(\d+)["']"#).expect("static regex"));

/// Reads the post id off a server-rendered `_post.html` fragment.
pub fn post_id_from_fragment(html: &str) -> Option<i64> {
    POST_ID_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostMode {
    Viewing,
    Editing { draft: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeChange {
    Inserted(i64),
    Updated(i64),
    Removed(i64),
}

impl NodeChange {
    pub fn post_id(&self) -> i64 {
        match *self {
            NodeChange::Inserted(id) | NodeChange::Updated(id) | NodeChange::Removed(id) => id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostNode {
    pub post: Post,
    /// Server markup for the whole post, once the server has rendered it.
    /// Later like and comment updates are patched into it.
    pub fragment: Option<String>,
    pub comments: Vec<String>,
    pub comment_action: String,
    pub comment_draft: String,
    pub mode: PostMode,
}

impl PostNode {
    pub fn new(post: Post) -> Self {
        let comments = post.comments.iter().map(render_comment).collect();
        Self {
            comment_action: comment_action(post.id),
            post,
            fragment: None,
            comments,
            comment_draft: String::new(),
            mode: PostMode::Viewing,
        }
    }

    pub fn id(&self) -> i64 {
        self.post.id
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, PostMode::Editing { .. })
    }

    pub fn like_icon(&self) -> &'static str {
        if self.post.liked { LIKED_ICON } else { NOT_LIKED_ICON }
    }
}

/// Mirror of `#posts` plus the composer form, newest first.
#[derive(Debug, Default)]
pub struct TimelineView {
    posts: Vec<PostNode>,
    composer: Option<PostForm>,
    changes: Vec<NodeChange>,
}

impl TimelineView {
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into_iter().map(PostNode::new).collect(),
            composer: None,
            changes: Vec::new(),
        }
    }

    pub fn posts(&self) -> &[PostNode] {
        &self.posts
    }

    pub fn get(&self, post_id: i64) -> Option<&PostNode> {
        self.posts.iter().find(|n| n.id() == post_id)
    }

    fn get_mut(&mut self, post_id: i64) -> Option<&mut PostNode> {
        self.posts.iter_mut().find(|n| n.id() == post_id)
    }

    fn touch(&mut self, change: NodeChange) {
        self.changes.push(change);
    }

    /// Nodes changed since the last call, in the order they changed.
    pub fn drain_changes(&mut self) -> Vec<NodeChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn composer(&self) -> Option<&PostForm> {
        self.composer.as_ref()
    }

    pub fn composer_mut(&mut self) -> &mut PostForm {
        self.composer.get_or_insert_with(|| PostForm::new(""))
    }

    /// Puts a freshly created post at the top.
    pub fn prepend(&mut self, post: Post, fragment: String) {
        let id = post.id;
        let mut node = PostNode::new(post);
        node.fragment = Some(fragment);
        self.posts.retain(|n| n.id() != id);
        self.posts.insert(0, node);
        self.touch(NodeChange::Inserted(id));
    }

    pub fn apply_like(&mut self, post_id: i64, toggle: LikeToggle) -> bool {
        let Some(node) = self.get_mut(post_id) else { return false };
        node.post.like_count = toggle.like_count;
        node.post.liked = toggle.action == LikeAction::Liked;
        let (icon, count) = (node.like_icon(), node.post.like_count);
        if let Some(patched) = node.fragment.as_deref().and_then(|f| patch_like_button(f, icon, count)) {
            node.fragment = Some(patched);
        }
        self.touch(NodeChange::Updated(post_id));
        true
    }

    pub fn set_comment_draft(&mut self, post_id: i64, text: impl Into<String>) -> bool {
        let Some(node) = self.get_mut(post_id) else { return false };
        node.comment_draft = text.into();
        true
    }

    pub fn comment_form(&self, post_id: i64) -> Option<CommentForm> {
        self.get(post_id).map(|n| CommentForm {
            action: n.comment_action.clone(),
            post_id,
            text: n.comment_draft.clone(),
        })
    }

    /// Appends a comment and clears the post's comment input.
    pub fn append_comment(&mut self, post_id: i64, html: String) -> bool {
        let Some(node) = self.get_mut(post_id) else { return false };
        if let Some(patched) = node.fragment.as_deref().and_then(|f| append_into_comments(f, post_id, &html)) {
            node.fragment = Some(patched);
        }
        node.comments.push(html);
        node.comment_draft.clear();
        self.touch(NodeChange::Updated(post_id));
        true
    }

    /// viewing -> editing. Already editing: no-op.
    pub fn begin_edit(&mut self, post_id: i64) -> bool {
        let Some(node) = self.get_mut(post_id) else { return false };
        if node.is_editing() {
            return false;
        }
        node.mode = PostMode::Editing { draft: node.post.text.clone() };
        self.touch(NodeChange::Updated(post_id));
        true
    }

    pub fn set_edit_draft(&mut self, post_id: i64, text: impl Into<String>) -> bool {
        match self.get_mut(post_id) {
            Some(PostNode { mode: PostMode::Editing { draft }, .. }) => {
                *draft = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn edit_draft(&self, post_id: i64) -> Option<&str> {
        match self.get(post_id) {
            Some(PostNode { mode: PostMode::Editing { draft }, .. }) => Some(draft.as_str()),
            _ => None,
        }
    }

    /// editing -> viewing, draft dropped.
    pub fn cancel_edit(&mut self, post_id: i64) -> bool {
        let Some(node) = self.get_mut(post_id) else { return false };
        if !node.is_editing() {
            return false;
        }
        node.mode = PostMode::Viewing;
        self.touch(NodeChange::Updated(post_id));
        true
    }

    /// Successful save: new server markup, back to viewing.
    pub fn finish_edit(&mut self, post_id: i64, text: String, fragment: String) -> bool {
        let Some(node) = self.get_mut(post_id) else { return false };
        node.post.text = text;
        node.fragment = Some(fragment);
        node.mode = PostMode::Viewing;
        self.touch(NodeChange::Updated(post_id));
        true
    }

    pub fn remove(&mut self, post_id: i64) -> bool {
        let before = self.posts.len();
        self.posts.retain(|n| n.id() != post_id);
        let removed = self.posts.len() != before;
        if removed {
            self.touch(NodeChange::Removed(post_id));
        }
        removed
    }

    pub fn render(&self) -> String {
        let mut html = String::from(r#"<div id="posts">"#);
        for node in &self.posts {
            html.push_str(&render_post(node));
        }
        html.push_str("</div>");
        html
    }

    pub fn render_post(&self, post_id: i64) -> Option<String> {
        self.get(post_id).map(render_post)
    }
}

fn render_comment(comment: &Comment) -> String {
    format!(
        r#"<div class="comment text-sm"><strong>{}</strong> {}</div>"#,
        escape(comment.author.as_deref().unwrap_or("")),
        escape(&comment.text)
    )
}

fn editor_markup(id: i64, draft: &str) -> String {
    format!(
        r#"<textarea id="edit-text-{id}" class="w-full border border-gray-300 rounded-lg p-2">{draft}</textarea>
<div class="mt-2 flex gap-2">
  <button class="save-edit-btn bg-[#FFA04D] text-white rounded-lg px-3 py-1" data-post-id="{id}">Save</button>
  <button class="cancel-edit-btn border border-gray-300 rounded-lg px-3 py-1" data-post-id="{id}">Cancel</button>
</div>"#,
        id = id,
        draft = escape(draft)
    )
}

fn like_button_inner(icon: &str, count: u32) -> String {
    format!(r#"{} <span class="like-count">{}</span>"#, icon, count)
}

/// Finds `pat` (`<div`, `</div`, ...) at or after `from` where it is a whole tag name.
fn find_tag(html: &str, from: usize, pat: &str) -> Option<usize> {
    html[from..]
        .match_indices(pat)
        .map(|(i, _)| from + i)
        .find(|&i| {
            matches!(html[i + pat.len()..].chars().next(),
                Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/')
        })
}

/// Byte range of the content of the element whose opening tag starts at `open`.
fn inner_range(html: &str, open: usize) -> Option<(usize, usize)> {
    let rest = &html[open + 1..];
    let name_len = rest.find(|c: char| !c.is_ascii_alphanumeric())?;
    if name_len == 0 {
        return None;
    }
    let open_pat = format!("<{}", &rest[..name_len]);
    let close_pat = format!("</{}", &rest[..name_len]);
    let inner_start = open + html[open..].find('>')? + 1;

    let mut depth = 1usize;
    let mut pos = inner_start;
    loop {
        let close = find_tag(html, pos, &close_pat)?;
        match find_tag(html, pos, &open_pat) {
            Some(nested) if nested < close => {
                depth += 1;
                pos = nested + open_pat.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some((inner_start, close));
                }
                pos = close + close_pat.len();
            }
        }
    }
}

static LIKE_BTN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<button\b[^>]*\bclass\s*=\s*["'][^"']*\blike-btn\b[^"']*["'][^>]*>"#)
        .expect("static regex")
});

static COMMENTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[A-Za-z]+\b[^>]*\bid\s*=\s*["']comments-for-(\d+)["'][^>]*>"#).expect("static regex")
});

static POST_BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[A-Za-z]+\b[^>]*\bclass\s*=\s*["'][^"']*\bpost-body\b[^"']*["'][^>]*>"#)
        .expect("static regex")
});

/// Rewrites the like button's content inside server markup.
pub fn patch_like_button(html: &str, icon: &str, count: u32) -> Option<String> {
    let open = LIKE_BTN_RE.find(html)?.start();
    let (start, end) = inner_range(html, open)?;
    Some(format!("{}{}{}", &html[..start], like_button_inner(icon, count), &html[end..]))
}

/// Appends `comment` as the last child of `#comments-for-<post_id>`.
pub fn append_into_comments(html: &str, post_id: i64, comment: &str) -> Option<String> {
    let open = COMMENTS_RE
        .captures_iter(html)
        .find(|c| c.get(1).and_then(|m| m.as_str().parse::<i64>().ok()) == Some(post_id))?
        .get(0)?
        .start();
    let (_, end) = inner_range(html, open)?;
    Some(format!("{}{}{}", &html[..end], comment, &html[end..]))
}

/// Swaps the first paragraph of `.post-body` for `replacement`.
pub fn replace_body_text(html: &str, replacement: &str) -> Option<String> {
    let body_open = POST_BODY_RE.find(html)?.start();
    let (body_start, body_end) = inner_range(html, body_open)?;
    let p_open = find_tag(html, body_start, "<p").filter(|&i| i < body_end)?;
    let (_, p_close) = inner_range(html, p_open)?;
    let p_end = p_close + html[p_close..].find('>')? + 1;
    Some(format!("{}{}{}", &html[..p_open], replacement, &html[p_end..]))
}

fn client_body(node: &PostNode) -> String {
    let mut body = format!("<p>{}</p>", escape(&node.post.text));
    if let Some(ref src) = node.post.image_url {
        body.push_str(&format!(r#"<img class="rounded-lg mt-2" src="{}">"#, escape(src)));
    }
    if let Some(ref url) = node.post.video_url {
        body.push_str(&format!(r#"<a class="video-link" href="{0}">{0}</a>"#, escape(url)));
    }
    body
}

/// A server-rendered node is the post itself; only seeded nodes are built here.
pub fn render_post(node: &PostNode) -> String {
    match (&node.fragment, &node.mode) {
        (Some(fragment), PostMode::Viewing) => fragment.clone(),
        (Some(fragment), PostMode::Editing { draft }) => {
            replace_body_text(fragment, &editor_markup(node.id(), draft))
                .unwrap_or_else(|| render_client_post(node))
        }
        (None, _) => render_client_post(node),
    }
}

fn render_client_post(node: &PostNode) -> String {
    let id = node.id();
    let body = match node.mode {
        PostMode::Editing { ref draft } => editor_markup(id, draft),
        PostMode::Viewing => client_body(node),
    };
    let owner_controls = if node.post.is_own_post {
        format!(
            r#"<button class="edit-btn" data-post-id="{id}">Edit</button><button class="delete-btn" data-post-id="{id}">Delete</button>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"<article id="post-{id}" class="post bg-white rounded-xl shadow p-4">
<div class="post-body">{body}</div>
<div class="post-actions flex gap-3 mt-2"><button class="like-btn" data-post-id="{id}">{like}</button>{owner_controls}</div>
<div id="comments-for-{id}" class="comments">{comments}</div>
<form class="comment-form" action="{action}" data-post-id="{id}"><input type="text" name="text" value="{draft}" placeholder="Write a comment..."></form>
</article>"#,
        id = id,
        body = body,
        like = like_button_inner(node.like_icon(), node.post.like_count),
        owner_controls = owner_controls,
        comments = node.comments.concat(),
        action = escape(&node.comment_action),
        draft = escape(&node.comment_draft),
    )
}
