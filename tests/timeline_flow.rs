mod common;

use serde_json::json;
use souline_client::config::ClientConfig;
use souline_client::dtos::timeline_dtos::PostForm;
use souline_client::models::post::Post;
use souline_client::repositories::api_client::ApiClient;
use souline_client::services::timeline_services::{self as timeline, TimelineService};
use souline_client::services::Outcome;
use souline_client::views::timeline_view::{PostMode, LIKED_ICON, NOT_LIKED_ICON};
use souline_client::views::toast::ToastKind;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api, post_html, request_log};

fn seeded(server: &MockServer) -> TimelineService {
    let mut mine = Post::new(1, "my first post").owned();
    mine.like_count = 2;
    TimelineService::new(api(server), vec![mine, Post::new(2, "someone else's post")])
}

fn yes(_: &str) -> bool {
    true
}

fn no(_: &str) -> bool {
    false
}

async fn assert_toast(service: &TimelineService, message: &str, kind: ToastKind) {
    let toast = service.last_toast().await.expect("a toast");
    assert_eq!(toast.message, message);
    assert_eq!(toast.kind, kind);
}

#[tokio::test]
async fn create_post_prepends_fragment_and_resets_composer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/create/"))
        .and(header("X-CSRFToken", "abc123"))
        .and(body_string_contains("hello timeline"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "html": post_html(10, "hello timeline")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = seeded(&server);
    service.view().await.composer_mut().text = "hello timeline".into();

    assert_eq!(service.submit_composer().await, Outcome::Applied);

    let view = service.view().await;
    let ids: Vec<i64> = view.posts().iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec![10, 1, 2]);
    assert!(view.get(10).unwrap().post.is_own_post);
    assert_eq!(view.composer().map(|c| c.text.as_str()), Some(""));
    let rendered = view.render_post(10).unwrap();
    assert_eq!(rendered, post_html(10, "hello timeline"));
    assert_eq!(view.render().matches(r#"id="post-10""#).count(), 1);
    drop(view);
    assert_toast(&service, timeline::MSG_POSTED, ToastKind::Success).await;
}

#[tokio::test]
async fn created_markup_without_post_id_is_a_failed_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/create/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "html": "<article class=\"post\"><p>hi</p></article>"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = seeded(&server);
    assert_eq!(service.create_post(PostForm::new("hi")).await, Outcome::Failed);
    let ids: Vec<i64> = service.view().await.posts().iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_toast(&service, timeline::MSG_POST_FAILED, ToastKind::Error).await;
}

#[tokio::test]
async fn error_status_with_success_body_is_a_failed_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/create/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"success": true, "html": post_html(11, "hi")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = seeded(&server);
    assert_eq!(service.create_post(PostForm::new("hi")).await, Outcome::Failed);
    assert!(service.view().await.get(11).is_none());
    assert_toast(&service, timeline::MSG_POST_FAILED, ToastKind::Error).await;
}

#[tokio::test]
async fn create_post_validation_failure_shows_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/create/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"success": false, "errors": {"text": ["This field is required."]}})),
        )
        .mount(&server)
        .await;

    let service = seeded(&server);
    assert_eq!(service.create_post(PostForm::new("")).await, Outcome::Failed);
    assert_eq!(service.view().await.posts().len(), 2);
    assert_toast(&service, timeline::MSG_POST_FAILED, ToastKind::Error).await;
}

#[tokio::test]
async fn toggling_like_twice_restores_count_and_icon() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/1/like/"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "action": "liked", "like_count": 3})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/1/like/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "action": "unliked", "like_count": 2})),
        )
        .mount(&server)
        .await;

    let service = seeded(&server);

    assert_eq!(service.toggle_like(1).await, Outcome::Applied);
    {
        let view = service.view().await;
        let node = view.get(1).unwrap();
        assert_eq!((node.post.like_count, node.like_icon()), (3, LIKED_ICON));
    }
    assert_toast(&service, timeline::MSG_LIKED, ToastKind::Success).await;

    assert_eq!(service.toggle_like(1).await, Outcome::Applied);
    let view = service.view().await;
    let node = view.get(1).unwrap();
    assert_eq!((node.post.like_count, node.like_icon()), (2, NOT_LIKED_ICON));
    drop(view);
    assert_toast(&service, timeline::MSG_UNLIKED, ToastKind::Warning).await;
}

#[tokio::test]
async fn like_without_login_warns_and_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/2/like/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "login_required"})))
        .mount(&server)
        .await;

    let service = seeded(&server);
    assert_eq!(service.toggle_like(2).await, Outcome::Failed);
    assert_eq!(service.view().await.get(2).unwrap().post.like_count, 0);
    assert_toast(&service, timeline::MSG_LIKE_LOGIN, ToastKind::Warning).await;
}

#[tokio::test]
async fn comment_appends_one_node_under_its_post_and_clears_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/2/comment/"))
        .and(header("X-CSRFToken", "abc123"))
        .and(body_string_contains("nice one"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "html": "<div class=\"comment\">nice one</div>"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = seeded(&server);
    let form = {
        let mut view = service.view().await;
        view.set_comment_draft(2, "nice one");
        view.comment_form(2).unwrap()
    };

    assert_eq!(service.submit_comment(form).await, Outcome::Applied);

    let view = service.view().await;
    let target = view.get(2).unwrap();
    assert_eq!(target.comments, vec!["<div class=\"comment\">nice one</div>".to_string()]);
    assert!(target.comment_draft.is_empty());
    assert!(view.get(1).unwrap().comments.is_empty());
    assert!(view.render_post(2).unwrap().contains(
        r#"<div id="comments-for-2" class="comments"><div class="comment">nice one</div></div>"#
    ));
}

#[tokio::test]
async fn comment_without_login_warns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/2/comment/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "login_required"})))
        .mount(&server)
        .await;

    let service = seeded(&server);
    let form = souline_client::dtos::timeline_dtos::CommentForm::new(2, "hi");
    assert_eq!(service.submit_comment(form).await, Outcome::Failed);
    assert!(service.view().await.get(2).unwrap().comments.is_empty());
    assert_toast(&service, timeline::MSG_COMMENT_LOGIN, ToastKind::Warning).await;
}

#[tokio::test]
async fn save_edit_replaces_post_and_returns_to_viewing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/1/edit/"))
        .and(body_string("text=edited+text"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "html": post_html(1, "edited text")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = seeded(&server);
    assert!(service.begin_edit(1).await);
    assert!(service.set_edit_draft(1, "  edited text  ").await);

    assert_eq!(service.save_edit(1).await, Outcome::Applied);

    let view = service.view().await;
    let node = view.get(1).unwrap();
    assert_eq!(node.mode, PostMode::Viewing);
    assert_eq!(node.post.text, "edited text");
    assert_eq!(node.fragment.as_deref(), Some(post_html(1, "edited text").as_str()));
    let rendered = view.render_post(1).unwrap();
    assert_eq!(rendered, post_html(1, "edited text"));
    assert_eq!(rendered.matches(r#"id="post-1""#).count(), 1);
    drop(view);
    assert_toast(&service, timeline::MSG_UPDATED, ToastKind::Success).await;
}

#[tokio::test]
async fn refused_edit_keeps_editor_open() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/2/edit/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"success": false, "error": "permission_denied"})),
        )
        .mount(&server)
        .await;

    let service = seeded(&server);
    service.begin_edit(2).await;
    assert_eq!(service.save_edit(2).await, Outcome::Failed);
    assert!(service.view().await.get(2).unwrap().is_editing());
    assert_toast(&service, timeline::MSG_EDIT_REFUSED, ToastKind::Error).await;
}

#[tokio::test]
async fn deleting_someone_elses_post_keeps_node() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/2/delete/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"success": false, "error": "permission_denied"})),
        )
        .mount(&server)
        .await;

    let service = seeded(&server);
    assert_eq!(service.delete_post(2, &yes).await, Outcome::Failed);
    assert!(service.view().await.get(2).is_some());
    assert_toast(&service, timeline::MSG_DELETE_REFUSED, ToastKind::Error).await;
}

#[tokio::test]
async fn delete_removes_node_with_warning_toast() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/1/delete/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let service = seeded(&server);
    assert_eq!(service.delete_post(1, &yes).await, Outcome::Applied);
    assert!(service.view().await.get(1).is_none());
    assert_toast(&service, timeline::MSG_DELETED, ToastKind::Warning).await;
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let server = MockServer::start().await;
    let service = seeded(&server);

    assert_eq!(service.delete_post(1, &no).await, Outcome::Ignored);
    assert!(request_log(&server).await.is_empty());
}

#[tokio::test]
async fn server_error_page_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/1/delete/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Server Error (500)</h1>"))
        .mount(&server)
        .await;

    let service = seeded(&server);
    assert_eq!(service.delete_post(1, &yes).await, Outcome::Failed);
    assert!(service.view().await.get(1).is_some());
    assert_toast(&service, timeline::MSG_DELETE_FAILED, ToastKind::Error).await;
}

#[tokio::test]
async fn csrf_header_value_is_percent_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/timeline/post/2/like/"))
        .and(header("X-CSRFToken", "a+b="))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "action": "liked", "like_count": 1})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).with_cookie("csrftoken=a%2Bb%3D");
    let service = TimelineService::new(ApiClient::new(&config).unwrap(), vec![Post::new(2, "x")]);
    assert_eq!(service.toggle_like(2).await, Outcome::Applied);
}
