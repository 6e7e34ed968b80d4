//! Post API suite: listing, filtering by author, creation, and the
//! comments sub-resource.

mod common;

use common::{MockServer, Reply, mock_config};
use postcheck::models::placeholder::{CreatePostRequest, Post};
use postcheck::{TestSession, check, endpoints};
use serde_json::json;

fn sample_post(id: i64, user_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "userId": user_id,
        "title": format!("Post title {id}"),
        "body": format!("Body of post {id}")
    })
}

fn start_mock() -> MockServer {
    MockServer::start(|request| {
        match (request.method.as_str(), request.path.as_str()) {
            ("GET", "/posts") => {
                // 100 posts, 10 per author, like the real service.
                let posts: Vec<_> = (1..=100).map(|id| sample_post(id, (id - 1) / 10 + 1)).collect();
                match request.query_param("userId") {
                    Some(user_id) => {
                        let filtered: Vec<_> = posts
                            .into_iter()
                            .filter(|post| post["userId"].to_string() == user_id)
                            .collect();
                        Reply::ok(json!(filtered))
                    }
                    None => Reply::ok(json!(posts)),
                }
            }
            ("GET", "/posts/1") => Reply::ok(sample_post(1, 1)),
            ("GET", "/posts/1/comments") => {
                let comments: Vec<_> = (1..=5)
                    .map(|id| {
                        json!({
                            "postId": 1,
                            "id": id,
                            "name": format!("comment {id}"),
                            "email": format!("commenter{id}@example.com"),
                            "body": "insightful remark"
                        })
                    })
                    .collect();
                Reply::ok(json!(comments))
            }
            ("POST", "/posts") => {
                let mut body = request.body_json();
                if let Some(map) = body.as_object_mut() {
                    map.insert("id".to_string(), json!(101));
                }
                Reply::json(201, body)
            }
            _ => Reply::not_found(),
        }
    })
}

#[test]
fn get_all_posts_returns_full_list() {
    let server = start_mock();
    let session = TestSession::with_config(mock_config(&server)).unwrap();

    let response = session.client.get(endpoints::placeholder::POSTS).unwrap();

    check::assert_status(&response, endpoints::status::OK);

    let posts: Vec<Post> = response.json_list().unwrap();
    assert_eq!(posts.len(), 100, "Posts list should have 100 posts");
    check::assert_some(posts[0].id, "post id");
    check::assert_non_empty(posts[0].title.as_deref(), "post title");
}

#[test]
fn get_post_by_id_returns_matching_post() {
    let server = start_mock();
    let session = TestSession::with_config(mock_config(&server)).unwrap();

    let response = session
        .client
        .get_with_path(endpoints::placeholder::POST_BY_ID, &[("id", "1")])
        .unwrap();

    check::assert_status(&response, endpoints::status::OK);

    let post: Post = response.json().unwrap();
    assert_eq!(post.id, Some(1));
    assert_eq!(post.user_id, Some(1));
    check::assert_non_empty(post.body.as_deref(), "post body");
}

#[test]
fn posts_filtered_by_user_all_belong_to_that_user() {
    let server = start_mock();
    let session = TestSession::with_config(mock_config(&server)).unwrap();

    let response = session
        .client
        .get_with_query(endpoints::placeholder::POSTS, &[("userId", "1")])
        .unwrap();

    check::assert_status(&response, endpoints::status::OK);

    let posts: Vec<Post> = response.json_list().unwrap();
    assert_eq!(posts.len(), 10, "each author should have 10 posts");
    for post in &posts {
        assert_eq!(post.user_id, Some(1), "post author should match the filter");
    }
}

#[test]
fn comments_subresource_links_back_to_post() {
    let server = start_mock();
    let session = TestSession::with_config(mock_config(&server)).unwrap();

    let response = session
        .client
        .get_with_path(endpoints::placeholder::COMMENTS_BY_POST, &[("postId", "1")])
        .unwrap();

    check::assert_status(&response, endpoints::status::OK);

    let comments: Vec<serde_json::Value> = response.json_list().unwrap();
    assert!(!comments.is_empty(), "post should have comments");
    for comment in &comments {
        assert_eq!(comment["postId"], json!(1));
        let email = comment["email"].as_str().unwrap_or_default();
        check::assert_matches(email, r"^[^@\s]+@[^@\s]+\.[A-Za-z]+$", "commenter email");
    }
}

#[test]
fn create_post_assigns_next_id() {
    let server = start_mock();
    let session = TestSession::with_config(mock_config(&server)).unwrap();

    let request = CreatePostRequest {
        user_id: Some(1),
        title: Some("fresh post".to_string()),
        body: Some("created by the automation suite".to_string()),
    };

    let response = session
        .client
        .post(endpoints::placeholder::POSTS, &request)
        .unwrap();

    check::assert_status(&response, endpoints::status::CREATED);

    let created: Post = response.json().unwrap();
    assert_eq!(created.id, Some(101), "new posts get the next id");
    assert_eq!(created.title, request.title);
    assert_eq!(created.user_id, request.user_id);
}

#[test]
fn unknown_post_returns_404() {
    let server = start_mock();
    let session = TestSession::with_config(mock_config(&server)).unwrap();

    let response = session
        .client
        .get_with_path(endpoints::placeholder::POST_BY_ID, &[("id", "4040")])
        .unwrap();

    check::assert_status(&response, endpoints::status::NOT_FOUND);
}
