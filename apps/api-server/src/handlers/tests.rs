//! Handler tests over the in-memory repositories.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use uuid::Uuid;

use scribe_core::domain::{Group, Post, User};
use scribe_core::pagination::PAGE_SIZE;
use scribe_core::ports::{PasswordService, TokenService};
use scribe_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};
use scribe_shared::dto::{
    AuthResponse, CreatePostRequest, GroupPostsResponse, PostPage, PostResponse, ProfileResponse,
    RegisterRequest, UpdatePostRequest, UserResponse,
};
use scribe_shared::response::ErrorResponse;

use crate::handlers::configure_routes;
use crate::state::AppState;

struct TestEnv {
    state: AppState,
    tokens: Arc<dyn TokenService>,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            state: AppState::in_memory(),
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "handler-test-secret".to_string(),
                expiration_hours: 1,
                issuer: "scribe-test".to_string(),
            })),
        }
    }

    fn bearer(&self, user: &User) -> (header::HeaderName, String) {
        let token = self.tokens.generate_token(user.id, &user.username).unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    async fn seed_user(&self, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "not-a-real-hash".to_string(),
        );
        self.state.users.save(user).await.unwrap()
    }

    async fn seed_group(&self, slug: &str) -> Group {
        let group = Group::new(
            format!("Group {slug}"),
            slug.to_string(),
            format!("Posts about {slug}"),
        );
        self.state.groups.save(group).await.unwrap()
    }

    async fn seed_post(&self, author: &User, group: Option<&Group>, text: &str) -> Post {
        let post = Post::new(author.id, text.to_string(), group.map(|g| g.id));
        self.state.posts.save(post).await.unwrap()
    }

    async fn seed_posts(&self, author: &User, group: Option<&Group>, count: usize) {
        for i in 0..count {
            self.seed_post(author, group, &format!("post {i}")).await;
        }
    }
}

macro_rules! test_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.state.clone()))
                .app_data(web::Data::new($env.tokens.clone()))
                .app_data(web::Data::new(
                    Arc::new(Argon2PasswordService::new()) as Arc<dyn PasswordService>
                ))
                .configure(configure_routes),
        )
        .await
    };
}

// --- Listing + pagination ---

#[actix_web::test]
async fn index_paginates_fifteen_posts_as_ten_plus_five() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    env.seed_posts(&author, None, 15).await;
    let app = test_app!(env);

    let page: PostPage =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/posts").to_request())
            .await;
    assert_eq!(page.posts.len() as u64, PAGE_SIZE);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_posts, 15);
    assert_eq!(page.total_pages, 2);

    let page: PostPage = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/posts?page=2").to_request(),
    )
    .await;
    assert_eq!(page.posts.len(), 5);
    assert_eq!(page.page, 2);
}

#[actix_web::test]
async fn invalid_page_param_falls_back_to_page_one() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    env.seed_posts(&author, None, 15).await;
    let app = test_app!(env);

    for uri in ["/api/posts?page=abc", "/api/posts?page=0", "/api/posts?page=-2"] {
        let page: PostPage =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(page.page, 1, "uri {uri}");
        assert_eq!(page.posts.len() as u64, PAGE_SIZE);
    }
}

#[actix_web::test]
async fn out_of_range_page_is_empty() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    env.seed_posts(&author, None, 3).await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/posts?page=7").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: PostPage = test::read_body_json(resp).await;
    assert!(page.posts.is_empty());
}

#[actix_web::test]
async fn group_listing_paginates_thirteen_posts_as_ten_plus_three() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let group = env.seed_group("first-group").await;
    env.seed_posts(&author, Some(&group), 13).await;
    let app = test_app!(env);

    let body: GroupPostsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/groups/first-group/posts")
            .to_request(),
    )
    .await;
    assert_eq!(body.group.slug, "first-group");
    assert_eq!(body.group.title, group.title);
    assert_eq!(body.page.posts.len() as u64, PAGE_SIZE);

    let body: GroupPostsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/groups/first-group/posts?page=2")
            .to_request(),
    )
    .await;
    assert_eq!(body.page.posts.len(), 3);
}

#[actix_web::test]
async fn profile_listing_shows_only_the_authors_posts() {
    let env = TestEnv::new();
    let alice = env.seed_user("alice").await;
    let bob = env.seed_user("bob").await;
    env.seed_posts(&alice, None, 3).await;
    env.seed_posts(&bob, None, 2).await;
    let app = test_app!(env);

    let body: ProfileResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/profiles/alice/posts")
            .to_request(),
    )
    .await;
    assert_eq!(body.author.username, "alice");
    assert_eq!(body.page.posts.len(), 3);
    assert!(body.page.posts.iter().all(|p| p.author_id == alice.id));
}

#[actix_web::test]
async fn unknown_group_and_username_are_not_found() {
    let env = TestEnv::new();
    let app = test_app!(env);

    for uri in ["/api/groups/no-such-slug/posts", "/api/profiles/nobody/posts"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {uri}");
    }
}

#[actix_web::test]
async fn listings_are_most_recent_first() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    for (hours_ago, text) in [(3, "oldest"), (2, "middle"), (1, "newest")] {
        let mut post = Post::new(author.id, text.to_string(), None);
        post.pub_date -= chrono::TimeDelta::hours(hours_ago);
        env.state.posts.save(post).await.unwrap();
    }
    let app = test_app!(env);

    let page: PostPage =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/posts").to_request())
            .await;
    let texts: Vec<&str> = page.posts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["newest", "middle", "oldest"]);
}

// --- Detail ---

#[actix_web::test]
async fn detail_returns_the_post_unmodified() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let group = env.seed_group("first-group").await;
    let post = env.seed_post(&author, Some(&group), "Post number 1").await;
    let app = test_app!(env);

    let body: PostResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.id))
            .to_request(),
    )
    .await;
    assert_eq!(body.id, post.id);
    assert_eq!(body.text, "Post number 1");
    assert_eq!(body.author_id, author.id);
    assert_eq!(body.group_id, Some(group.id));
    assert_eq!(body.pub_date, post.pub_date);
}

#[actix_web::test]
async fn missing_post_is_not_found() {
    let env = TestEnv::new();
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- Create ---

#[actix_web::test]
async fn create_requires_authentication() {
    let env = TestEnv::new();
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .set_json(CreatePostRequest {
                text: "anonymous".to_string(),
                group: None,
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(env.state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn created_post_appears_in_its_listings_and_nowhere_else() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let group = env.seed_group("first-group").await;
    env.seed_group("second-group").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(env.bearer(&author))
            .set_json(CreatePostRequest {
                text: "New post".to_string(),
                group: Some(group.id),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/api/profiles/tanos/posts"
    );
    let created: PostResponse = test::read_body_json(resp).await;
    assert_eq!(created.author_id, author.id);
    assert_eq!(created.group_id, Some(group.id));

    // Appears on index, profile, and its group listing
    let page: PostPage =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/posts").to_request())
            .await;
    assert!(page.posts.iter().any(|p| p.id == created.id));

    let profile: ProfileResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/profiles/tanos/posts")
            .to_request(),
    )
    .await;
    assert!(profile.page.posts.iter().any(|p| p.id == created.id));

    let in_group: GroupPostsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/groups/first-group/posts")
            .to_request(),
    )
    .await;
    assert!(in_group.page.posts.iter().any(|p| p.id == created.id));

    // But not in any other group's listing
    let elsewhere: GroupPostsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/groups/second-group/posts")
            .to_request(),
    )
    .await;
    assert!(elsewhere.page.posts.is_empty());
}

#[actix_web::test]
async fn groupless_post_is_in_no_group_listing() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    env.seed_group("first-group").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(env.bearer(&author))
            .set_json(CreatePostRequest {
                text: "No group".to_string(),
                group: None,
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let index: PostPage =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/posts").to_request())
            .await;
    assert_eq!(index.posts.len(), 1);

    let in_group: GroupPostsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/groups/first-group/posts")
            .to_request(),
    )
    .await;
    assert!(in_group.page.posts.is_empty());
}

#[actix_web::test]
async fn create_with_empty_text_is_rejected_field_level() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(env.bearer(&author))
            .set_json(CreatePostRequest {
                text: "   ".to_string(),
                group: None,
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.errors.iter().any(|e| e.field == "text"));

    // no mutation happened
    assert!(env.state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn create_with_unknown_group_is_rejected_field_level() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(env.bearer(&author))
            .set_json(CreatePostRequest {
                text: "Fine text".to_string(),
                group: Some(Uuid::new_v4()),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.errors.iter().any(|e| e.field == "group"));
    assert!(env.state.posts.find_all().await.unwrap().is_empty());
}

// --- Edit ---

#[actix_web::test]
async fn author_edit_updates_text_and_group_in_place() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let group = env.seed_group("first-group").await;
    let post = env.seed_post(&author, None, "before").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post.id))
            .insert_header(env.bearer(&author))
            .set_json(UpdatePostRequest {
                text: "after".to_string(),
                group: Some(group.id),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: PostResponse = test::read_body_json(resp).await;
    assert_eq!(updated.id, post.id);
    assert_eq!(updated.text, "after");
    assert_eq!(updated.group_id, Some(group.id));
    assert_eq!(updated.pub_date, post.pub_date);
}

#[actix_web::test]
async fn edit_preserves_listing_position() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let mut ids = Vec::new();
    for (hours_ago, text) in [(3, "oldest"), (2, "middle"), (1, "newest")] {
        let mut post = Post::new(author.id, text.to_string(), None);
        post.pub_date -= chrono::TimeDelta::hours(hours_ago);
        ids.push(env.state.posts.save(post).await.unwrap().id);
    }
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/posts/{}", ids[1]))
            .insert_header(env.bearer(&author))
            .set_json(UpdatePostRequest {
                text: "middle, edited".to_string(),
                group: None,
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page: PostPage =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/posts").to_request())
            .await;
    let texts: Vec<&str> = page.posts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["newest", "middle, edited", "oldest"]);
}

#[actix_web::test]
async fn non_author_edit_redirects_silently_and_changes_nothing() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let intruder = env.seed_user("loki").await;
    let post = env.seed_post(&author, None, "untouchable").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post.id))
            .insert_header(env.bearer(&intruder))
            .set_json(UpdatePostRequest {
                text: "defaced".to_string(),
                group: None,
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        format!("/api/posts/{}", post.id).as_str()
    );
    let body = test::read_body(resp).await;
    assert!(body.is_empty());

    let unchanged = env.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(unchanged.text, "untouchable");
    assert_eq!(unchanged.author_id, author.id);
}

#[actix_web::test]
async fn edit_validation_failure_leaves_the_post_unchanged() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let post = env.seed_post(&author, None, "original").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post.id))
            .insert_header(env.bearer(&author))
            .set_json(UpdatePostRequest {
                text: String::new(),
                group: None,
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let unchanged = env.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(unchanged.text, "original");
}

#[actix_web::test]
async fn edit_of_missing_post_is_not_found() {
    let env = TestEnv::new();
    let author = env.seed_user("tanos").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .insert_header(env.bearer(&author))
            .set_json(UpdatePostRequest {
                text: "whatever".to_string(),
                group: None,
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- Auth ---

#[actix_web::test]
async fn register_login_me_flow() {
    let env = TestEnv::new();
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(RegisterRequest {
                username: "tanos".to_string(),
                email: "tanos@example.com".to_string(),
                password: "secure_password".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": "tanos",
                "password": "secure_password",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let auth: AuthResponse = test::read_body_json(resp).await;

    let me: UserResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", auth.access_token),
            ))
            .to_request(),
    )
    .await;
    assert_eq!(me.username, "tanos");
}

#[actix_web::test]
async fn duplicate_username_is_a_conflict() {
    let env = TestEnv::new();
    env.seed_user("tanos").await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(RegisterRequest {
                username: "tanos".to_string(),
                email: "other@example.com".to_string(),
                password: "secure_password".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn wrong_password_is_unauthorized() {
    let env = TestEnv::new();
    let app = test_app!(env);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(RegisterRequest {
                username: "tanos".to_string(),
                email: "tanos@example.com".to_string(),
                password: "secure_password".to_string(),
            })
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": "tanos",
                "password": "wrong_password",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
