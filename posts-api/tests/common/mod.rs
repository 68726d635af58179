#![allow(dead_code)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::Utc;
use posts_api::domain::auth::service::AuthService;
use posts_api::domain::post::errors::PostError;
use posts_api::domain::post::models::NewPost;
use posts_api::domain::post::models::Post;
use posts_api::domain::post::models::PostChanges;
use posts_api::domain::post::models::PostId;
use posts_api::domain::post::models::PostQuery;
use posts_api::domain::post::ports::PostRepository;
use posts_api::domain::post::service::PostService;
use posts_api::domain::user::errors::UserError;
use posts_api::domain::user::models::NewUser;
use posts_api::domain::user::models::User;
use posts_api::domain::user::models::UserChanges;
use posts_api::domain::user::models::UserId;
use posts_api::domain::user::ports::UserRepository;
use posts_api::domain::user::service::UserService;
use posts_api::inbound::http::router::create_router;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

#[derive(Default)]
struct Tables {
    next_user_id: i64,
    next_post_id: i64,
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    votes: BTreeSet<(i64, i64)>,
}

/// In-memory stand-in for the Postgres schema, including its unique email
/// constraint and cascading deletes.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn voters(&self, post_id: i64) -> Vec<i64> {
        let tables = self.tables.lock().expect("store poisoned");
        tables
            .votes
            .iter()
            .filter(|(post, _)| *post == post_id)
            .map(|(_, user)| *user)
            .collect()
    }

    pub fn set_disabled(&self, user_id: i64, disabled: bool) {
        let mut tables = self.tables.lock().expect("store poisoned");
        if let Some(user) = tables.users.get_mut(&user_id) {
            user.disabled = disabled;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut tables = self.tables.lock().expect("store poisoned");
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyRegistered(
                user.email.as_str().to_string(),
            ));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: UserId(tables.next_user_id),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            disabled: user.disabled,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().expect("store poisoned");
        Ok(tables.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().expect("store poisoned");
        Ok(tables
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        let tables = self.tables.lock().expect("store poisoned");
        Ok(tables.users.values().any(|u| u.email.as_str() == email))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let tables = self.tables.lock().expect("store poisoned");
        Ok(tables.users.values().cloned().collect())
    }

    async fn update_by_id(&self, id: UserId, changes: UserChanges) -> Result<(), UserError> {
        let mut tables = self.tables.lock().expect("store poisoned");
        let user = tables.users.get_mut(&id.0).ok_or(UserError::NotFound(id))?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(disabled) = changes.disabled {
            user.disabled = disabled;
        }
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserError> {
        let mut tables = self.tables.lock().expect("store poisoned");
        tables.users.remove(&id.0).ok_or(UserError::NotFound(id))?;

        let owned: Vec<i64> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id.0)
            .collect();
        for post_id in &owned {
            tables.posts.remove(post_id);
        }
        tables
            .votes
            .retain(|(post, user)| *user != id.0 && !owned.contains(post));
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let mut tables = self.tables.lock().expect("store poisoned");
        tables.next_post_id += 1;
        let now = Utc::now();
        let created = Post {
            id: PostId(tables.next_post_id),
            title: post.title,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let tables = self.tables.lock().expect("store poisoned");
        Ok(tables.posts.get(&id.0).cloned())
    }

    async fn search(&self, query: &PostQuery) -> Result<Vec<Post>, PostError> {
        let tables = self.tables.lock().expect("store poisoned");
        let needle = query.search.to_lowercase();
        Ok(tables
            .posts
            .values()
            .filter(|p| p.title.as_str().to_lowercase().contains(&needle))
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, id: PostId, changes: PostChanges) -> Result<(), PostError> {
        let mut tables = self.tables.lock().expect("store poisoned");
        let post = tables.posts.get_mut(&id.0).ok_or(PostError::NotFound(id))?;
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        post.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_by_id(&self, id: PostId) -> Result<(), PostError> {
        let mut tables = self.tables.lock().expect("store poisoned");
        tables.posts.remove(&id.0).ok_or(PostError::NotFound(id))?;
        tables.votes.retain(|(post, _)| *post != id.0);
        Ok(())
    }

    async fn has_voter(&self, id: PostId, user_id: UserId) -> Result<bool, PostError> {
        let tables = self.tables.lock().expect("store poisoned");
        Ok(tables.votes.contains(&(id.0, user_id.0)))
    }

    async fn add_voter(&self, id: PostId, user_id: UserId) -> Result<(), PostError> {
        let mut tables = self.tables.lock().expect("store poisoned");
        tables.votes.insert((id.0, user_id.0));
        Ok(())
    }

    async fn remove_voter(&self, id: PostId, user_id: UserId) -> Result<(), PostError> {
        let mut tables = self.tables.lock().expect("store poisoned");
        tables.votes.remove(&(id.0, user_id.0));
        Ok(())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());

        let authenticator = Arc::new(Authenticator::new(
            JwtHandler::from_config(JWT_SECRET, "HS256", 30).expect("Invalid JWT config"),
        ));

        let router = create_router(
            Arc::new(UserService::new(Arc::clone(&store))),
            Arc::new(PostService::new(Arc::clone(&store))),
            Arc::new(AuthService::new(Arc::clone(&store), authenticator)),
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            jwt_handler: JwtHandler::from_config(JWT_SECRET, "HS256", 30)
                .expect("Invalid JWT config"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/users")
            .json(&json!({ "name": "tester", "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in through the form endpoint and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register, log in and return `(user id, access token)`
    pub async fn register_and_login(&self, email: &str, password: &str) -> (i64, String) {
        let user = self.register(email, password).await;
        let body: Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        (
            user["id"].as_i64().expect("user id"),
            body["access_token"]
                .as_str()
                .expect("access token")
                .to_string(),
        )
    }

    /// Create a post as the token's user and return its id
    pub async fn create_post(&self, token: &str, title: &str) -> i64 {
        let response = self
            .post_authenticated("/posts", token)
            .json(&json!({ "title": title, "content": "body", "published": true }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_i64().expect("post id")
    }
}
