#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;
use uuid::Uuid;

use myflix_api::auth::{generate_jwt, hash_password, Claims};
use myflix_api::database::models::{Director, Genre, Movie, NewUser, User, UserChanges};
use myflix_api::database::{DatabaseError, MovieStore, Store, UserStore};
use myflix_api::AppState;

/// In-memory stand-in for the PostgreSQL store, so the router can be driven
/// without a database.
#[derive(Default)]
pub struct MemoryStore {
    movies: RwLock<Vec<Movie>>,
    users: RwLock<Vec<User>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Make every subsequent store call fail like a lost connection
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::Protocol("connection reset".to_string())));
        }
        Ok(())
    }

    pub async fn insert_movie(&self, movie: Movie) {
        self.movies.write().await.push(movie);
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn raw_user(&self, username: &str) -> Option<User> {
        self.users.read().await.iter().find(|u| u.username == username).cloned()
    }

    async fn modify_user(
        &self,
        username: &str,
        f: impl FnOnce(&mut User),
    ) -> Result<Option<User>, DatabaseError> {
        self.check()?;
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.username == username).map(|user| {
            f(user);
            user.clone()
        }))
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn find_movies(&self) -> Result<Vec<Movie>, DatabaseError> {
        self.check()?;
        Ok(self.movies.read().await.clone())
    }

    async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>, DatabaseError> {
        self.check()?;
        Ok(self.movies.read().await.iter().find(|m| m.title == title).cloned())
    }

    async fn find_movie_by_genre(&self, genre_name: &str) -> Result<Option<Movie>, DatabaseError> {
        self.check()?;
        Ok(self.movies.read().await.iter().find(|m| m.genre.name == genre_name).cloned())
    }

    async fn find_movie_by_director(&self, director_name: &str) -> Result<Option<Movie>, DatabaseError> {
        self.check()?;
        Ok(self.movies.read().await.iter().find(|m| m.director.name == director_name).cloned())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_users(&self) -> Result<Vec<User>, DatabaseError> {
        self.check()?;
        Ok(self.users.read().await.clone())
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        self.check()?;
        Ok(self.raw_user(username).await)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        self.check()?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::Conflict(user.username));
        }
        let user = user.into_user(Uuid::new_v4());
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, username: &str, changes: UserChanges) -> Result<Option<User>, DatabaseError> {
        self.check()?;
        let mut users = self.users.write().await;
        // Same order as the SQL UPDATE: no matching row means no write, so
        // no unique-index check either.
        if !users.iter().any(|u| u.username == username) {
            return Ok(None);
        }
        if let Some(new_name) = &changes.username {
            if new_name != username && users.iter().any(|u| &u.username == new_name) {
                return Err(DatabaseError::Conflict(new_name.clone()));
            }
        }
        Ok(users.iter_mut().find(|u| u.username == username).map(|user| {
            changes.apply_to(user);
            user.clone()
        }))
    }

    async fn add_favorite(&self, username: &str, movie_id: &str) -> Result<Option<User>, DatabaseError> {
        self.modify_user(username, |user| user.favorite_movies.push(movie_id.to_string()))
            .await
    }

    async fn remove_favorite(&self, username: &str, movie_id: &str) -> Result<Option<User>, DatabaseError> {
        self.modify_user(username, |user| user.favorite_movies.retain(|m| m != movie_id))
            .await
    }

    async fn delete_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        self.check()?;
        let mut users = self.users.write().await;
        Ok(users
            .iter()
            .position(|u| u.username == username)
            .map(|idx| users.remove(idx)))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check()
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Router over an empty store
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let router = myflix_api::app(AppState::new(store.clone()));
        Self { router, store }
    }

    /// Router over a store holding the fixture movies
    pub async fn with_movies() -> Self {
        let app = Self::new();
        for movie in fixture_movies() {
            app.store.insert_movie(movie).await;
        }
        app
    }

    /// Insert a user directly into the store and return a bearer token for it
    pub async fn user(&self, username: &str, password: &str) -> Result<String> {
        self.store
            .create_user(NewUser {
                username: username.to_string(),
                password: hash_password(password.to_string()).await?,
                email: format!("{}@example.com", username),
                birthday: None,
            })
            .await?;
        Ok(token_for(username))
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, body))
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.send(request(Method::GET, path, token, None)).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Option<Value>) -> Result<(StatusCode, Value)> {
        self.send(request(Method::POST, path, token, body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.send(request(Method::PUT, path, token, Some(body))).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.send(request(Method::DELETE, path, token, None)).await
    }
}

pub fn request(method: Method, path: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("valid request")
}

pub fn token_for(username: &str) -> String {
    generate_jwt(&Claims::new(username)).expect("token")
}

pub fn movie(title: &str, genre: &str, director: &str) -> Movie {
    Movie {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{} description", title),
        genre: Genre {
            name: genre.to_string(),
            description: format!("{} films", genre),
        },
        director: Director {
            name: director.to_string(),
            bio: format!("{} bio", director),
            birth: Some("1965".to_string()),
        },
        feature: false,
        image_path: None,
    }
}

pub fn fixture_movies() -> Vec<Movie> {
    let mut matrix = movie("The Matrix", "Action", "Lana Wachowski");
    matrix.feature = true;
    matrix.image_path = Some("matrix.png".to_string());

    let mut wick = movie("John Wick", "Action", "Chad Stahelski");
    wick.genre.description = "Second action description".to_string();

    vec![matrix, wick, movie("Heat", "Crime", "Michael Mann")]
}
