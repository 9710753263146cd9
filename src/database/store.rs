use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Movie, NewUser, User, UserChanges};

/// Read access to the Movies collection.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Every movie, in insertion order
    async fn find_movies(&self) -> Result<Vec<Movie>, DatabaseError>;

    /// Exact, case-sensitive match on `Title`
    async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>, DatabaseError>;

    /// First movie (insertion order) whose `Genre.Name` matches
    async fn find_movie_by_genre(&self, genre_name: &str) -> Result<Option<Movie>, DatabaseError>;

    /// First movie (insertion order) whose `Director.Name` matches
    async fn find_movie_by_director(&self, director_name: &str) -> Result<Option<Movie>, DatabaseError>;
}

/// Access to the Users collection. Every operation is keyed by `Username`.
///
/// Mutations return the post-update document, or `None` when no user has
/// that username.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_users(&self) -> Result<Vec<User>, DatabaseError>;

    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    /// Insert a new user. A taken username is reported as
    /// `DatabaseError::Conflict` and leaves the existing document unchanged.
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    /// Apply only the fields present in `changes`
    async fn update_user(&self, username: &str, changes: UserChanges) -> Result<Option<User>, DatabaseError>;

    /// Append `movie_id` to `FavoriteMovies` (duplicates allowed)
    async fn add_favorite(&self, username: &str, movie_id: &str) -> Result<Option<User>, DatabaseError>;

    /// Remove every occurrence of `movie_id` from `FavoriteMovies`
    async fn remove_favorite(&self, username: &str, movie_id: &str) -> Result<Option<User>, DatabaseError>;

    /// Delete and return the removed document
    async fn delete_user(&self, username: &str) -> Result<Option<User>, DatabaseError>;
}

/// The full document store the API runs against.
#[async_trait]
pub trait Store: MovieStore + UserStore {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
