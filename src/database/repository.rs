use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::movie::MovieRow;
use crate::database::models::{Movie, NewMovie, NewUser, User, UserChanges};
use crate::database::store::{MovieStore, Store, UserStore};

const MOVIE_COLUMNS: &str = "id, title, description, genre, director, feature, image_path";
const USER_COLUMNS: &str = "id, username, password, email, birthday, favorite_movies";

/// PostgreSQL-backed document store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace a movie keyed by `Title`. Used for out-of-band seeding.
    pub async fn upsert_movie(&self, movie: NewMovie) -> Result<Movie, DatabaseError> {
        let sql = format!(
            "INSERT INTO movies ({MOVIE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (title) DO UPDATE SET
                description = EXCLUDED.description,
                genre = EXCLUDED.genre,
                director = EXCLUDED.director,
                feature = EXCLUDED.feature,
                image_path = EXCLUDED.image_path
             RETURNING {MOVIE_COLUMNS}"
        );

        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&movie.title)
            .bind(&movie.description)
            .bind(Json(&movie.genre))
            .bind(Json(&movie.director))
            .bind(movie.feature)
            .bind(&movie.image_path)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn movie_where(&self, predicate: &str, value: &str) -> Result<Option<Movie>, DatabaseError> {
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE {predicate} ORDER BY created_at, id LIMIT 1"
        );
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn find_movies(&self) -> Result<Vec<Movie>, DatabaseError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, MovieRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>, DatabaseError> {
        self.movie_where("title = $1", title).await
    }

    async fn find_movie_by_genre(&self, genre_name: &str) -> Result<Option<Movie>, DatabaseError> {
        self.movie_where("genre->>'Name' = $1", genre_name).await
    }

    async fn find_movie_by_director(&self, director_name: &str) -> Result<Option<Movie>, DatabaseError> {
        self.movie_where("director->>'Name' = $1", director_name).await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        // The unique index on username decides; a losing concurrent insert
        // returns no row.
        let sql = format!(
            "INSERT INTO users (id, username, password, email, birthday)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (username) DO NOTHING
             RETURNING {USER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.email)
            .bind(user.birthday)
            .fetch_optional(&self.pool)
            .await?;

        created.ok_or(DatabaseError::Conflict(user.username))
    }

    async fn update_user(&self, username: &str, changes: UserChanges) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                password = COALESCE($3, password),
                email = COALESCE($4, email),
                birthday = COALESCE($5, birthday)
             WHERE username = $1
             RETURNING {USER_COLUMNS}"
        );
        let new_username = changes.username.clone().unwrap_or_else(|| username.to_string());

        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(&changes.username)
            .bind(&changes.password)
            .bind(&changes.email)
            .bind(changes.birthday)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::conflict_on_unique(e, &new_username))
    }

    async fn add_favorite(&self, username: &str, movie_id: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET favorite_movies = array_append(favorite_movies, $2)
             WHERE username = $1
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn remove_favorite(&self, username: &str, movie_id: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET favorite_movies = array_remove(favorite_movies, $2)
             WHERE username = $1
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn delete_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("DELETE FROM users WHERE username = $1 RETURNING {USER_COLUMNS}");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
