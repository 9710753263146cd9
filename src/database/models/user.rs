use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User document. `Password` holds a bcrypt hash and is never serialized,
/// so every response built from a `User` carries the same projection.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub favorite_movies: Vec<String>,
}

/// Body returned by signup and profile update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    pub username: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            birthday: user.birthday,
        }
    }
}

/// Insert payload; `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

impl NewUser {
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            email: self.email,
            birthday: self.birthday,
            favorite_movies: Vec::new(),
        }
    }
}

/// Partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl UserChanges {
    pub fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(birthday) = self.birthday {
            user.birthday = Some(birthday);
        }
    }
}

/// Accepts a calendar date (`1999-03-31`) or an RFC 3339 timestamp, keeping
/// only the date part.
pub fn parse_birthday(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
