use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Movie document as returned by the API. Field names follow the stored
/// document shape (`Title`, `Genre.Name`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    #[serde(default)]
    pub feature: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Genre {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Director {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub birth: Option<String>,
}

/// Movie document without an identifier, as read from a seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    #[serde(default)]
    pub feature: bool,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Row shape of the `movies` table; nested documents live in JSONB columns.
#[derive(Debug, FromRow)]
pub struct MovieRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: Json<Genre>,
    pub director: Json<Director>,
    pub feature: bool,
    pub image_path: Option<String>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: row.genre.0,
            director: row.director.0,
            feature: row.feature,
            image_path: row.image_path,
        }
    }
}
