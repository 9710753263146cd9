// Protected handlers: mounted behind `middleware::require_auth`.
pub mod favorites;
pub mod movies;
pub mod users;

pub use favorites::{add as favorite_add, remove as favorite_remove};
pub use movies::{director_get, genre_get, get as movie_get, list as movie_list};
pub use users::{delete as user_delete, get as user_get, list as user_list, update as user_update};
