pub mod movie;
pub mod user;

pub use movie::{Director, Genre, Movie, NewMovie};
pub use user::{parse_birthday, NewUser, User, UserChanges, UserSummary};
