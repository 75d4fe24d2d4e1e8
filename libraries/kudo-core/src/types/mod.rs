/// Domain types for Kudo
mod ids;
mod playlist;
mod song;
mod user;

pub use ids::UserId;
pub use playlist::Playlist;
pub use song::{placeholder_image, AudioRef, Song};
pub use user::User;
