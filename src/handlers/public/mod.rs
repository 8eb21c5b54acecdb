// handlers/public/mod.rs - handlers reachable without a token
//
// Login, registration and read-only views of articles and comments.
pub mod articles;
pub mod auth;
pub mod comments;
pub mod health;
pub mod users;
