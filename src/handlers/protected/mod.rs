// handlers/protected/mod.rs - handlers behind `require_auth`
//
// Mutations of owned resources go through the services, which apply the
// ownership policy after loading the target.
pub mod articles;
pub mod auth;
pub mod comments;
pub mod credentials;
pub mod users;
