// handlers/elevated/mod.rs - handlers behind `require_admin` (/api/admin/*)
pub mod credentials;
pub mod roles;
pub mod users;
