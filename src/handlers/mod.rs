// handlers/mod.rs - three handler tiers
//
// Public (no token) → Protected (any valid token) → Elevated (admin token).
// The tier decides which guard the router wraps the routes in; handlers in
// the protected and elevated tiers read the caller through `AuthUser`.
pub mod elevated;
pub mod extract;
pub mod protected;
pub mod public;

pub use extract::{Pagination, ValidJson};
