//! Ownership policy for mutating owned resources.
//!
//! Resource services load the target first and only then ask whether the
//! requester may change it, so a missing resource reports `NotFound` before
//! ownership is ever considered. Every owned type goes through
//! [`authorize_loaded`]; none re-implements the rule.

use super::{AuthError, Claims};

/// A resource that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> i32;
}

/// Admins may change anything, everyone else only what they own.
pub fn can_mutate(requester: &Claims, owner_id: i32) -> bool {
    requester.is_admin() || requester.user_id == owner_id
}

pub fn authorize_mutation(requester: &Claims, owner_id: i32) -> Result<(), AuthError> {
    if can_mutate(requester, owner_id) {
        Ok(())
    } else {
        tracing::warn!(
            "User {} ({}) denied mutation of resource owned by {}",
            requester.user_id,
            requester.role,
            owner_id
        );
        Err(AuthError::AccessDenied)
    }
}

/// Existence check followed by the ownership check.
pub fn authorize_loaded<R: Owned>(requester: &Claims, kind: &'static str, loaded: Option<R>) -> Result<R, AuthError> {
    let resource = loaded.ok_or(AuthError::NotFound(kind))?;
    authorize_mutation(requester, resource.owner_id())?;
    Ok(resource)
}
