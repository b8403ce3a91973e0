//! Session-stored admin identity.

use serde::{Deserialize, Serialize};

use gadgetgrid_core::{Email, UserId, UserRole};

use crate::db::users::User;

/// Minimal data stored in the session to identify the signed-in admin.
///
/// Only users with the admin role ever make it into the session; the login
/// flow rejects everyone else before this struct exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// User's database ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// Account role (always admin once stored).
    pub role: UserRole,
}

impl From<&User> for CurrentAdmin {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Session keys for the admin session.
pub mod keys {
    /// Key for storing the signed-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
