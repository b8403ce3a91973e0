//! User model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gadgetgrid_core::{Email, UserId, UserRole};

/// A storefront account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
