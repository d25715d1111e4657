//! User role model
//!
//! Accounts are managed outside this system; only the role carried by the
//! authenticated identity is needed here.

use serde::{Deserialize, Serialize};

/// Roles that gate access to dashboards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Farmer,
    Officer,
}

impl Role {
    /// Officer views are open to admins as well
    pub fn can_view_officer_data(&self) -> bool {
        matches!(self, Role::Admin | Role::Officer)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Farmer => write!(f, "farmer"),
            Role::Officer => write!(f, "officer"),
        }
    }
}
