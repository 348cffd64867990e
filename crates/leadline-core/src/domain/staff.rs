use crate::domain::ids::StaffId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Team,
}

impl StaffRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Team => "team",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(StaffRole::Admin),
            "team" => Some(StaffRole::Team),
            _ => None,
        }
    }
}

/// A staff member as resolved by the auth layer. Credential handling lives
/// outside this crate; the core only ever sees the resolved identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub username: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: StaffRole,
    pub is_active: bool,
    pub created_at: i64,
}
