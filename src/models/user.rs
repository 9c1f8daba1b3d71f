use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::UserType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub user_type: UserType,
    pub is_verified: bool,
}
