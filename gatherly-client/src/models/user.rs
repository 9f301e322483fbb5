use serde::{Deserialize, Serialize};
use validator::Validate;

/// A Gatherly account holder.
///
/// The same entity arrives in narrower and fuller forms across endpoints,
/// so everything beyond the identity fields is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_admin_of: Option<Vec<String>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// System-wide admin rights, distinct from per-group admin rights.
    pub fn is_super_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    pub fn is_group_admin(&self, group_id: &str) -> bool {
        self.group_admin_of
            .as_ref()
            .is_some_and(|groups| groups.iter().any(|id| id == group_id))
    }
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UserListData {
    pub users: Vec<User>,
}
