use super::user::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admins: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, message = "Group name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupRequest {
    pub invite_token: String,
}

#[derive(Debug, Deserialize)]
pub struct GroupData {
    pub group: Group,
}

#[derive(Debug, Deserialize)]
pub struct GroupListData {
    pub groups: Vec<Group>,
}

/// Joining a group by invite returns both the group and the caller's
/// refreshed user record (their membership list changed).
#[derive(Debug, Deserialize)]
pub struct JoinGroupData {
    pub group: Group,
    pub user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteData {
    pub invite_token: String,
}
