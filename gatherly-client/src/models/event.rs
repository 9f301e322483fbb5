use super::dates;
use super::group::Group;
use super::user::User;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A group reference as the server sends it: some endpoints embed the
/// full group object, others only its id. Resolved into a variant once
/// at the decoding boundary; downstream code matches on the variant
/// instead of probing JSON shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GroupRef {
    ByValue(Group),
    ById(String),
}

impl GroupRef {
    pub fn id(&self) -> &str {
        match self {
            GroupRef::ById(id) => id,
            GroupRef::ByValue(group) => &group.id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(deserialize_with = "dates::deserialize_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "dates::deserialize_opt_time")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub group: Option<GroupRef>,
    #[serde(default)]
    pub attendees: Vec<User>,
    #[serde(default)]
    pub waitlist: Vec<User>,
    #[serde(default)]
    pub no_go_list: Vec<User>,
}

impl Event {
    /// Whether the going list is at its configured capacity. `None` means
    /// unlimited. Informational only; the server enforces capacity.
    pub fn is_full(&self) -> bool {
        self.max_attendees
            .is_some_and(|cap| self.attendees.len() >= cap as usize)
    }
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    pub guests: u32,
    pub notify_group: bool,
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    pub guests: u32,
}

/// `{userId}` payload for attendance transitions performed on another
/// user (approve, reject, move to waitlist).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeRequest {
    pub user_id: String,
}

/// `{subject, message}` payload for mailing an event's attendees.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailAttendeesRequest {
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub event: Event,
}

#[derive(Debug, Deserialize)]
pub struct EventListData {
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_ref_decodes_bare_id() {
        let group: GroupRef = serde_json::from_str(r#""g42""#).unwrap();
        assert_eq!(group, GroupRef::ById("g42".to_string()));
        assert_eq!(group.id(), "g42");
    }

    #[test]
    fn group_ref_decodes_full_object() {
        let group: GroupRef = serde_json::from_str(r#"{"id":"g42","name":"Climbers"}"#).unwrap();
        assert_eq!(group.id(), "g42");
        assert!(matches!(group, GroupRef::ByValue(_)));
    }

    #[test]
    fn event_decodes_mixed_date_formats() {
        let event: Event = serde_json::from_str(
            r#"{"id":"e1","title":"Bouldering","date":"2026-09-01T17:00:00Z","time":"17:00","group":"g42"}"#,
        )
        .unwrap();

        assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_eq!(event.time, NaiveTime::from_hms_opt(17, 0, 0));
        assert_eq!(event.group.as_ref().map(GroupRef::id), Some("g42"));
        assert!(event.attendees.is_empty());
    }

    #[test]
    fn event_capacity_check() {
        let mut event: Event = serde_json::from_str(
            r#"{"id":"e1","title":"Bouldering","date":"2026-09-01","maxAttendees":1,
                "attendees":[{"id":"u1","firstName":"A","lastName":"B","email":"a@b.com"}]}"#,
        )
        .unwrap();

        assert!(event.is_full());
        event.max_attendees = None;
        assert!(!event.is_full());
    }

    #[test]
    fn create_event_request_serializes_wire_names() {
        let req = CreateEventRequest {
            title: "Bouldering".to_string(),
            description: None,
            location: Some("The Gym".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            max_attendees: Some(12),
            guests: 0,
            notify_group: true,
        };
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["maxAttendees"], 12);
        assert_eq!(json["notifyGroup"], true);
        assert_eq!(json["date"], "2026-09-01");
        assert!(json.get("description").is_none());
    }
}
