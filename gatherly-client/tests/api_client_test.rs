use gatherly_client::error::ApiError;
use gatherly_client::models::event::CreateEventRequest;
use gatherly_client::services::api_client::ApiClient;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn events_envelope() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "events": [
                {
                    "id": "e1",
                    "title": "Bouldering",
                    "date": "2026-09-01",
                    "time": "17:00",
                    "group": "g42"
                },
                {
                    "id": "e2",
                    "title": "Book club",
                    "date": "2026-09-03T19:00:00Z",
                    "group": {"id": "g7", "name": "Readers"}
                }
            ]
        }
    })
}

#[tokio::test]
async fn successful_call_returns_decoded_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let events = client.list_events().await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "e1");
    assert_eq!(events[1].group.as_ref().map(|g| g.id()), Some("g7"));
}

#[tokio::test]
async fn status_401_is_unauthorized_even_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.list_events().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(err.is_session_invalid());
}

#[tokio::test]
async fn status_403_is_forbidden_not_a_session_problem() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/events/e1"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"success": false, "message": "Admins only"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.delete_event("e1").await.unwrap_err();

    assert!(matches!(err, ApiError::Forbidden));
    assert!(!err.is_session_invalid());
}

#[tokio::test]
async fn failure_body_message_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/e1/join"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"success": false, "message": "Event is full"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.join_waitlist("e1").await.unwrap_err();

    match err {
        ApiError::Server(message) => assert_eq!(message, "Event is full"),
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn unparsable_failure_body_falls_back_to_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.list_events().await.unwrap_err();

    match err {
        ApiError::Server(message) => assert_eq!(message, "HTTP 500"),
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn success_false_under_2xx_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Maintenance window"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.list_events().await.unwrap_err();

    match err {
        ApiError::Server(message) => assert_eq!(message, "Maintenance window"),
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn schema_mismatch_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            // 2xx but the data shape does not match the declared type.
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"events": [{"id": 42}]}})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.list_events().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn transport_failure_is_a_network_error() {
    // Nothing listens here.
    let client = ApiClient::new("http://127.0.0.1:1");
    let err = client.list_events().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn move_to_waitlist_issues_two_calls_in_order_with_same_user() {
    let server = MockServer::start().await;
    let body = json!({"userId": "u7"});

    Mock::given(method("POST"))
        .and(path("/api/events/e1/nogo"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/events/e1/move-to-waitlist"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    client.move_to_waitlist("e1", "u7").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(
        paths,
        vec!["/api/events/e1/nogo", "/api/events/e1/move-to-waitlist"]
    );
}

#[tokio::test]
async fn move_to_waitlist_stops_after_first_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/events/e1/nogo"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"success": false, "message": "Not going already"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/events/e1/move-to-waitlist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.move_to_waitlist("e1", "u7").await.unwrap_err();

    // The combined failure is the first call's error.
    match err {
        ApiError::Server(message) => assert_eq!(message, "Not going already"),
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/groups/g1/events"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let request = CreateEventRequest {
        title: String::new(),
        description: None,
        location: None,
        date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        max_attendees: None,
        guests: 0,
        notify_group: false,
    };

    let err = client.create_event("g1", &request).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn create_event_posts_under_the_group() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/groups/g42/events"))
        .and(body_json(json!({
            "title": "Bouldering",
            "location": "The Gym",
            "date": "2026-09-01",
            "time": "17:00:00",
            "maxAttendees": 12,
            "guests": 0,
            "notifyGroup": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"event": {"id": "e9", "title": "Bouldering", "date": "2026-09-01"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let request = CreateEventRequest {
        title: "Bouldering".to_string(),
        description: None,
        location: Some("The Gym".to_string()),
        date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        max_attendees: Some(12),
        guests: 0,
        notify_group: true,
    };

    let event = client.create_event("g42", &request).await.unwrap();
    assert_eq!(event.id, "e9");
}

#[tokio::test]
async fn acknowledgement_message_is_returned_to_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/notifications/n1/read"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Marked as read"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let ack = client.mark_notification_read("n1").await.unwrap();

    assert!(ack.success);
    assert_eq!(ack.message.as_deref(), Some("Marked as read"));
}
