use chrono::NaiveDate;
use serde_json::json;
use std::time::Duration;
use timetrack::models::DayRecord;
use timetrack::remote::{
    ApiStyle, BodyEncoding, DeleteMode, HttpRemote, HttpRemoteConfig, RangePayload, RemoteEndpoint,
    RemoteError,
};
use timetrack::utils::time::parse_time;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn client(
    server: &MockServer,
    style: ApiStyle,
    encoding: BodyEncoding,
    delete: DeleteMode,
) -> HttpRemote {
    HttpRemote::new(HttpRemoteConfig {
        base_url: format!("{}/exec", server.uri()),
        user: Some("alice".into()),
        style,
        encoding,
        delete_mode: delete,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn workday() -> DayRecord {
    DayRecord::with_times(parse_time("09:00"), parse_time("17:00"), 60)
}

#[tokio::test]
async fn script_style_range_uses_fn_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/exec"))
        .and(query_param("fn", "range"))
        .and(query_param("user", "alice"))
        .and(query_param("start", "2025-01-01"))
        .and(query_param("end", "2025-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ["2025-01-02", "09:00", "17:00", "60", "07h00", ""]
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let remote = client(&server, ApiStyle::Script, BodyEncoding::Json, DeleteMode::Endpoint);
    let payload = remote.fetch_range(d("2025-01-01"), d("2025-01-31")).await.unwrap();
    assert!(matches!(payload, RangePayload::Rows(ref rows) if rows.len() == 1));
}

#[tokio::test]
async fn rest_style_upsert_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec/update"))
        .and(body_partial_json(json!({
            "user": "alice",
            "date": "2025-01-02",
            "start": "09:00",
            "end": "17:00",
            "pause": 60,
            "type": "normal"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let remote = client(&server, ApiStyle::Rest, BodyEncoding::Json, DeleteMode::Endpoint);
    remote.upsert_day(d("2025-01-02"), &workday()).await.unwrap();
}

#[tokio::test]
async fn form_encoding_wraps_payload_in_data_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(query_param("fn", "punch"))
        .and(body_string_contains("data="))
        .and(body_string_contains("2025-01-02"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let remote = client(&server, ApiStyle::Script, BodyEncoding::Form, DeleteMode::Endpoint);
    remote.upsert_day(d("2025-01-02"), &workday()).await.unwrap();
}

#[tokio::test]
async fn rejection_and_status_errors_are_typed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec/update"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "sheet locked"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exec/range"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let remote = client(&server, ApiStyle::Rest, BodyEncoding::Json, DeleteMode::Endpoint);

    match remote.upsert_day(d("2025-01-02"), &workday()).await {
        Err(RemoteError::Rejected(msg)) => assert_eq!(msg, "sheet locked"),
        other => panic!("expected rejection, got {other:?}"),
    }
    match remote.fetch_range(d("2025-01-01"), d("2025-01-02")).await {
        Err(RemoteError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_modes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(query_param("action", "delete"))
        .and(body_partial_json(json!({"date": "2025-01-03"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(query_param("fn", "punch"))
        .and(body_partial_json(json!({"date": "2025-01-04", "start": "", "end": ""})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = client(&server, ApiStyle::Script, BodyEncoding::Json, DeleteMode::Endpoint);
    endpoint.delete_day(d("2025-01-03")).await.unwrap();

    let empty = client(&server, ApiStyle::Script, BodyEncoding::Json, DeleteMode::EmptyRecord);
    empty.delete_day(d("2025-01-04")).await.unwrap();

    // no mock for this date: any request would fail the expectations above
    let local = client(&server, ApiStyle::Script, BodyEncoding::Json, DeleteMode::LocalOnly);
    local.delete_day(d("2025-01-05")).await.unwrap();
}

#[tokio::test]
async fn ping_reads_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/exec"))
        .and(query_param("fn", "ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ready"})))
        .mount(&server)
        .await;

    let remote = client(&server, ApiStyle::Script, BodyEncoding::Json, DeleteMode::Endpoint);
    assert_eq!(remote.ping().await.unwrap(), "ready");
}

#[test]
fn non_http_base_url_is_rejected() {
    let err = HttpRemote::new(HttpRemoteConfig {
        base_url: "file:///tmp/x".into(),
        ..HttpRemoteConfig::default()
    });
    assert!(matches!(err, Err(RemoteError::Config(_))));
}
