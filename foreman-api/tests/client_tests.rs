use std::time::Duration;

use foreman_api::{ForemanClient, SettingId, SettingsApi};
use foreman_config::Connection;
use foreman_core::ForemanError;
use serde_json::json;
use url::Url;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connection_for(server: &MockServer) -> Connection {
    Connection {
        server_url: Url::parse(&server.uri()).unwrap(),
        username: "admin".to_string(),
        password: "changeme".to_string(),
        validate_certs: true,
        timeout: Duration::from_secs(5),
    }
}

/// The blocking client must be created, used and dropped off the async runtime
async fn with_client<T, F>(server: &MockServer, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&ForemanClient) -> T + Send + 'static,
{
    let connection = connection_for(server);
    tokio::task::spawn_blocking(move || {
        let client = ForemanClient::new(&connection).unwrap();
        f(&client)
    })
    .await
    .unwrap()
}

fn http_proxy_entity(value: &str) -> serde_json::Value {
    json!({
        "id": 12,
        "name": "http_proxy",
        "full_name": "HTTP(S) proxy",
        "description": "Set a proxy for all outgoing HTTP(S) connections",
        "category": "Setting::General",
        "settings_type": "string",
        "value": value,
        "default": ""
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_find_setting_searches_then_loads_full_entity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .and(query_param("search", "name=\"http_proxy\""))
        .and(header("accept", "application/json;version=2"))
        .and(basic_auth("admin", "changeme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 200,
            "subtotal": 1,
            "results": [{ "id": 12, "name": "http_proxy" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/settings/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(http_proxy_entity("")))
        .expect(1)
        .mount(&server)
        .await;

    let setting = with_client(&server, |client| client.find_setting("http_proxy"))
        .await
        .unwrap();

    assert_eq!(setting.id, Some(SettingId::Number(12)));
    assert_eq!(setting.settings_type, "string");
    assert_eq!(setting.extra["full_name"], json!("HTTP(S) proxy"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_find_setting_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.find_setting("nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, ForemanError::NotFound { .. }));
    assert!(err.to_string().contains("nope"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_find_setting_ambiguous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": 1, "name": "dup" },
                { "id": 2, "name": "dup" }
            ]
        })))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.find_setting("dup"))
        .await
        .unwrap_err();

    assert!(matches!(err, ForemanError::Ambiguous { count: 2, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_setting_puts_wrapped_value() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/settings/12"))
        .and(body_json(json!({ "setting": { "value": "http://localhost:8088" } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(http_proxy_entity("http://localhost:8088")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let updated = with_client(&server, |client| {
        let current = serde_json::from_value(http_proxy_entity("")).unwrap();
        client.update_setting(&current, &json!("http://localhost:8088"))
    })
    .await
    .unwrap();

    assert_eq!(updated.value, json!("http://localhost:8088"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_surfaces_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Unable to authenticate user admin" }
        })))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.find_setting("http_proxy"))
        .await
        .unwrap_err();

    assert!(err.is_auth_failure());
    assert!(err.to_string().contains("Unable to authenticate user admin"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_below_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/foreman/api/settings/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(http_proxy_entity("x")))
        .expect(1)
        .mount(&server)
        .await;

    let mut connection = connection_for(&server);
    connection.server_url = Url::parse(&format!("{}/foreman", server.uri())).unwrap();

    let setting = tokio::task::spawn_blocking(move || {
        ForemanClient::new(&connection)
            .unwrap()
            .show_setting("12")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(setting.value, json!("x"));
}
