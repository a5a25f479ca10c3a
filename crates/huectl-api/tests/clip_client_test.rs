#![allow(clippy::unwrap_used)]
// Integration tests for `ClipClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huectl_api::{BridgeEndpoint, ClipClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

const APP_KEY: &str = "test-app-key";

async fn setup() -> (MockServer, ClipClient) {
    let server = MockServer::start().await;
    let endpoint = BridgeEndpoint::new(server.address().to_string()).with_scheme("http");
    let key = SecretString::from(APP_KEY.to_string());
    let client = ClipClient::with_client(reqwest::Client::new(), endpoint, &key).unwrap();
    (server, client)
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_sends_app_key() {
    let (server, client) = setup().await;

    let body = json!({
        "errors": [],
        "data": [{
            "id": "d1",
            "metadata": { "name": "Hue Bridge", "archetype": "bridge_v2" },
            "services": [{ "rid": "b1", "rtype": "bridge" }],
            "type": "device"
        }]
    });

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/device"))
        .and(header("hue-application-key", APP_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let resp = client.list_devices().await.unwrap();

    assert!(resp.is_ok());
    assert_eq!(resp.data.len(), 1);
    assert_eq!(resp.data[0].metadata.name, "Hue Bridge");
    assert_eq!(resp.data[0].services[0].rid, "b1");
}

#[tokio::test]
async fn test_404_is_a_valid_response() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/device"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "description": "Not Found" }],
            "data": []
        })))
        .mount(&server)
        .await;

    let resp = client.list_devices().await.unwrap();

    assert!(resp.is_not_found());
    assert!(resp.data.is_empty());
    assert_eq!(resp.error_summary(), "Not Found");
}

#[tokio::test]
async fn test_404_with_plain_body_is_still_valid() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let resp = client.get_light("missing").await.unwrap();

    assert_eq!(resp.status, 404);
    assert_eq!(resp.error_summary(), "<html>nope</html>");
}

// ── Lights ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_light_puts_body_verbatim() {
    let (server, client) = setup().await;

    let update = json!({ "dimming": { "brightness": 250.0 } });

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/abc123"))
        .and(header_exists("hue-application-key"))
        .and(body_json(&update))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [],
            "data": [{ "rid": "abc123", "rtype": "light" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.update_light("abc123", &update).await.unwrap();

    assert_eq!(resp.data[0].rid, "abc123");
    assert_eq!(resp.data[0].rtype, "light");
}

#[tokio::test]
async fn test_light_rid_stays_in_one_path_segment() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/device"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [],
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_light("../device", &json!({ "on": { "on": true } }))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let sent = received[0].url.path();
    assert!(sent.starts_with("/clip/v2/resource/light/"), "{sent}");
    assert!(sent.ends_with("..%2Fdevice"), "{sent}");
}

#[tokio::test]
async fn test_list_lights_decodes_state() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [],
            "data": [{
                "id": "abc123",
                "owner": { "rid": "d2", "rtype": "device" },
                "metadata": { "name": "Lamp", "archetype": "sultan_bulb" },
                "on": { "on": true },
                "dimming": { "brightness": 42.5 },
                "color_temperature": { "mirek": 366, "mirek_valid": true },
                "color": { "xy": { "x": 0.45, "y": 0.41 } },
                "type": "light"
            }]
        })))
        .mount(&server)
        .await;

    let resp = client.list_lights().await.unwrap();
    let light = &resp.data[0];

    assert_eq!(light.on.map(|o| o.on), Some(true));
    assert_eq!(light.dimming.map(|d| d.brightness), Some(42.5));
    assert_eq!(light.color_temperature.and_then(|c| c.mirek), Some(366));
    assert_eq!(light.owner.as_ref().map(|o| o.rid.as_str()), Some("d2"));
}

// ── Entertainment ───────────────────────────────────────────────────

#[tokio::test]
async fn test_update_entertainment_configuration() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/entertainment_configuration/ent-1"))
        .and(body_json(json!({ "action": "start" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [],
            "data": [{ "rid": "ent-1", "rtype": "entertainment_configuration" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .update_entertainment_configuration("ent-1", &json!({ "action": "start" }))
        .await
        .unwrap();

    assert!(resp.is_ok());
}

// ── System ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_bridge_config_is_unauthenticated() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Hue Bridge",
            "swversion": "1962097030",
            "apiversion": "1.62.0",
            "bridgeid": "001788FFFE000000",
            "modelid": "BSB002"
        })))
        .mount(&server)
        .await;

    let info = client.bridge_config().await.unwrap();

    assert_eq!(info.swversion.as_deref(), Some("1962097030"));
    assert_eq!(info.modelid.as_deref(), Some("BSB002"));

    let requests = server.received_requests().await.unwrap();
    assert!(
        requests[0].headers.get("hue-application-key").is_none(),
        "config endpoint must not receive the application key"
    );
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_is_invalid_app_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.list_devices().await;

    assert!(
        matches!(result, Err(Error::InvalidAppKey { status: 403 })),
        "expected InvalidAppKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_other_status_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "description": "body contains invalid json" }],
            "data": []
        })))
        .mount(&server)
        .await;

    let result = client.update_light("abc123", &json!({ "on": "yes" })).await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("invalid json"), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_200_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/device"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_devices().await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let endpoint = BridgeEndpoint::new("127.0.0.1:1").with_scheme("http");
    let key = SecretString::from(APP_KEY.to_string());
    let client = ClipClient::with_client(reqwest::Client::new(), endpoint, &key).unwrap();

    let err = client.list_devices().await.unwrap_err();

    assert!(err.is_transport(), "expected transport error, got: {err:?}");
}
