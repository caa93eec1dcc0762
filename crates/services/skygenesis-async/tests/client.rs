use std::time::Duration;

use serde_json::{Value, json};
use skygenesis_async::{
    Client, Config, ErrorKind, RequestOptions, SkyGenesisConfig, SkyGenesisError, Verb,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client {
    let config = SkyGenesisConfig::new()
        .with_api_base(server.uri())
        .with_api_key("sk-test");
    Client::with_config(config).unwrap()
}

fn auth_header(req: &wiremock::Request) -> String {
    req.headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

#[test]
fn empty_key_is_rejected_at_construction() {
    let err = Client::new("").unwrap_err();
    assert_eq!(err, SkyGenesisError::authentication("API key is required"));
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[tokio::test]
async fn key_reaches_the_wire_untrimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .mount(&server)
        .await;

    let config = SkyGenesisConfig::new()
        .with_api_base(server.uri())
        .with_api_key(" sk-test");
    let client = Client::with_config(config).unwrap();
    client.users().retrieve("u1").await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(auth_header(&received[0]), "Bearer  sk-test");
}

#[tokio::test]
async fn set_api_key_applies_to_next_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.users().retrieve("u1").await.unwrap();
    client.set_api_key("sk-rotated").unwrap();
    client.users().retrieve("u1").await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(auth_header(&received[0]), "Bearer sk-test");
    assert_eq!(auth_header(&received[1]), "Bearer sk-rotated");
}

#[tokio::test]
async fn set_api_key_rejects_empty_and_keeps_old_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.set_api_key("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);

    client.users().retrieve("u1").await.unwrap();
}

#[tokio::test]
async fn clones_share_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(header("authorization", "Bearer sk-shared"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let clone = client.clone();
    client.set_api_key("sk-shared").unwrap();

    clone.users().retrieve("u1").await.unwrap();
}

#[tokio::test]
async fn in_flight_call_keeps_its_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let options = RequestOptions::new();

    let (resp, ()) = tokio::join!(
        client.request::<(), Value>(Verb::Get, "/slow", None, &options),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            client.set_api_key("sk-new").unwrap();
        }
    );
    assert_eq!(resp.unwrap(), json!({"ok": true}));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(auth_header(&received[0]), "Bearer sk-test");
    assert_eq!(
        client.config().headers().unwrap().get("authorization").unwrap(),
        "Bearer sk-new"
    );
}

#[tokio::test]
async fn set_timeout_applies_to_next_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let config = SkyGenesisConfig::new()
        .with_api_base(server.uri())
        .with_api_key("sk-test")
        .with_max_network_retries(0);
    let client = Client::with_config(config).unwrap();

    let ok: Value = client
        .request::<(), _>(Verb::Get, "/slow", None, &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(ok, json!({"ok": true}));

    client.set_timeout(Duration::from_millis(50));
    assert_eq!(client.config().timeout(), Duration::from_millis(50));

    let err = client
        .request::<(), Value>(Verb::Get, "/slow", None, &RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err, SkyGenesisError::network());
}
