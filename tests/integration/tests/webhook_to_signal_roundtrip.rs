//! Full webhook-to-Signal roundtrip over real sockets: a configured
//! endpoint is normalized, a webhook arrives, the poster is fetched, and the
//! annotated message lands on the mocked signal-cli-rest-api.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use httpmock::prelude::*;
use serde_json::json;

use herald_runtime::{
    build_bridge_router, normalize_send_url, parse_recipients, BridgeConfig, ServerState,
};

const POSTER_BYTES: &[u8] = b"integration-poster-bytes";

async fn spawn_bridge(signal_endpoint: &str) -> String {
    let config = BridgeConfig {
        bind: "127.0.0.1".to_string(),
        port: 0,
        send_url: normalize_send_url(signal_endpoint).expect("endpoint normalizes"),
        sender_number: "+15550001111".to_string(),
        recipients: parse_recipients("+15552223333, group.family").expect("recipients parse"),
    };
    let state = ServerState::new(config).expect("state builds");
    let app = build_bridge_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind bridge listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("bridge serves");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn approved_request_with_poster_reaches_signal() {
    let signal = MockServer::start_async().await;
    signal
        .mock_async(|when, then| {
            when.method(GET).path("/poster.jpg");
            then.status(200).body(POSTER_BYTES);
        })
        .await;
    let send_mock = signal
        .mock_async(|when, then| {
            when.method(POST).path("/v2/send").json_body(json!({
                "message": "✅ Media Automatically Approved - Foundation (2021)\n\nbob requested Foundation\n\n👤 Requested By: bob\n📋 Request Status: PROCESSING",
                "number": "+15550001111",
                "recipients": ["+15552223333", "group.family"],
                "base64_attachments": [BASE64_STANDARD.encode(POSTER_BYTES)],
            }));
            then.status(201).json_body(json!({ "timestamp": "1722800000" }));
        })
        .await;

    // Trailing slash and missing /v2/send suffix are both normalized away.
    let base_url = spawn_bridge(&format!("{}/", signal.base_url())).await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/webhook"))
        .json(&json!({
            "notification_type": "MEDIA_AUTO_APPROVED",
            "event": "Media Automatically Approved",
            "subject": "Foundation (2021)",
            "message": "bob requested Foundation",
            "image": signal.url("/poster.jpg"),
            "media": { "media_type": "tv", "status": "PROCESSING" },
            "request": { "requestedBy_username": "bob" },
        }))
        .send()
        .await
        .expect("webhook post succeeds");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await.expect("body reads"),
        "Notification sent to Signal"
    );
    send_mock.assert_async().await;
}

#[tokio::test]
async fn declined_request_without_image_stays_text_only() {
    let signal = MockServer::start_async().await;
    let send_mock = signal
        .mock_async(|when, then| {
            when.method(POST).path("/v2/send").json_body(json!({
                "message": "❌ Media Declined - The Room (2003)\n\nSorry, not this one.\n\n👤 Requested By: carol\n📋 Request Status: DECLINED",
                "number": "+15550001111",
                "recipients": ["+15552223333", "group.family"],
            }));
            then.status(201);
        })
        .await;

    let base_url = spawn_bridge(&signal.base_url()).await;
    let response = reqwest::Client::new()
        .post(format!("{base_url}/webhook"))
        .json(&json!({
            "event": "Media Declined",
            "subject": "The Room (2003)",
            "message": "Sorry, not this one.",
            "media": { "status": "DECLINED" },
            "request": { "requestedBy_username": "carol" },
        }))
        .send()
        .await
        .expect("webhook post succeeds");

    assert_eq!(response.status(), 200);
    send_mock.assert_async().await;
}

#[tokio::test]
async fn health_follows_the_signal_about_probe() {
    let signal = MockServer::start_async().await;
    let about_mock = signal
        .mock_async(|when, then| {
            when.method(GET).path("/v1/about");
            then.status(200).json_body(json!({ "versions": ["v1", "v2"] }));
        })
        .await;

    let base_url = spawn_bridge(&signal.base_url()).await;
    let client = reqwest::Client::new();

    let healthy = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("health get succeeds");
    assert_eq!(healthy.status(), 200);
    about_mock.assert_async().await;

    about_mock.delete_async().await;
    signal
        .mock_async(|when, then| {
            when.method(GET).path("/v1/about");
            then.status(503);
        })
        .await;

    let unhealthy = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("health get succeeds");
    assert_eq!(unhealthy.status(), 500);
}
