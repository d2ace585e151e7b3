/// End-to-end streaming tests: open the generation stream over HTTP and
/// aggregate its body through the channel-backed reader task
use httpmock::prelude::*;

use llm_console::{
    api::BackendClient,
    config::BackendConfig,
    error::ClientError,
    stream::GenerationStream,
};

fn backend_config(base_url: String) -> BackendConfig {
    BackendConfig {
        base_url,
        timeout_seconds: 5,
        default_model: None,
    }
}

#[tokio::test]
async fn test_stream_generate_aggregates_full_body() {
    let server = MockServer::start_async().await;
    let body = "Streaming complete text with non-ASCII: héllo 🦀";
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/llm/stream_generate");
            then.status(200)
                .header("content-type", "text/plain; charset=utf-8")
                .body(body);
        })
        .await;

    let client = BackendClient::new(&backend_config(server.base_url()));
    let response = client.stream_generate("deepseek", "hi").await.unwrap();

    let mut stream = GenerationStream::spawn(response);

    let mut updates = Vec::new();
    while let Some(update) = stream.updates.recv().await {
        updates.push(update);
    }
    let full = stream.finish().await.unwrap();

    mock.assert_async().await;
    assert_eq!(full, body);
    assert!(!updates.is_empty());
    // every update is a prefix of the final text, in growing order
    let mut previous_len = 0;
    for update in &updates {
        assert!(full.starts_with(update.as_str()));
        assert!(update.len() >= previous_len);
        previous_len = update.len();
    }
    assert_eq!(updates.last().map(String::as_str), Some(body));
}

#[tokio::test]
async fn test_stream_generate_rejected_before_any_fragment() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/llm/stream_generate");
            then.status(500).body("model crashed");
        })
        .await;

    let client = BackendClient::new(&backend_config(server.base_url()));
    let err = client.stream_generate("deepseek", "hi").await.unwrap_err();

    match err {
        ClientError::Backend { status, message } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(message, "model crashed");
        }
        other => panic!("expected Backend error, got {}", other),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_unavailable() {
    // Bind a port, then drop the listener so nothing is accepting on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = BackendClient::new(&backend_config(format!("http://127.0.0.1:{}", port)));
    let err = client.stream_generate("deepseek", "hi").await.unwrap_err();

    match err {
        ClientError::TransportUnavailable(_) => {}
        other => panic!("expected TransportUnavailable, got {}", other),
    }
}
