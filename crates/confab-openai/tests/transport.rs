//! End-to-end transport behaviour against a mock HTTP server.

use futures_util::StreamExt;

use confab_core::{ChatStreamProvider, Message, StreamEvent};
use confab_openai::{ChatClient, ClientConfigBuilder};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ChatClient {
    let config = ClientConfigBuilder::new()
        .api_key("sk-test")
        .base_url(server.uri())
        .model("test-model")
        .build()
        .unwrap();
    ChatClient::new(config)
}

#[tokio::test]
async fn streamed_reply_decodes_in_order() {
    let server = MockServer::start().await;

    let body = "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n\
                data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n\
                data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n\
                data: [DONE]\n\n";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "stream": true,
            "messages": [{"role": "user", "content": "hi"}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let messages = vec![Message::user("hi")];
    let events: Vec<_> = client.stream_chat(&messages).collect().await;

    let texts: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            Ok(StreamEvent::Delta(t)) => Some(t.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["Hel", "lo"]);
    assert!(matches!(events.last(), Some(Ok(StreamEvent::Done))));
}

#[tokio::test]
async fn non_success_status_yields_one_error_and_no_deltas() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let messages = vec![Message::user("hi")];
    let events: Vec<_> = client.stream_chat(&messages).collect().await;

    assert_eq!(events.len(), 1);
    let err = events.into_iter().next().unwrap().unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn immediately_closed_body_is_an_empty_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("", "text/event-stream"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let messages = vec![Message::user("hi")];
    let events: Vec<_> = client.stream_chat(&messages).collect().await;

    // No deltas, no Done, no error: exhaustion is the consumer's signal.
    assert!(events.is_empty());
}

#[tokio::test]
async fn mid_stream_disconnect_surfaces_truncation() {
    let server = MockServer::start().await;

    // A body that ends after one delta, without the [DONE] sentinel.
    let body = "data: {\"choices\":[{\"delta\":{\"content\":\"par\"}}]}\n\n";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let messages = vec![Message::user("hi")];
    let events: Vec<_> = client.stream_chat(&messages).collect().await;

    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Ok(StreamEvent::Delta(ref t)) if t == "par"));
    assert!(matches!(
        events[1],
        Err(confab_core::ChatError::Truncated)
    ));
}
