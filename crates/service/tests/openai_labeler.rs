//! OpenAI-compatible labeling backend against a mock chat-completions endpoint.

use configs::LabelingConfig;
use service::labeling::{ImageLabeler, LabelingError, OpenAiImageLabeler};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

fn write_image(dir: &tempfile::TempDir, name: &str) {
    std::fs::write(dir.path().join(name), JPEG_BYTES).expect("write test image");
}

fn labeler_for(server: &MockServer, dir: &tempfile::TempDir) -> OpenAiImageLabeler {
    let cfg = LabelingConfig {
        base_url: server.uri(),
        image_root: dir.path().to_string_lossy().into_owned(),
        ..LabelingConfig::default()
    };
    OpenAiImageLabeler::new(&cfg, "test-key").expect("Failed to create labeler")
}

#[tokio::test]
async fn test_label_image_returns_first_choice() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_image(&dir, "car.jpg");

    let chat_response = serde_json::json!({
        "id": "chatcmpl-123",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "  A red car parked on a street. " },
            "finish_reason": "stop"
        }]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "max_completion_tokens": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&chat_response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let label = labeler_for(&mock_server, &dir).label_image("car.jpg").await;
    assert_eq!(label.unwrap(), "A red car parked on a street.");
}

#[tokio::test]
async fn test_request_carries_prompt_and_data_url() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_image(&dir, "car.jpg");

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "content": "A car." } }]
        })))
        .mount(&mock_server)
        .await;

    labeler_for(&mock_server, &dir).label_image("car.jpg").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let content = &body["messages"][0]["content"];
    assert_eq!(content[0]["text"], configs::DEFAULT_LABELING_PROMPT);
    let url = content[1]["image_url"]["url"].as_str().unwrap();
    assert!(url.starts_with("data:image/jpeg;base64,"), "unexpected url {url}");
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_image(&dir, "car.jpg");

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&mock_server)
        .await;

    let err = labeler_for(&mock_server, &dir).label_image("car.jpg").await.unwrap_err();
    match err {
        LabelingError::Api(status, message) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_an_error() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_image(&dir, "car.jpg");

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let err = labeler_for(&mock_server, &dir).label_image("car.jpg").await.unwrap_err();
    assert!(matches!(err, LabelingError::EmptyResponse));
}

#[tokio::test]
async fn test_unreadable_image_skips_the_api() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = labeler_for(&mock_server, &dir).label_image("missing.jpg").await.unwrap_err();
    assert!(matches!(err, LabelingError::ImageRead { .. }));
}
