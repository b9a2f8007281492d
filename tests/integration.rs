use base64::Engine as _;
use gemini_console::{
    ai::{GenerationService, MockGenerationClient},
    app::{App, AppServices},
    attachment::ImageAttachment,
    models::{GenerationRequest, Role},
};
use pretty_assertions::assert_eq;
use std::io::Write as _;
use tokio::io::BufReader;

const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x42];

fn write_temp_png() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PNG_BYTES).unwrap();
    file.flush().unwrap();
    file
}

fn build_app(chat: MockGenerationClient, vision: MockGenerationClient) -> App {
    App::with_services(AppServices {
        chat: Box::new(chat),
        vision: Box::new(vision),
    })
}

#[tokio::test]
async fn test_full_chat_session_with_mocks() {
    let chat = MockGenerationClient::new()
        .with_response("The sky is blue.")
        .with_response("Because of Rayleigh scattering.");
    let mut app = build_app(chat.clone(), MockGenerationClient::new());

    let input = b"what color is the sky?\nwhy?\n/quit\n";
    let mut output = Vec::new();
    app.run_chat(BufReader::new(&input[..]), &mut output)
        .await
        .unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("gemini> The sky is blue."));
    assert!(printed.contains("gemini> Because of Rayleigh scattering."));

    // One request per submission, one reply per request.
    assert_eq!(chat.get_call_count(), 2);
    let messages = app.transcript().messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::System);
    assert_eq!(messages[2].role, Role::User);
    assert_eq!(messages[3].role, Role::System);
}

#[tokio::test]
async fn test_full_ask_flow_encodes_file_bytes() {
    let vision = MockGenerationClient::new().with_response("a test pattern");
    let app = build_app(MockGenerationClient::new(), vision.clone());

    let file = write_temp_png();
    let mut output = Vec::new();
    app.run_ask(
        "describe the attached image",
        &[file.path().to_path_buf()],
        &mut output,
    )
    .await
    .unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "a test pattern\n");

    let sent = vision.last_request().unwrap();
    assert_eq!(sent.prompt, "describe the attached image");
    assert_eq!(sent.attachments.len(), 1);
    assert_eq!(sent.attachments[0].mime_type, "image/png");

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&sent.attachments[0].data)
        .unwrap();
    assert_eq!(decoded, PNG_BYTES);
}

#[tokio::test]
async fn test_ask_without_images_makes_no_request() {
    let vision = MockGenerationClient::new();
    let app = build_app(MockGenerationClient::new(), vision.clone());

    let mut output = Vec::new();
    let result = app.run_ask("describe nothing", &[], &mut output).await;

    assert!(result.is_err());
    assert_eq!(vision.get_call_count(), 0);
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_failed_request_leaves_session_recoverable() {
    let chat = MockGenerationClient::new()
        .with_failure("upstream exploded")
        .with_response("all good now");
    let mut app = build_app(chat.clone(), MockGenerationClient::new());

    let input = b"first\nsecond\n/quit\n";
    let mut output = Vec::new();
    app.run_chat(BufReader::new(&input[..]), &mut output)
        .await
        .unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("request failed:"));
    assert!(printed.contains("gemini> all good now"));

    // The failed submission kept its user message and gained no reply.
    let messages = app.transcript().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content, "first");
    assert_eq!(messages[1].content, "second");
    assert_eq!(messages[2].content, "all good now");
}

#[tokio::test]
async fn test_same_file_encodes_concurrently_and_independently() {
    let file = write_temp_png();
    let paths = vec![file.path().to_path_buf(), file.path().to_path_buf()];

    let attachments = ImageAttachment::load_all(&paths).await.unwrap();
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments[0], attachments[1]);
    assert_eq!(attachments[0].data_uri(), attachments[1].data_uri());
}

#[tokio::test]
async fn test_mock_service_honors_request_shape() {
    let service = MockGenerationClient::new();

    let request = GenerationRequest::with_attachments(
        "caption these",
        vec![
            ImageAttachment {
                mime_type: "image/png".to_string(),
                data: "QQ==".to_string(),
            },
            ImageAttachment {
                mime_type: "image/jpeg".to_string(),
                data: "Qg==".to_string(),
            },
        ],
    );

    service.generate(&request).await.unwrap();

    let sent = service.last_request().unwrap();
    assert_eq!(sent.attachments.len(), 2);
    assert_eq!(sent.attachments[0].mime_type, "image/png");
    assert_eq!(sent.attachments[1].mime_type, "image/jpeg");
}
