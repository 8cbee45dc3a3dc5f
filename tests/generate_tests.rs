use serde_json::json;
use survey_studio::config::GeneratorConfig;
use survey_studio::{OpenAiGenerator, QuestionGenerator, SurveyError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator_for(server: &MockServer) -> OpenAiGenerator {
    let config = GeneratorConfig::new("test-key", "test-model").with_api_base(server.uri());
    OpenAiGenerator::new(config).unwrap()
}

fn completion_with_content(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_generate_parses_question_array() {
    let server = MockServer::start().await;

    let content = r#"["How often do you exercise?", "What is your favorite sport?"]"#;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_with_content(content)))
        .expect(1)
        .mount(&server)
        .await;

    let questions = generator_for(&server).generate("fitness", 2).await.unwrap();
    assert_eq!(
        questions,
        vec!["How often do you exercise?".to_string(), "What is your favorite sport?".to_string()]
    );
}

#[tokio::test]
async fn test_generate_sends_count_in_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [{
                "role": "user",
                "content": "Generate 7 survey questions about coffee. \
                            Format the response as a JSON array of strings."
            }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_with_content(r#"["Q1"]"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    generator_for(&server).generate("coffee", 7).await.unwrap();
}

#[tokio::test]
async fn test_generate_returns_model_count_unchanged() {
    // Three questions back for a five-question request pass through as-is.
    let server = MockServer::start().await;

    let content = r#"["Q1", "Q2", "Q3"]"#;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_with_content(content)))
        .mount(&server)
        .await;

    let questions = generator_for(&server).generate("coffee", 5).await.unwrap();
    assert_eq!(questions.len(), 3);
}

#[tokio::test]
async fn test_generate_rejects_non_json_content() {
    let server = MockServer::start().await;

    let content = "Sure! Here are some questions:\n1. How often do you exercise?";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_with_content(content)))
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("fitness", 2).await.unwrap_err();
    assert!(matches!(err, SurveyError::InvalidGeneration(_)));
}

#[tokio::test]
async fn test_generate_rejects_non_array_json() {
    let server = MockServer::start().await;

    let content = r#"{"questions": ["Q1", "Q2"]}"#;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_with_content(content)))
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("fitness", 2).await.unwrap_err();
    assert!(matches!(err, SurveyError::InvalidGeneration(_)));
}

#[tokio::test]
async fn test_generate_surfaces_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "model overloaded"})),
        )
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("fitness", 2).await.unwrap_err();
    match err {
        SurveyError::Generation(msg) => {
            assert!(msg.contains("500"), "unexpected message: {msg}");
        }
        other => panic!("expected Generation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_empty_choices_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("fitness", 2).await.unwrap_err();
    match err {
        SurveyError::Generation(msg) => assert!(msg.contains("no content")),
        other => panic!("expected Generation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_null_content_is_an_error() {
    let server = MockServer::start().await;

    let body = json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
    });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("fitness", 2).await.unwrap_err();
    assert!(matches!(err, SurveyError::Generation(_)));
}
