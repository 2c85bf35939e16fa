mod common;

use formpilot_embed::openai::OpenAiEmbedder;
use formpilot_embed::Embedder;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "text-embedding-3-small";

#[tokio::test]
async fn embeds_with_bearer_auth() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": MODEL })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{ "object": "embedding", "index": 0, "embedding": [0.5, -0.5] }],
            "model": MODEL,
        })))
        .mount(&server)
        .await;

    let embedder = OpenAiEmbedder::new(server.uri(), "sk-test".to_string(), MODEL.to_string())
        .expect("client builds");

    let vector = embedder.embed("Birth Date").await.unwrap();
    assert_eq!(vector, vec![0.5, -0.5]);
}

#[tokio::test]
async fn http_error_surfaces_as_embedder_error() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let embedder =
        OpenAiEmbedder::new(server.uri(), "sk-test".to_string(), MODEL.to_string()).unwrap();

    let err = embedder.embed("anything").await.err().unwrap();
    assert!(err.to_string().contains("429"));
}
