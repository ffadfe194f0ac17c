use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use curator_api::{routes, state::AppState};
use curator_service::{CuratorService, EmbeddingProvider, Providers};
use curator_storage::{ChunkRecord, CorpusIndex, VectorIndex};
use curator_testkit::{
	FailingEmbedding, HashEmbedding, OverlapRerank, ScriptedGeneration, TEST_DIMENSIONS, TempDir,
};

const FORMATTED_REPLY: &str = "1 Concise Answer: Aspirin.\n2 Context: Aspirin is an analgesic.";

fn app(dir: &TempDir, embedding: Arc<dyn EmbeddingProvider>) -> Router {
	let cfg = curator_testkit::test_config(&dir.path().join("docs"), &dir.path().join("index"));
	let version = curator_config::embedding_version(&cfg.providers.embedding);
	let text = "Aspirin reduces fever.";
	let index = VectorIndex::from_vectors(
		TEST_DIMENSIONS as usize,
		vec![HashEmbedding::vector(text, TEST_DIMENSIONS as usize)],
	)
	.expect("Failed to build index.");
	let corpus = CorpusIndex::new(
		version,
		index,
		vec![ChunkRecord { source: "doc1".to_string(), text: text.to_string() }],
	)
	.expect("Failed to build corpus.");
	let providers = Providers::new(
		embedding,
		Arc::new(OverlapRerank::default()),
		Arc::new(ScriptedGeneration::new(["Aspirin.", FORMATTED_REPLY])),
	);
	let service =
		CuratorService::with_providers(cfg, corpus, providers).expect("Failed to build service.");

	routes::router(AppState::from_service(service))
}

fn post_ask(body: &str) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri("/ask")
		.header("content-type", "application/json")
		.body(Body::from(body.to_string()))
		.expect("Failed to build request.")
}

async fn json_body(response: axum::response::Response) -> Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response.")
}

#[tokio::test]
async fn health_ok() {
	let dir = TempDir::new("curator_http").expect("Failed to create temp dir.");
	let request =
		Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request.");
	let response = app(&dir, Arc::new(HashEmbedding::default()))
		.oneshot(request)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn ask_returns_structured_answer() {
	let dir = TempDir::new("curator_http").expect("Failed to create temp dir.");
	let response = app(&dir, Arc::new(HashEmbedding::default()))
		.oneshot(post_ask(r#"{"query":"What reduces fever?"}"#))
		.await
		.expect("Failed to call /ask.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json["answer"]["concise"], "Aspirin.");
	assert_eq!(json["answer"]["context"], "Aspirin is an analgesic.");
	assert_eq!(json["answer"]["resources"][0]["name"], "doc1");
	assert_eq!(json["answer"]["resources"][0]["snippet"], "Aspirin reduces fever.");
}

#[tokio::test]
async fn missing_query_prompts_for_input() {
	let dir = TempDir::new("curator_http").expect("Failed to create temp dir.");
	let response = app(&dir, Arc::new(HashEmbedding::default()))
		.oneshot(post_ask("{}"))
		.await
		.expect("Failed to call /ask.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert!(json["answer"]["concise"].as_str().is_some_and(|text| text.contains("Please provide")));
	assert_eq!(json["answer"]["resources"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn embedding_outage_maps_to_bad_gateway() {
	let dir = TempDir::new("curator_http").expect("Failed to create temp dir.");
	let response = app(&dir, Arc::new(FailingEmbedding))
		.oneshot(post_ask(r#"{"query":"What reduces fever?"}"#))
		.await
		.expect("Failed to call /ask.");

	assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

	let json = json_body(response).await;

	assert_eq!(json["error_code"], "PROVIDER_UNAVAILABLE");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
	let dir = TempDir::new("curator_http").expect("Failed to create temp dir.");
	let response = app(&dir, Arc::new(HashEmbedding::default()))
		.oneshot(post_ask(r#"{"query":"#))
		.await
		.expect("Failed to call /ask.");

	assert!(response.status().is_client_error());
}
