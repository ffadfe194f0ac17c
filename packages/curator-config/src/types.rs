use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	#[serde(default)]
	pub chunking: Chunking,
	#[serde(default)]
	pub retrieval: Retrieval,
	#[serde(default)]
	pub prompt: Prompt,
	#[serde(default)]
	pub answer: Answer,
	pub providers: Providers,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Corpus {
	/// Directory holding the source documents. Missing or empty means an empty corpus.
	pub source_dir: PathBuf,
	/// Directory holding the paired index artifacts.
	pub index_dir: PathBuf,
	#[serde(default = "default_extensions")]
	pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Chunking {
	/// Window size in whitespace-delimited words.
	pub chunk_size: u32,
	/// Words shared between consecutive windows. Must stay below `chunk_size`.
	pub overlap: u32,
}
impl Default for Chunking {
	fn default() -> Self {
		Self { chunk_size: 500, overlap: 50 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Retrieval {
	pub top_k: u32,
}
impl Default for Retrieval {
	fn default() -> Self {
		Self { top_k: 10 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Prompt {
	pub max_contexts: u32,
	/// Optional. Replaces the built-in grounding instruction.
	pub instruction: Option<String>,
}
impl Default for Prompt {
	fn default() -> Self {
		Self { max_contexts: 50, instruction: None }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Answer {
	pub max_resources: u32,
	pub snippet_chars: u32,
}
impl Default for Answer {
	fn default() -> Self {
		Self { max_resources: 5, snippet_chars: 200 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub rerank: ProviderConfig,
	pub llm: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	#[serde(default = "default_batch_size")]
	pub batch_size: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

fn default_extensions() -> Vec<String> {
	vec!["pdf".to_string(), "txt".to_string(), "md".to_string()]
}

fn default_batch_size() -> u32 {
	64
}
