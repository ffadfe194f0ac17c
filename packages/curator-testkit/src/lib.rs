mod error;

pub use error::{Error, Result};

use std::{
	collections::VecDeque,
	fs,
	path::{Path, PathBuf},
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use serde_json::Map;

use curator_config::{
	Answer, Chunking, Config, Corpus, EmbeddingProviderConfig, LlmProviderConfig, Prompt,
	ProviderConfig, Providers as ProviderConfigs, Retrieval, Service,
};
use curator_service::{BoxFuture, EmbeddingProvider, GenerationProvider, RerankProvider};

pub const TEST_DIMENSIONS: u32 = 64;

pub struct TempDir {
	inner: tempfile::TempDir,
}
impl TempDir {
	pub fn new(prefix: &str) -> Result<Self> {
		let inner = tempfile::Builder::new().prefix(&format!("{prefix}_")).tempdir()?;

		Ok(Self { inner })
	}

	pub fn path(&self) -> &Path {
		self.inner.path()
	}

	pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
		if Path::new(relative).is_absolute() {
			return Err(Error::Message(format!("Expected a relative path, got {relative:?}.")));
		}

		let path = self.path().join(relative);

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}

		fs::write(&path, contents)?;

		Ok(path)
	}
}

#[derive(Default)]
pub struct HashEmbedding {
	pub calls: Arc<AtomicUsize>,
}
impl HashEmbedding {
	pub fn vector(text: &str, dimension: usize) -> Vec<f32> {
		let mut vector = vec![0.0_f32; dimension];

		if dimension == 0 {
			return vector;
		}

		for word in words(text) {
			let digest = blake3::hash(word.as_bytes());
			let mut prefix = [0_u8; 8];

			prefix.copy_from_slice(&digest.as_bytes()[..8]);

			vector[(u64::from_le_bytes(prefix) % dimension as u64) as usize] += 1.0;
		}

		let norm = vector.iter().map(|value| value * value).sum::<f32>().sqrt();

		if norm > 0.0 {
			vector.iter_mut().for_each(|value| *value /= norm);
		}

		vector
	}
}
impl EmbeddingProvider for HashEmbedding {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, curator_providers::Result<Vec<Vec<f32>>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let dimension = cfg.dimensions as usize;
		let vectors = texts.iter().map(|text| Self::vector(text, dimension)).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

pub struct FailingEmbedding;
impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, curator_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			Err(curator_providers::Error::InvalidResponse {
				message: "Embedding backend unavailable.".to_string(),
			})
		})
	}
}

#[derive(Default)]
pub struct OverlapRerank {
	pub calls: Arc<AtomicUsize>,
}
impl RerankProvider for OverlapRerank {
	fn rerank<'a>(
		&'a self,
		_cfg: &'a ProviderConfig,
		query: &'a str,
		docs: &'a [String],
	) -> BoxFuture<'a, curator_providers::Result<Vec<f32>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let query_words = words(query);
		let scores = docs
			.iter()
			.map(|doc| {
				if query_words.is_empty() {
					return 0.0;
				}

				let doc_words = words(doc);
				let hits = query_words.iter().filter(|word| doc_words.contains(word)).count();

				hits as f32 / query_words.len() as f32
			})
			.collect();

		Box::pin(async move { Ok(scores) })
	}
}

#[derive(Default)]
pub struct ScriptedGeneration {
	replies: Mutex<VecDeque<String>>,
	prompts: Mutex<Vec<String>>,
	pub calls: Arc<AtomicUsize>,
}
impl ScriptedGeneration {
	pub fn new<I, S>(replies: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
			prompts: Mutex::new(Vec::new()),
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn prompts(&self) -> Vec<String> {
		self.prompts.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl GenerationProvider for ScriptedGeneration {
	fn generate<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, curator_providers::Result<String>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.prompts.lock().unwrap_or_else(|err| err.into_inner()).push(prompt.to_string());

		let reply = self
			.replies
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.pop_front()
			.unwrap_or_default();

		Box::pin(async move { Ok(reply) })
	}
}

pub struct FailingGeneration;
impl GenerationProvider for FailingGeneration {
	fn generate<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_prompt: &'a str,
	) -> BoxFuture<'a, curator_providers::Result<String>> {
		Box::pin(async move {
			Err(curator_providers::Error::InvalidResponse { message: "quota exceeded".to_string() })
		})
	}
}

pub struct PendingGeneration;
impl GenerationProvider for PendingGeneration {
	fn generate<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_prompt: &'a str,
	) -> BoxFuture<'a, curator_providers::Result<String>> {
		Box::pin(std::future::pending())
	}
}

pub fn test_config(source_dir: &Path, index_dir: &Path) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		corpus: Corpus {
			source_dir: source_dir.to_path_buf(),
			index_dir: index_dir.to_path_buf(),
			extensions: vec!["pdf".to_string(), "txt".to_string(), "md".to_string()],
		},
		chunking: Chunking { chunk_size: 8, overlap: 2 },
		retrieval: Retrieval::default(),
		prompt: Prompt::default(),
		answer: Answer::default(),
		providers: ProviderConfigs {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/embeddings".to_string(),
				model: "hash".to_string(),
				dimensions: TEST_DIMENSIONS,
				batch_size: 4,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			rerank: ProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/rerank".to_string(),
				model: "overlap".to_string(),
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			llm: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/chat/completions".to_string(),
				model: "scripted".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
	}
}

fn words(text: &str) -> Vec<String> {
	text.split(|c: char| !c.is_alphanumeric())
		.filter(|word| !word.is_empty())
		.map(str::to_lowercase)
		.collect()
}
