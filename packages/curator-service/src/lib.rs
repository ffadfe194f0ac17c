pub mod answer;
pub mod ask;
pub mod extract;
pub mod generation;
pub mod ingest;
pub mod prompt;
pub mod rerank;
pub mod retrieve;

mod error;

pub use answer::{Resource, StructuredAnswer};
pub use ask::{AskRequest, AskResponse};
pub use error::{Error, Result};
pub use generation::Generator;
pub use ingest::{IngestReport, SkippedDocument};
pub use rerank::RerankedResult;
pub use retrieve::{Chunk, RetrievalResult};

use std::{future::Future, pin::Pin, sync::Arc};

use curator_config::{Config, EmbeddingProviderConfig, LlmProviderConfig, ProviderConfig};
use curator_providers::{embedding, generation as llm, rerank as rerank_api};
use curator_storage::CorpusIndex;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, curator_providers::Result<Vec<Vec<f32>>>>;
}

pub trait RerankProvider
where
	Self: Send + Sync,
{
	fn rerank<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		docs: &'a [String],
	) -> BoxFuture<'a, curator_providers::Result<Vec<f32>>>;
}

pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, curator_providers::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub rerank: Arc<dyn RerankProvider>,
	pub generation: Arc<dyn GenerationProvider>,
}

pub struct CuratorService {
	pub cfg: Config,
	pub corpus: CorpusIndex,
	pub providers: Providers,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, curator_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl RerankProvider for DefaultProviders {
	fn rerank<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		docs: &'a [String],
	) -> BoxFuture<'a, curator_providers::Result<Vec<f32>>> {
		Box::pin(rerank_api::rerank(cfg, query, docs))
	}
}

impl GenerationProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, curator_providers::Result<String>> {
		Box::pin(llm::generate(cfg, prompt))
	}
}

impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		rerank: Arc<dyn RerankProvider>,
		generation: Arc<dyn GenerationProvider>,
	) -> Self {
		Self { embedding, rerank, generation }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), rerank: provider.clone(), generation: provider }
	}
}

impl CuratorService {
	pub fn open(cfg: Config) -> Result<Self> {
		let corpus = CorpusIndex::load(&cfg.corpus.index_dir)?;

		Self::with_providers(cfg, corpus, Providers::default())
	}

	pub fn new(cfg: Config, corpus: CorpusIndex) -> Result<Self> {
		Self::with_providers(cfg, corpus, Providers::default())
	}

	pub fn with_providers(cfg: Config, corpus: CorpusIndex, providers: Providers) -> Result<Self> {
		let expected = curator_config::embedding_version(&cfg.providers.embedding);

		if corpus.header().embedding_version != expected {
			return Err(Error::Configuration {
				message: format!(
					"Index was built with embedding {:?} but the configured embedding is {:?}; rebuild the index.",
					corpus.header().embedding_version,
					expected
				),
			});
		}
		if corpus.index().dimension() != cfg.providers.embedding.dimensions as usize {
			return Err(Error::Configuration {
				message: format!(
					"Index dimension {} does not match providers.embedding.dimensions {}.",
					corpus.index().dimension(),
					cfg.providers.embedding.dimensions
				),
			});
		}

		Ok(Self { cfg, corpus, providers })
	}

	pub fn generator(&self) -> Generator<'_> {
		Generator::new(self.providers.generation.as_ref(), &self.cfg.providers.llm)
	}
}
