use std::path::PathBuf;

use curator_chunking::ChunkingConfig;
use curator_config::Config;
use curator_storage::{ChunkRecord, CorpusIndex, VectorIndex};

use crate::{Error, Providers, Result, extract};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
	pub path: PathBuf,
	pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
	pub documents: usize,
	pub chunks: usize,
	pub skipped: Vec<SkippedDocument>,
}

pub async fn build_index(cfg: &Config, providers: &Providers) -> Result<IngestReport> {
	let (corpus, report) = build_corpus(cfg, providers).await?;

	corpus.write(&cfg.corpus.index_dir)?;

	Ok(report)
}

pub async fn build_corpus(cfg: &Config, providers: &Providers) -> Result<(CorpusIndex, IngestReport)> {
	let chunking = ChunkingConfig::new(cfg.chunking.chunk_size, cfg.chunking.overlap)?;
	let root = &cfg.corpus.source_dir;
	let mut report = IngestReport::default();
	let mut records = Vec::new();

	for path in extract::discover_documents(root, &cfg.corpus.extensions) {
		let text = match extract::extract_text(&path) {
			Ok(text) => text,
			Err(err) => {
				tracing::warn!(path = %path.display(), error = %err, "Skipping document.");

				report.skipped.push(SkippedDocument { path, reason: err.to_string() });

				continue;
			},
		};
		let source = extract::source_name(root, &path);
		let chunks = curator_chunking::split_words(&text, &chunking)?;

		tracing::info!(source = source.as_str(), chunks = chunks.len(), "Chunked document.");

		report.documents += 1;
		records.extend(chunks.into_iter().map(|text| ChunkRecord { source: source.clone(), text }));
	}

	let corpus = index_chunks(cfg, providers, records).await?;

	report.chunks = corpus.len();

	tracing::info!(
		documents = report.documents,
		skipped = report.skipped.len(),
		chunks = report.chunks,
		"Built corpus index."
	);

	Ok((corpus, report))
}

pub async fn index_chunks(
	cfg: &Config,
	providers: &Providers,
	records: Vec<ChunkRecord>,
) -> Result<CorpusIndex> {
	let embedding_cfg = &cfg.providers.embedding;
	let version = curator_config::embedding_version(embedding_cfg);
	let dimension = embedding_cfg.dimensions as usize;

	if records.is_empty() {
		return Ok(CorpusIndex::empty(version, dimension));
	}

	let mut index = VectorIndex::new(dimension);
	let batch_size = (embedding_cfg.batch_size as usize).max(1);

	for batch in records.chunks(batch_size) {
		let texts: Vec<String> = batch.iter().map(|record| record.text.clone()).collect();
		let vectors = providers.embedding.embed(embedding_cfg, &texts).await?;

		if vectors.len() != texts.len() {
			return Err(Error::Provider {
				message: format!(
					"Embedding provider returned {} vectors for {} chunks.",
					vectors.len(),
					texts.len()
				),
			});
		}

		for vector in vectors {
			if vector.len() != dimension || vector.iter().any(|value| !value.is_finite()) {
				return Err(Error::Provider {
					message: format!(
						"Embedding provider returned an invalid vector (dimension {}, expected {dimension}).",
						vector.len()
					),
				});
			}

			index.add(vector)?;
		}

		tracing::debug!(embedded = index.len(), total = records.len(), "Embedded chunk batch.");
	}

	Ok(CorpusIndex::new(version, index, records)?)
}
