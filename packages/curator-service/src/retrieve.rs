use serde::Serialize;

use crate::{CuratorService, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
	pub id: usize,
	pub source: String,
	pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResult {
	pub chunk: Chunk,
	pub distance: f32,
}

impl CuratorService {
	pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievalResult>> {
		if k == 0 || self.corpus.is_empty() {
			return Ok(Vec::new());
		}

		let query_vec = self.embed_query(query).await?;
		let neighbors = self.corpus.index().search(&query_vec, k)?;
		let mut results = Vec::with_capacity(neighbors.len());

		for neighbor in neighbors {
			let record = self.corpus.chunk(neighbor.position).ok_or_else(|| Error::Storage {
				message: format!("Index position {} has no chunk metadata.", neighbor.position),
			})?;

			results.push(RetrievalResult {
				chunk: Chunk {
					id: neighbor.position,
					source: record.source.clone(),
					text: record.text.clone(),
				},
				distance: neighbor.distance,
			});
		}

		tracing::debug!(k, retrieved = results.len(), "Retrieved nearest chunks.");

		Ok(results)
	}

	async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
		let cfg = &self.cfg.providers.embedding;
		let texts = vec![query.to_string()];
		let mut vectors = self.providers.embedding.embed(cfg, &texts).await?;

		if vectors.len() != 1 {
			return Err(Error::Provider {
				message: format!(
					"Embedding provider returned {} vectors for one query.",
					vectors.len()
				),
			});
		}

		let vector = vectors.remove(0);

		if vector.len() != cfg.dimensions as usize {
			return Err(Error::Provider {
				message: format!(
					"Embedding provider returned dimension {} but {} is configured.",
					vector.len(),
					cfg.dimensions
				),
			});
		}

		Ok(vector)
	}
}
