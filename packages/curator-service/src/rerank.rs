use std::cmp::Ordering;

use serde::Serialize;

use crate::{Chunk, CuratorService, Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RerankedResult {
	pub chunk: Chunk,
	pub relevance_score: f32,
}

impl CuratorService {
	pub async fn rerank(&self, query: &str, candidates: Vec<Chunk>) -> Result<Vec<RerankedResult>> {
		if candidates.is_empty() {
			return Ok(Vec::new());
		}

		let docs: Vec<String> = candidates.iter().map(|chunk| chunk.text.clone()).collect();
		let scores =
			self.providers.rerank.rerank(&self.cfg.providers.rerank, query, &docs).await?;
		let reranked = order_by_relevance(candidates, scores)?;

		tracing::debug!(reranked = reranked.len(), "Reranked candidates.");

		Ok(reranked)
	}
}

pub fn order_by_relevance(candidates: Vec<Chunk>, scores: Vec<f32>) -> Result<Vec<RerankedResult>> {
	if scores.len() != candidates.len() {
		return Err(Error::Provider {
			message: format!(
				"Rerank provider returned {} scores for {} candidates.",
				scores.len(),
				candidates.len()
			),
		});
	}

	let mut reranked: Vec<RerankedResult> = candidates
		.into_iter()
		.zip(scores)
		.map(|(chunk, relevance_score)| RerankedResult { chunk, relevance_score })
		.collect();

	reranked.sort_by(|a, b| cmp_f32_desc(a.relevance_score, b.relevance_score));

	Ok(reranked)
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chunk(id: usize) -> Chunk {
		Chunk { id, source: format!("doc{id}"), text: format!("text {id}") }
	}

	fn ids(reranked: &[RerankedResult]) -> Vec<usize> {
		reranked.iter().map(|item| item.chunk.id).collect()
	}

	#[test]
	fn sorts_by_descending_score() {
		let reranked = order_by_relevance(vec![chunk(0), chunk(1), chunk(2)], vec![0.1, 0.9, 0.5])
			.expect("order failed");

		assert_eq!(ids(&reranked), vec![1, 2, 0]);
	}

	#[test]
	fn ties_keep_retrieval_order() {
		let reranked = order_by_relevance(
			vec![chunk(7), chunk(3), chunk(5), chunk(1)],
			vec![0.5, 0.8, 0.5, 0.5],
		)
		.expect("order failed");

		assert_eq!(ids(&reranked), vec![3, 7, 5, 1]);
	}

	#[test]
	fn nan_scores_sink_to_the_end() {
		let reranked = order_by_relevance(vec![chunk(0), chunk(1)], vec![f32::NAN, -3.0])
			.expect("order failed");

		assert_eq!(ids(&reranked), vec![1, 0]);
	}

	#[test]
	fn output_is_a_permutation_of_input() {
		let candidates: Vec<Chunk> = (0..6).map(chunk).collect();
		let reranked =
			order_by_relevance(candidates.clone(), vec![0.3, -1.0, 2.0, 0.3, 9.0, 0.0])
				.expect("order failed");
		let mut out: Vec<Chunk> = reranked.into_iter().map(|item| item.chunk).collect();

		out.sort_by_key(|chunk| chunk.id);

		assert_eq!(out, candidates);
	}

	#[test]
	fn score_count_mismatch_is_a_provider_error() {
		let err = order_by_relevance(vec![chunk(0), chunk(1)], vec![0.4])
			.expect_err("Expected mismatch error.");

		assert!(matches!(err, Error::Provider { .. }));
	}
}
