use serde::{Deserialize, Serialize};

use crate::{CuratorService, Result, StructuredAnswer, answer, prompt};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequest {
	#[serde(default)]
	pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
	pub answer: StructuredAnswer,
}

impl CuratorService {
	pub async fn ask(&self, req: AskRequest) -> Result<AskResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Ok(AskResponse { answer: StructuredAnswer::prompt_for_input() });
		}

		let top_k = self.cfg.retrieval.top_k as usize;
		let results = self.retrieve(query, top_k).await?;

		tracing::info!(retrieved = results.len(), "Retrieved candidates.");

		let candidates = results.into_iter().map(|result| result.chunk).collect();
		let reranked = self.rerank(query, candidates).await?;

		tracing::info!(reranked = reranked.len(), "Reranked candidates.");

		let prompt = prompt::compose(
			query,
			&reranked,
			self.cfg.prompt.max_contexts as usize,
			self.cfg.prompt.instruction.as_deref(),
		);

		tracing::debug!(prompt_chars = prompt.chars().count(), "Composed grounding prompt.");

		let answer =
			answer::resolve(&self.generator(), query, &prompt, &reranked, &self.cfg.answer).await;

		Ok(AskResponse { answer })
	}
}
