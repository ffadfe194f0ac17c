use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Generator, RerankedResult};

pub const EMPTY_QUERY_MESSAGE: &str = "⚠️ Please provide a question.";
pub const NO_ANSWER_MESSAGE: &str = "⚠️ No answer returned by the generator.";
pub const FALLBACK_CONTEXT_MESSAGE: &str = "Using the retrieved sources below as fallback context.";
pub const UNKNOWN_RESOURCE_NAME: &str = "Unknown";

pub const CONCISE_LABEL: &str = "1 Concise Answer:";
pub const CONTEXT_LABEL: &str = "2 Context:";

// Line-start labels only, with optional numbering and bold: "2 Context:", "2️⃣ Context:",
// "**2. Context:**", "Context:".
static CONTEXT_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(r"(?m)^[ \t]*\**(?:2\S*[ \t]*)?\**(?i:context)\**:\**").ok()
});
static CONCISE_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(r"(?m)^[ \t]*\**(?:1\S*[ \t]*)?\**(?i:concise answer)\**:\**[ \t]*").ok()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
	pub name: String,
	pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAnswer {
	pub concise: String,
	pub context: String,
	pub resources: Vec<Resource>,
}
impl StructuredAnswer {
	pub fn prompt_for_input() -> Self {
		Self {
			concise: EMPTY_QUERY_MESSAGE.to_string(),
			context: String::new(),
			resources: Vec::new(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
	Split,
	SingleSegment,
	Fallback,
}

pub async fn resolve(
	generator: &Generator<'_>,
	query: &str,
	prompt: &str,
	reranked: &[RerankedResult],
	cfg: &curator_config::Answer,
) -> StructuredAnswer {
	let draft = generator.generate(prompt).await;

	tracing::debug!(draft_chars = draft.chars().count(), "Draft answer received.");

	let formatted = generator.generate(&format_prompt(query, &draft)).await;
	let (concise, context, outcome) = parse_formatted(&formatted);

	tracing::debug!(?outcome, "Parsed formatted answer.");

	StructuredAnswer {
		concise,
		context,
		resources: resources(reranked, cfg.max_resources as usize, cfg.snippet_chars as usize),
	}
}

pub fn format_prompt(query: &str, draft: &str) -> String {
	format!(
		"You are a concise assistant. Rewrite the base answer using exactly these two labels:\n\
		 {CONCISE_LABEL} a 2-3 line summary.\n\
		 {CONTEXT_LABEL} a deeper explanation.\n\
		 Use only information from the base answer.\n\
		 Question: {query}\n\
		 Base Info: {draft}"
	)
}

pub fn parse_formatted(formatted: &str) -> (String, String, ParseOutcome) {
	if formatted.trim().is_empty() {
		return (
			NO_ANSWER_MESSAGE.to_string(),
			FALLBACK_CONTEXT_MESSAGE.to_string(),
			ParseOutcome::Fallback,
		);
	}

	let Some(marker) = CONTEXT_MARKER.as_ref().and_then(|re| re.find(formatted)) else {
		return (formatted.trim().to_string(), String::new(), ParseOutcome::SingleSegment);
	};
	let head = &formatted[..marker.start()];
	let concise = match CONCISE_MARKER.as_ref() {
		Some(re) => re.replace_all(head, "").trim().to_string(),
		None => head.trim().to_string(),
	};

	if concise.is_empty() {
		return (formatted.trim().to_string(), String::new(), ParseOutcome::SingleSegment);
	}

	let context = formatted[marker.end()..].trim().to_string();

	(concise, context, ParseOutcome::Split)
}

pub fn resources(
	reranked: &[RerankedResult],
	max_resources: usize,
	snippet_chars: usize,
) -> Vec<Resource> {
	reranked
		.iter()
		.take(max_resources)
		.map(|item| {
			let name = match item.chunk.source.trim() {
				"" => UNKNOWN_RESOURCE_NAME.to_string(),
				source => source.to_string(),
			};

			Resource { name, snippet: item.chunk.text.chars().take(snippet_chars).collect() }
		})
		.collect()
}
