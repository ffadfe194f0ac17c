use crate::RerankedResult;

pub const NOT_FOUND_REPLY: &str = "Not found in context.";

pub const DEFAULT_INSTRUCTION: &str = "You are a reliable assistant. Use the information provided to answer accurately and concisely. If you can't find a clear answer, say exactly: 'Not found in context.'";

const UNKNOWN_SOURCE: &str = "Unknown source";

pub fn compose(
	query: &str,
	reranked: &[RerankedResult],
	max_contexts: usize,
	instruction: Option<&str>,
) -> String {
	let context_block = reranked
		.iter()
		.take(max_contexts)
		.enumerate()
		.map(|(i, item)| {
			let source = match item.chunk.source.trim() {
				"" => UNKNOWN_SOURCE,
				source => source,
			};

			format!("Context {} (from {source}):\n{}", i + 1, item.chunk.text.trim())
		})
		.collect::<Vec<_>>()
		.join("\n\n");
	let instruction = instruction.unwrap_or(DEFAULT_INSTRUCTION);
	let prompt = format!(
		"{instruction}\n\n=== Context Information ===\n{context_block}\n\n=== User Question ===\n{query}\n\n=== Your Answer ==="
	);

	prompt.trim().to_string()
}
