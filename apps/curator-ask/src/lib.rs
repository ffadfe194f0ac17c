use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use curator_service::{AskRequest, CuratorService, StructuredAnswer};

pub const SAMPLE_QUESTIONS: [&str; 3] = [
	"What is keratoderma with woolly hair?",
	"Is keratoderma with woolly hair inherited?",
	"What are the treatments for keratoderma with woolly hair?",
];

const SOURCE_SNIPPET_CHARS: usize = 80;

#[derive(Debug, Parser)]
#[command(
	version = curator_cli::VERSION,
	rename_all = "kebab",
	styles = curator_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Word budget for the printed concise answer.
	#[arg(long, value_name = "N", default_value_t = 100)]
	pub max_words: usize,
	/// Defaults to the first sample question.
	#[arg(value_name = "QUESTION")]
	pub question: Option<String>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = curator_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let service = CuratorService::open(config)?;
	let query = match args.question.as_deref().map(str::trim) {
		Some(question) if !question.is_empty() => question.to_string(),
		_ => {
			tracing::info!("No question given; using sample question 1.");

			SAMPLE_QUESTIONS[0].to_string()
		},
	};
	let response = service.ask(AskRequest { query: query.clone() }).await?;

	print!("{}", render(&query, &response.answer, args.max_words));

	Ok(())
}

pub fn render(query: &str, answer: &StructuredAnswer, max_words: usize) -> String {
	let mut out = format!("Question: {query}\n\n--- Answer (truncated) ---\n\n");

	out.push_str(&truncate_words(&answer.concise, max_words));
	out.push('\n');

	if !answer.context.is_empty() {
		out.push_str("\n--- Context ---\n\n");
		out.push_str(&answer.context);
		out.push('\n');
	}

	out.push_str("\nSources:\n");

	for (i, resource) in answer.resources.iter().enumerate() {
		let snippet = flatten(&resource.snippet);

		out.push_str(&format!("{}. {}\n   {snippet}...\n\n", i + 1, resource.name));
	}

	out
}

pub fn truncate_words(text: &str, max_words: usize) -> String {
	let words: Vec<&str> = text.split_whitespace().collect();

	if words.len() <= max_words {
		return words.join(" ");
	}

	format!("{}...", words[..max_words].join(" "))
}

fn flatten(snippet: &str) -> String {
	snippet.chars().take(SOURCE_SNIPPET_CHARS).map(|c| if c == '\n' { ' ' } else { c }).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use curator_service::Resource;

	#[test]
	fn truncation_marks_cut_answers() {
		assert_eq!(truncate_words("one two three four", 2), "one two...");
		assert_eq!(truncate_words("one  two\nthree", 3), "one two three");
		assert_eq!(truncate_words("", 5), "");
	}

	#[test]
	fn render_lists_sources_with_flattened_snippets() {
		let answer = StructuredAnswer {
			concise: "Aspirin.".to_string(),
			context: "Aspirin is an analgesic.".to_string(),
			resources: vec![Resource {
				name: "doc1".to_string(),
				snippet: format!("line one\nline two {}", "x".repeat(100)),
			}],
		};
		let out = render("What reduces fever?", &answer, 100);

		assert!(out.contains("Aspirin.\n"));
		assert!(out.contains("--- Context ---\n\nAspirin is an analgesic.\n"));
		assert!(out.contains("1. doc1\n   line one line two "));

		let snippet_line = out.lines().find(|line| line.starts_with("   line one")).unwrap_or("");

		assert_eq!(snippet_line.trim_start().trim_end_matches("...").chars().count(), 80);
	}
}
