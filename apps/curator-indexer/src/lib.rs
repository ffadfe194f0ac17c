use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use curator_service::{Providers, ingest};

#[derive(Debug, Parser)]
#[command(
	version = curator_cli::VERSION,
	rename_all = "kebab",
	styles = curator_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = curator_config::load(&args.config)?;

	init_tracing(&config);

	tracing::info!(
		source_dir = %config.corpus.source_dir.display(),
		index_dir = %config.corpus.index_dir.display(),
		"Building index."
	);

	let report = ingest::build_index(&config, &Providers::default()).await?;

	for skipped in &report.skipped {
		tracing::warn!(path = %skipped.path.display(), reason = skipped.reason.as_str(), "Skipped.");
	}

	tracing::info!(
		documents = report.documents,
		skipped = report.skipped.len(),
		chunks = report.chunks,
		"Index build finished."
	);

	Ok(())
}

fn init_tracing(config: &curator_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
