use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = curator_indexer::Args::parse();

	curator_indexer::run(args).await
}
