use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = curator_ask::Args::parse();

	curator_ask::run(args).await
}
