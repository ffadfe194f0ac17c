use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = curator_api::Args::parse();

	curator_api::run(args).await
}
