use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = prism_console::Args::parse();
	prism_console::run(args).await
}
