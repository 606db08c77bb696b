use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

use prism_domain::Leaning;
use prism_service::{Creation, PrismService, ResolutionWorkflow, SubmitOutcome};

#[derive(Debug, Parser)]
#[command(
	version = prism_cli::VERSION,
	rename_all = "kebab",
	styles = prism_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// List analyzed topics, most recent first.
	List,
	/// Show one topic with its per-leaning summaries.
	Show { id: String },
	/// Resolve a query against existing topics, creating a new analysis if needed.
	Resolve {
		query: String,
		/// Reuse this candidate id when the query needs a decision.
		#[arg(long, value_name = "ID", conflicts_with = "force_new")]
		reuse: Option<String>,
		/// Start a new analysis even when candidates exist.
		#[arg(long)]
		force_new: bool,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = prism_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let service = Arc::new(PrismService::new(config));

	match args.command {
		Command::List => list(service).await,
		Command::Show { id } => show(service, &id).await,
		Command::Resolve { query, reuse, force_new } =>
			resolve(service, &query, reuse, force_new).await,
	}
}

async fn list(service: Arc<PrismService>) -> color_eyre::Result<()> {
	let mut workflow = ResolutionWorkflow::new(service);

	workflow.refresh_topics().await?;

	if workflow.topics().is_empty() {
		println!("No analyzed topics yet.");

		return Ok(());
	}

	for topic in workflow.topics() {
		println!("{}  {}  ({} items)", topic.id, topic.query, topic.item_count);
	}

	Ok(())
}

async fn show(service: Arc<PrismService>, id: &str) -> color_eyre::Result<()> {
	let topic = service.fetch_topic(id).await?;
	let analyzed = topic.created_at.format(&Rfc3339).map_err(|err| eyre::eyre!(err))?;

	println!("{}  {}", topic.id, topic.query);
	println!("analyzed {analyzed}  ({} items)", topic.items.len());

	for leaning in Leaning::ALL {
		match topic.summaries.get(leaning) {
			Some(summary) => println!("[{}] {summary}", leaning.label()),
			None => println!("[{}] (pending)", leaning.label()),
		}
	}

	Ok(())
}

async fn resolve(
	service: Arc<PrismService>,
	query: &str,
	reuse: Option<String>,
	force_new: bool,
) -> color_eyre::Result<()> {
	let mut workflow = ResolutionWorkflow::new(service);

	match workflow.submit(query).await? {
		SubmitOutcome::Created(creation) => report_creation(&creation),
		SubmitOutcome::Decision { exact, similar } =>
			if let Some(id) = reuse {
				let resolution = workflow.choose_existing(&id)?;

				println!("Reusing existing topic {}.", resolution.id);
			} else if force_new {
				let creation = workflow.create_new_anyway().await?;

				report_creation(&creation);
			} else {
				if let Some(exact) = &exact {
					println!("exact match: {}  {}", exact.id, exact.query);
				}
				for candidate in &similar {
					println!("similar: {}  {}", candidate.id, candidate.query);
				}

				workflow.dismiss();
				println!("Nothing was created. Re-run with --reuse <ID> or --force-new.");
			},
	}

	Ok(())
}

fn report_creation(creation: &Creation) {
	match creation {
		Creation::Complete(topic) =>
			println!("Created topic {} with {} items.", topic.id, topic.items.len()),
		Creation::DetailUnavailable { id, message } => println!(
			"Created topic {id}, but its content could not be loaded yet: {message}"
		),
	}
}
