use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cloakvote_deployer::config::{env_lookup, resolve_config, CloakVoteConfig};
use cloakvote_deployer::lifecycle::startup;
use cloakvote_deployer::observability::logging;
use cloakvote_deployer::workflow::{JsonFileStore, RecordStore, VoteInvocation};

#[derive(Parser)]
#[command(name = "cloakvote-cli")]
#[command(about = "Interact with a deployed CloakVote contract", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a single vote
    Vote {
        /// Contract address; defaults to the one in the deployment record
        #[arg(short, long)]
        contract: Option<String>,

        /// Voter identifier
        #[arg(long)]
        voter: u64,

        /// Ballot choice
        #[arg(long)]
        choice: u64,

        /// Identity provider configuration
        #[arg(short, long)]
        identity: Option<PathBuf>,
    },
    /// Print the current deployment record
    Record,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(env_lookup);
    logging::init(
        config
            .as_ref()
            .map(|c| c.observability.log_level.as_str())
            .unwrap_or("info"),
    );
    let config: CloakVoteConfig = config?;

    match cli.command {
        Commands::Vote {
            contract,
            voter,
            choice,
            identity,
        } => {
            let identity = identity.unwrap_or_else(|| config.identity.config_path.clone());
            let invocation = VoteInvocation {
                voter_id: voter,
                choice,
            };
            let receipt = startup::vote(
                &config,
                &identity,
                contract.as_deref(),
                invocation,
                env_lookup,
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Vote failed");
                e
            })?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Commands::Record => {
            let store = JsonFileStore::new(config.deployment.record_path.clone());
            let record = store.load().await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
