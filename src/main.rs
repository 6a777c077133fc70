//! CloakVote deployer.
//!
//! Deploys the compiled contract, opens a 24 hour voting window and writes
//! the deployment record.
//!
//! ```text
//! CLOAKVOTE_PRIVATE_KEY, CLOAKVOTE_ACCOUNT_ADDRESS   (required)
//! CLOAKVOTE_RPC_URL                                   (default http://127.0.0.1:5050)
//! CLOAKVOTE_CONFIG                                    (default ./cloakvote.toml if present)
//! ```

use cloakvote_deployer::config::{env_lookup, resolve_config};
use cloakvote_deployer::lifecycle::startup;
use cloakvote_deployer::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(env_lookup);
    logging::init(
        config
            .as_ref()
            .map(|c| c.observability.log_level.as_str())
            .unwrap_or("info"),
    );

    let config = config.map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        e
    })?;

    tracing::info!(
        network = %config.network.name,
        rpc_url = %config.network.rpc_url,
        chain_id = config.network.chain_id,
        artifact = %config.deployment.artifact_path.display(),
        "Configuration loaded"
    );

    match startup::deploy(&config, env_lookup).await {
        Ok(record) => {
            tracing::info!(
                contract_address = %record.contract_address,
                start_time = ?record.start_time,
                end_time = ?record.end_time,
                record = %config.deployment.record_path.display(),
                "Deployment complete"
            );
            Ok(())
        }
        Err(e) => {
            match e.orphaned_contract() {
                Some(contract_address) => tracing::error!(
                    contract_address = %contract_address,
                    error = %e,
                    "Deployment failed with the contract already on-chain"
                ),
                None => tracing::error!(error = %e, "Deployment failed"),
            }
            Err(e.into())
        }
    }
}
