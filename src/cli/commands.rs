use crate::cli::options::{Commands, DirectorCli};
use crate::cli::output::{print_deployment, print_instance_table, print_task};
use crate::config::{DirectorConfig, QueueBackend};
use crate::deploy::{DeploymentManager, DirectorError, Result};
use crate::queue::{HttpJobQueue, JobQueue, MemoryJobQueue};
use crate::store::{DeploymentRepository, MemoryRepository};
use crate::types::{CloudConfig, JobOptions, RuntimeConfig};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fold command line overrides into the loaded configuration.
pub fn apply_overrides(mut config: DirectorConfig, cli: &DirectorCli) -> Result<DirectorConfig> {
    if let Some(ref state_file) = cli.state_file {
        config.store.state_file = Some(state_file.clone());
    }
    if let Some(ref url) = cli.queue_url {
        config.queue.backend = QueueBackend::Http;
        config.queue.url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.queue.timeout_secs = timeout;
    }
    config.validate()?;
    Ok(config)
}

pub async fn build_manager(config: &DirectorConfig) -> Result<DeploymentManager> {
    let repository: Arc<dyn DeploymentRepository> = match config.store.state_file {
        Some(ref path) => Arc::new(MemoryRepository::load(path).await?),
        None => {
            warn!("No state file configured, starting with an empty repository");
            Arc::new(MemoryRepository::new())
        }
    };

    let queue: Arc<dyn JobQueue> = match config.queue.backend {
        QueueBackend::Memory => {
            debug!("Using in-process job queue");
            Arc::new(MemoryJobQueue::new())
        }
        QueueBackend::Http => {
            debug!("Using task service at {}", config.queue.url);
            Arc::new(HttpJobQueue::new(&config.queue)?)
        }
    };

    Ok(DeploymentManager::new(repository, queue))
}

/// Parse `key=value` pairs into job options; a later key overrides an earlier one.
pub fn parse_options(pairs: &[String]) -> Result<JobOptions> {
    let mut options = JobOptions::new();
    for pair in pairs {
        let (key, raw) = pair.split_once('=').ok_or_else(|| {
            DirectorError::Configuration(format!("Option must be KEY=VALUE: {pair}"))
        })?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
        options.insert(key.to_string(), value);
    }
    Ok(options)
}

pub async fn run(cli: &DirectorCli) -> Result<()> {
    let config = apply_overrides(DirectorConfig::load(cli.config.as_deref())?, cli)?;
    let manager = build_manager(&config).await?;

    match cli.command {
        Commands::Show { ref name } => {
            let deployment = manager.find_by_name(name).await?;
            print_deployment(&deployment);
        }
        Commands::Manifest { ref name } => {
            let deployment = manager.find_by_name(name).await?;
            println!("{}", manager.deployment_to_json(&deployment)?);
        }
        Commands::Instances { ref name, table } => {
            let deployment = manager.find_by_name(name).await?;
            if table {
                print_instance_table(&manager.instance_summaries(&deployment).await?);
            } else {
                println!("{}", manager.deployment_instances_to_json(&deployment).await?);
            }
        }
        Commands::Create {
            ref manifest,
            cloud_config_id,
            runtime_config_id,
            ref options,
        } => {
            let cloud_config = cloud_config_id.map(|id| CloudConfig::new(id, ""));
            let runtime_config = runtime_config_id.map(|id| RuntimeConfig::new(id, ""));
            let task = manager
                .create_deployment(
                    &cli.user,
                    &manifest.to_string_lossy(),
                    cloud_config.as_ref(),
                    runtime_config.as_ref(),
                    parse_options(options)?,
                )
                .await?;
            print_task(&task);
        }
        Commands::Delete {
            ref name,
            force,
            ref options,
        } => {
            let deployment = manager.find_by_name(name).await?;
            let mut options = parse_options(options)?;
            if force {
                options.insert("force".to_string(), Value::Bool(true));
            }
            let task = manager
                .delete_deployment(&cli.user, &deployment, options)
                .await?;
            print_task(&task);
        }
    }

    Ok(())
}
