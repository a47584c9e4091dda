use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface of the deployment director
#[derive(Parser, Debug)]
#[command(name = "deployment-director")]
#[command(about = "Look up deployments and submit create/delete tasks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct DirectorCli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository state file with deployments and instances
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Submit tasks to this task service instead of the configured queue
    #[arg(long, global = true)]
    pub queue_url: Option<String>,

    /// Queue request timeout (seconds)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// User recorded on submitted tasks
    #[arg(short, long, global = true, default_value = "admin")]
    pub user: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a deployment record
    Show {
        name: String,
    },

    /// Print a deployment's manifest as JSON
    Manifest {
        name: String,
    },

    /// List a deployment's provisioned instances
    Instances {
        name: String,

        /// Print a table instead of JSON
        #[arg(long)]
        table: bool,
    },

    /// Submit a task creating a deployment from a manifest file
    Create {
        manifest: PathBuf,

        #[arg(long)]
        cloud_config_id: Option<i64>,

        #[arg(long)]
        runtime_config_id: Option<i64>,

        /// Job option as key=value; values are parsed as JSON when possible
        #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,
    },

    /// Submit a task deleting a deployment
    Delete {
        name: String,

        /// Ignore errors while deleting
        #[arg(long)]
        force: bool,

        #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,
    },
}
