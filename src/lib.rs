//! Deployment Director - deployment lifecycle API
//!
//! This crate resolves deployments by name, submits create and delete
//! operations as asynchronous tasks, and serializes deployment manifests and
//! instance inventories for API clients. Task execution happens elsewhere;
//! this crate only talks to a deployment repository and a job queue.

pub mod cli;
pub mod config;
pub mod deploy;
pub mod queue;
pub mod store;
pub mod types;

pub use config::DirectorConfig;
pub use deploy::{DeploymentManager, DirectorError, Result};
pub use queue::{HttpJobQueue, JobQueue, MemoryJobQueue};
pub use store::{DeploymentLookup, DeploymentRepository, MemoryRepository};
pub use types::*;
