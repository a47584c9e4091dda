use crate::types::{Deployment, InstanceSummary, TaskHandle};

/// Print a deployment record in human-readable format
pub fn print_deployment(deployment: &Deployment) {
    println!("Deployment: {}", deployment.name);
    println!("  id:                {}", deployment.id);
    println!(
        "  cloud config:      {}",
        format_config_id(deployment.cloud_config_id)
    );
    println!(
        "  runtime config:    {}",
        format_config_id(deployment.runtime_config_id)
    );
    println!("  manifest:          {} bytes", deployment.manifest.len());
}

pub fn print_instance_table(instances: &[InstanceSummary]) {
    if instances.is_empty() {
        println!("No provisioned instances");
        return;
    }

    let job_width = instances
        .iter()
        .map(|i| format!("{}/{}", i.job, i.index).len())
        .max()
        .unwrap_or(0)
        .max("INSTANCE".len());
    let cid_width = instances
        .iter()
        .map(|i| i.cid.as_str().len())
        .max()
        .unwrap_or(0)
        .max("VM CID".len());

    println!(
        "{:<job_width$}  {:<cid_width$}  {:<36}  AGENT",
        "INSTANCE", "VM CID", "ID"
    );
    for instance in instances {
        println!(
            "{:<job_width$}  {:<cid_width$}  {:<36}  {}",
            format!("{}/{}", instance.job, instance.index),
            instance.cid.as_str(),
            instance.id,
            instance.agent_id
        );
    }
    println!();
    println!("{} instances", instances.len());
}

pub fn print_task(task: &TaskHandle) {
    println!(
        "Task {} {:?}: {} (user: {}, {})",
        task.id,
        task.state,
        task.description,
        task.user,
        task.timestamp.to_rfc3339()
    );
}

fn format_config_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string())
}
