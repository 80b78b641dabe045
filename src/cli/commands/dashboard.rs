use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;

pub async fn handle(
    remote_override: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let (client, session) = authed_client(remote_override)?;
    let summary = client.metrics_summary().await?;

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "tenant": session.tenant,
                    "metrics": summary,
                }))?
            );
        }
        OutputFormat::Text => {
            println!("Tenant: {}", session.tenant);
            println!();
            println!("Jobs");
            println!("  total:    {}", summary.jobs_total);
            println!("  queued:   {}", summary.jobs_queued);
            println!("  running:  {}", summary.jobs_running);
            println!("  complete: {}", summary.jobs_complete);
            println!("  failed:   {}", summary.jobs_failed);
            println!();
            println!("Outputs");
            println!("  total:    {}", summary.outputs_total);
        }
    }

    Ok(())
}
