use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum OutputCommands {
    #[command(about = "List outputs generated by a job")]
    List {
        #[arg(help = "Job id")]
        job: Uuid,
    },
}

pub async fn handle(
    cmd: OutputCommands,
    remote_override: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        OutputCommands::List { job } => {
            let (client, _session) = authed_client(remote_override)?;
            let outputs = client.list_outputs(job).await?;

            if outputs.is_empty() {
                return output_empty_collection(&output_format, "outputs", "No outputs for this job");
            }

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({ "outputs": outputs }))?
                    );
                }
                OutputFormat::Text => {
                    println!("{:<30} {:<15} {:>12} {}", "NAME", "TYPE", "SIZE", "URL");
                    println!("{}", "-".repeat(90));
                    for output in &outputs {
                        println!(
                            "{:<30} {:<15} {:>12} {}",
                            output.name,
                            output.media_type,
                            format_size(output.size_bytes),
                            output.url
                        );
                    }
                }
            }

            Ok(())
        }
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes_with_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }
}
