use clap::Subcommand;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::client::models::JobStatus;
use crate::schema::{
    apply_change, resolve_value, traverse, value_at, FieldPath, PathSegment, SchemaKind, SchemaNode,
};

#[derive(Subcommand)]
pub enum JobCommands {
    #[command(about = "List jobs")]
    List {
        #[arg(long, help = "Filter by status: queued, running, complete, failed, cancelled")]
        status: Option<String>,
    },

    #[command(about = "Create a job from a process schema")]
    Create {
        #[arg(help = "Process name")]
        process: String,
        #[arg(
            long = "set",
            value_name = "PATH=VALUE",
            help = "Set an input field, e.g. --set output.codec=vp9 or --set clips[0].source=intro.mov"
        )]
        set: Vec<String>,
        #[arg(long, help = "Read the initial input payload from a JSON file")]
        input: Option<String>,
    },

    #[command(about = "Show a job")]
    Show {
        #[arg(help = "Job id")]
        id: Uuid,
    },

    #[command(about = "Cancel a running or queued job")]
    Cancel {
        #[arg(help = "Job id")]
        id: Uuid,
    },
}

pub async fn handle(
    cmd: JobCommands,
    remote_override: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        JobCommands::List { status } => {
            let status = status.map(|s| parse_status(&s)).transpose()?;
            let (client, _session) = authed_client(remote_override)?;
            let jobs = client.list_jobs(status).await?;

            if jobs.is_empty() {
                return output_empty_collection(&output_format, "jobs", "No jobs found");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "jobs": jobs }))?);
                }
                OutputFormat::Text => {
                    println!(
                        "{:<38} {:<20} {:<10} {}",
                        "ID", "PROCESS", "STATUS", "CREATED"
                    );
                    println!("{}", "-".repeat(90));
                    for job in &jobs {
                        println!(
                            "{:<38} {:<20} {:<10} {}",
                            job.id,
                            job.process,
                            job.status.as_str(),
                            job.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
            }

            Ok(())
        }
        JobCommands::Create {
            process,
            set,
            input,
        } => {
            let (client, _session) = authed_client(remote_override)?;
            let process_info = client.get_process(&process).await?;

            let bag = match input {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .map_err(|e| anyhow::anyhow!("cannot read input file '{}': {}", path, e))?;
                    serde_json::from_str(&content)
                        .map_err(|e| anyhow::anyhow!("input file '{}' is not JSON: {}", path, e))?
                }
                None => json!({}),
            };

            let schema = SchemaNode::from_value(&process_info.input_schema);
            let bag = build_input(&schema, bag, &set)?;

            let job = client.create_job(&process, bag).await?;

            output_success(
                &output_format,
                &format!("Job {} created for process '{}'", job.id, process),
                Some(json!({ "job": job })),
            )
        }
        JobCommands::Show { id } => {
            let (client, _session) = authed_client(remote_override)?;
            let job = client.get_job(id).await?;

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "job": job }))?);
                }
                OutputFormat::Text => {
                    println!("Job: {}", job.id);
                    println!("Process: {}", job.process);
                    println!("Status: {}", job.status.as_str());
                    if let Some(progress) = job.progress {
                        println!("Progress: {:.0}%", progress * 100.0);
                    }
                    if let Some(error) = &job.error {
                        println!("Error: {}", error);
                    }
                    println!("Created: {}", job.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
                    println!("Input: {}", serde_json::to_string_pretty(&job.input)?);
                }
            }

            Ok(())
        }
        JobCommands::Cancel { id } => {
            let (client, _session) = authed_client(remote_override)?;
            let job = client.cancel_job(id).await?;

            output_success(
                &output_format,
                &format!("Job {} is now {}", job.id, job.status.as_str()),
                Some(json!({ "job": job })),
            )
        }
    }
}

fn parse_status(input: &str) -> anyhow::Result<JobStatus> {
    match input {
        "queued" => Ok(JobStatus::Queued),
        "running" => Ok(JobStatus::Running),
        "complete" => Ok(JobStatus::Complete),
        "failed" => Ok(JobStatus::Failed),
        "cancelled" => Ok(JobStatus::Cancelled),
        other => anyhow::bail!("unknown job status '{}'", other),
    }
}

/// Build the submission payload: apply each `--set PATH=VALUE` over the
/// starting bag, fill in schema defaults for untouched fields, then check
/// required leaves.
fn build_input(schema: &SchemaNode, mut bag: Value, sets: &[String]) -> anyhow::Result<Value> {
    for entry in sets {
        let Some((path, raw)) = entry.split_once('=') else {
            anyhow::bail!("--set expects PATH=VALUE, got '{}'", entry);
        };
        let path = FieldPath::parse(path);
        if path.is_empty() {
            anyhow::bail!("--set has an empty path in '{}'", entry);
        }
        // Values parse as JSON when they can, otherwise as plain strings,
        // so --set bitrate=2000 and --set title=Trailer both work.
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        bag = apply_change(&bag, &path, value);
    }

    let fields = traverse(schema);

    // Defaults for leaves the user did not touch. Leaves under an array
    // item slot only count once that element exists in the bag, otherwise
    // an item-property default would materialize a phantom element.
    for field in &fields {
        if is_container(field.node) || !item_slots_exist(&bag, &field.path) {
            continue;
        }
        if value_at(&bag, &field.path).is_none() {
            if let Some(default) = resolve_value(&bag, &field.path, field.node) {
                bag = apply_change(&bag, &field.path, default.clone());
            }
        }
    }

    // Required leaves must be present after defaults. Same rule for item
    // slots: an empty or absent array is submittable, but any element the
    // user started filling in must carry its required properties.
    let missing: Vec<String> = fields
        .iter()
        .filter(|field| {
            field.required
                && !is_container(field.node)
                && item_slots_exist(&bag, &field.path)
                && value_at(&bag, &field.path).is_none()
        })
        .map(|field| field.path.to_string())
        .collect();
    if !missing.is_empty() {
        anyhow::bail!("missing required fields: {}", missing.join(", "));
    }

    Ok(bag)
}

/// True when every array slot on `path` resolves to an existing, non-null
/// element of the bag. Paths without index segments always pass.
fn item_slots_exist(bag: &Value, path: &FieldPath) -> bool {
    let mut current = Some(bag);
    for segment in path.segments() {
        match segment {
            PathSegment::Key(key) => {
                current = current.and_then(Value::as_object).and_then(|map| map.get(key));
            }
            PathSegment::Index(idx) => {
                match current.and_then(Value::as_array).and_then(|items| items.get(*idx)) {
                    Some(element) if !element.is_null() => current = Some(element),
                    _ => return false,
                }
            }
        }
    }
    true
}

fn is_container(node: &SchemaNode) -> bool {
    match node.kind {
        Some(SchemaKind::Object) => node.has_properties(),
        Some(SchemaKind::Array) => matches!(
            node.items.as_deref(),
            Some(items) if items.is_object() && items.has_properties()
        ),
        _ => false,
    }
}
