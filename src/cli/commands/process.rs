use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::schema::{traverse, FieldDescriptor, PathSegment, SchemaNode};

#[derive(Subcommand)]
pub enum ProcessCommands {
    #[command(about = "List available processes")]
    List,

    #[command(about = "Show a process definition")]
    Show {
        #[arg(help = "Process name")]
        name: String,
        #[arg(long, help = "Render the input schema as a field listing")]
        schema: bool,
    },
}

pub async fn handle(
    cmd: ProcessCommands,
    remote_override: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ProcessCommands::List => {
            let (client, _session) = authed_client(remote_override)?;
            let processes = client.list_processes().await?;

            if processes.is_empty() {
                return output_empty_collection(&output_format, "processes", "No processes available");
            }

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({ "processes": processes }))?
                    );
                }
                OutputFormat::Text => {
                    println!("{:<20} {:<30} {}", "NAME", "TITLE", "DESCRIPTION");
                    println!("{}", "-".repeat(80));
                    for process in &processes {
                        println!(
                            "{:<20} {:<30} {}",
                            process.name,
                            process.title,
                            process.description.as_deref().unwrap_or("")
                        );
                    }
                }
            }

            Ok(())
        }
        ProcessCommands::Show { name, schema } => {
            let (client, _session) = authed_client(remote_override)?;
            let process = client.get_process(&name).await?;

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({ "process": process }))?
                    );
                }
                OutputFormat::Text => {
                    println!("Process: {}", process.name);
                    println!("Title: {}", process.title);
                    if let Some(description) = &process.description {
                        println!("Description: {}", description);
                    }
                    if schema {
                        println!();
                        println!("Input fields:");
                        let root = SchemaNode::from_value(&process.input_schema);
                        let fields = traverse(&root);
                        if fields.is_empty() {
                            println!("  (no declared fields)");
                        }
                        for field in &fields {
                            println!("  {}", format_field(field));
                        }
                    }
                }
            }

            Ok(())
        }
    }
}

/// One viewer line per descriptor: indentation from depth, label from the
/// path, type badge, required marker, then constraint metadata.
fn format_field(field: &FieldDescriptor<'_>) -> String {
    let indent = "  ".repeat(field.depth);
    let label = match field.path.segments().last() {
        Some(PathSegment::Key(name)) => name.clone(),
        // Synthesized array item slot
        Some(PathSegment::Index(_)) => "(item)".to_string(),
        None => String::new(),
    };
    let badge = match field.node.kind {
        Some(kind) => format!(" <{}>", kind.badge()),
        None => String::new(),
    };
    let required = if field.required { " *" } else { "" };

    let mut line = format!("{}{}{}{}", indent, label, badge, required);

    let constraints = format_constraints(field.node);
    if !constraints.is_empty() {
        line.push_str(&format!("  [{}]", constraints.join(", ")));
    }
    if let Some(description) = &field.node.description {
        line.push_str(&format!("  - {}", description));
    }
    line
}

fn format_constraints(node: &SchemaNode) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(format) = &node.format {
        parts.push(format!("format={}", format));
    }
    if let Some(values) = &node.enum_values {
        let rendered: Vec<String> = values
            .iter()
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            })
            .collect();
        parts.push(format!("one of: {}", rendered.join("|")));
    }
    if let Some(minimum) = node.minimum {
        parts.push(format!("min={}", minimum));
    }
    if let Some(maximum) = node.maximum {
        parts.push(format!("max={}", maximum));
    }
    if let Some(min_length) = node.min_length {
        parts.push(format!("minLen={}", min_length));
    }
    if let Some(max_length) = node.max_length {
        parts.push(format!("maxLen={}", max_length));
    }
    if let Some(pattern) = &node.pattern {
        parts.push(format!("pattern={}", pattern));
    }
    if let Some(default) = &node.default {
        parts.push(format!("default={}", default));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::traverse;

    #[test]
    fn formats_required_field_with_badge_and_constraints() {
        let root = SchemaNode::from_value(&serde_json::json!({
            "type": "object",
            "properties": {
                "codec": {
                    "type": "string",
                    "enum": ["h264", "vp9"],
                    "description": "Target codec"
                }
            },
            "required": ["codec"]
        }));
        let fields = traverse(&root);
        let line = format_field(&fields[0]);
        assert_eq!(line, "codec <string> *  [one of: h264|vp9]  - Target codec");
    }

    #[test]
    fn indents_by_depth_and_labels_item_slots() {
        let root = SchemaNode::from_value(&serde_json::json!({
            "type": "object",
            "properties": {
                "clips": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"source": {"type": "string"}}
                    }
                }
            }
        }));
        let fields = traverse(&root);
        assert_eq!(format_field(&fields[0]), "clips <array>");
        assert_eq!(format_field(&fields[1]), "  (item) <object>");
        assert!(format_field(&fields[2]).starts_with("    source"));
    }
}
