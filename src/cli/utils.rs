use serde_json::{json, Value};

use crate::api::ApiResponse;
use crate::cli::OutputFormat;
use crate::scenario::{ScenarioReport, StepOutcome};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output the status and body of a successful API call
pub fn output_response(
    output_format: &OutputFormat,
    action: &str,
    response: &ApiResponse,
) -> anyhow::Result<()> {
    let message = format!("{}: {}", action, response.status);

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            &message,
            Some(json!({
                "status": response.status.as_u16(),
                "body": response.body
            })),
        ),
        OutputFormat::Text => {
            output_success(output_format, &message, None)?;
            if !response.body.is_null() {
                println!("{}", serde_json::to_string_pretty(&response.body)?);
            }
            Ok(())
        }
    }
}

/// Output a scenario report, one line per step in text mode
pub fn output_report(output_format: &OutputFormat, report: &ScenarioReport) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": report.is_success(),
                    "summary": report.summary(),
                    "created_id": report.created_id,
                    "steps": report.steps
                }))?
            );
        }
        OutputFormat::Text => {
            for entry in &report.steps {
                match &entry.outcome {
                    StepOutcome::Passed => println!("✓ {} ({} ms)", entry.step, entry.elapsed_ms),
                    StepOutcome::Failed { message, .. } => println!("✗ {}\n    {}", entry.step, message),
                    StepOutcome::Skipped { reason } => println!("- {} (skipped: {})", entry.step, reason),
                }
            }
            println!("{}", report.summary());
        }
    }
    Ok(())
}
