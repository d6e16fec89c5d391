use crate::api::GorestClient;
use crate::cli::utils::output_report;
use crate::cli::OutputFormat;
use crate::scenario::{self, ScenarioPlan};

pub async fn handle(client: &GorestClient, output_format: OutputFormat) -> anyhow::Result<()> {
    // Build the plan before the first await; ThreadRng is not Send
    let plan = ScenarioPlan::randomized(&mut rand::thread_rng());

    let report = scenario::run(client, &plan).await;
    output_report(&output_format, &report)?;

    if !report.is_success() {
        return Err(anyhow::anyhow!("Scenario failed: {}", report.summary()));
    }

    Ok(())
}
