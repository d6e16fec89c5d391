use std::time::Duration;

use serde::Serialize;

use crate::error::ScenarioError;
use crate::scenario::Step;
use crate::types::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum StepOutcome {
    Passed,
    Failed { kind: String, message: String },
    Skipped { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: Step,
    #[serde(flatten)]
    pub outcome: StepOutcome,
    pub elapsed_ms: u64,
}

/// Per-step outcomes of one run, in execution order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioReport {
    pub steps: Vec<StepReport>,
    /// Id returned by the create step, if it got that far
    pub created_id: Option<UserId>,
}

impl ScenarioReport {
    pub fn record<T>(&mut self, step: Step, result: &Result<T, ScenarioError>, elapsed: Duration) {
        let outcome = match result {
            Ok(_) => {
                tracing::info!("{}: passed ({} ms)", step, elapsed.as_millis());
                StepOutcome::Passed
            }
            Err(err) => {
                tracing::warn!("{}: failed: {}", step, err);
                StepOutcome::Failed {
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                }
            }
        };

        self.steps.push(StepReport {
            step,
            outcome,
            elapsed_ms: elapsed.as_millis() as u64,
        });
    }

    pub fn skip(&mut self, step: Step, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!("{}: skipped ({})", step, reason);
        self.steps.push(StepReport {
            step,
            outcome: StepOutcome::Skipped { reason },
            elapsed_ms: 0,
        });
    }

    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps.iter().find(|r| r.step == step).map(|r| &r.outcome)
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped { .. }))
    }

    /// True only when every step ran and passed
    pub fn is_success(&self) -> bool {
        !self.steps.is_empty() && self.passed() == self.steps.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|r| pred(&r.outcome)).count()
    }
}
