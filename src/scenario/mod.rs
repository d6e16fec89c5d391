//! The user CRUD scenario run against the service.
//!
//! Each step is a standalone async function. The id produced by
//! [`create_user`] is passed by value into the steps that need it, so the
//! ordering constraints are visible in the signatures:
//!
//! ```text
//! list_users            (independent)
//! reject_duplicate_email (independent)
//! create_user -> id -> read_user -> update_user -> delete_user -> confirm_deleted
//! ```

pub mod expect;
pub mod fixtures;
pub mod report;

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use rand::Rng;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::GorestClient;
use crate::error::ScenarioError;
use crate::types::{UserId, UserPayload};

pub use report::{ScenarioReport, StepOutcome, StepReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ListUsers,
    RejectDuplicateEmail,
    CreateUser,
    ReadCreatedUser,
    UpdateUser,
    DeleteUser,
    ReadAfterDelete,
}

impl Step {
    /// Execution order
    pub const ALL: [Step; 7] = [
        Step::ListUsers,
        Step::RejectDuplicateEmail,
        Step::CreateUser,
        Step::ReadCreatedUser,
        Step::UpdateUser,
        Step::DeleteUser,
        Step::ReadAfterDelete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Step::ListUsers => "list users",
            Step::RejectDuplicateEmail => "reject duplicate email",
            Step::CreateUser => "create user",
            Step::ReadCreatedUser => "read created user",
            Step::UpdateUser => "update user",
            Step::DeleteUser => "delete user",
            Step::ReadAfterDelete => "read after delete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The payloads one run sends
#[derive(Debug, Clone)]
pub struct ScenarioPlan {
    /// Its email must already be registered remotely
    pub duplicate: UserPayload,
    pub fresh: UserPayload,
    pub update: UserPayload,
}

impl ScenarioPlan {
    pub fn randomized<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            duplicate: fixtures::taken_email_user(),
            fresh: fixtures::fresh_user(rng),
            update: fixtures::updated_user(),
        }
    }
}

/// `GET /users` answers 200 with an array
pub async fn list_users(client: &GorestClient) -> Result<Vec<Value>, ScenarioError> {
    let step = Step::ListUsers;
    let response = client.list_users().await?;
    expect::status(step, &response, StatusCode::OK)?;
    Ok(expect::array(step, &response.body)?.clone())
}

/// `POST /users` with a taken email answers 422 with exactly one email error
pub async fn reject_duplicate_email(client: &GorestClient, payload: &UserPayload) -> Result<(), ScenarioError> {
    let step = Step::RejectDuplicateEmail;
    let response = client.create_user(payload).await?;
    expect::status(step, &response, StatusCode::UNPROCESSABLE_ENTITY)?;
    expect::deep_eq(step, &response.body, &fixtures::duplicate_email_errors())
}

/// `POST /users` answers 201 echoing the payload; returns the new id
pub async fn create_user(client: &GorestClient, payload: &UserPayload) -> Result<UserId, ScenarioError> {
    let step = Step::CreateUser;
    let response = client.create_user(payload).await?;
    expect::status(step, &response, StatusCode::CREATED)?;
    expect::object(step, &response.body)?;
    let id = expect::numeric_id(step, &response.body)?;
    expect::echoes(step, &response.body, payload)?;
    Ok(id)
}

/// `GET /users/{id}` answers 200 with the same id
pub async fn read_user(client: &GorestClient, id: UserId) -> Result<Value, ScenarioError> {
    let step = Step::ReadCreatedUser;
    let response = client.get_user(id).await?;
    expect::status(step, &response, StatusCode::OK)?;
    expect::field_eq(step, &response.body, "id", &json!(id))?;
    Ok(response.body)
}

/// `PUT /users/{id}` answers 200 with the new name
pub async fn update_user(client: &GorestClient, id: UserId, payload: &UserPayload) -> Result<Value, ScenarioError> {
    let step = Step::UpdateUser;
    let response = client.update_user(id, payload).await?;
    expect::status(step, &response, StatusCode::OK)?;
    expect::field_eq(step, &response.body, "name", &json!(payload.name))?;
    Ok(response.body)
}

/// `DELETE /users/{id}` answers 204
pub async fn delete_user(client: &GorestClient, id: UserId) -> Result<(), ScenarioError> {
    let response = client.delete_user(id).await?;
    expect::status(Step::DeleteUser, &response, StatusCode::NO_CONTENT)
}

/// `GET /users/{id}` answers 404 once the user is gone
pub async fn confirm_deleted(client: &GorestClient, id: UserId) -> Result<(), ScenarioError> {
    let response = client.get_user(id).await?;
    expect::status(Step::ReadAfterDelete, &response, StatusCode::NOT_FOUND)
}

/// Run every step in order and report each outcome.
///
/// A failed step does not abort the run. Steps that need the created id are
/// skipped when creation failed, and the read-after-delete check is skipped
/// when the delete itself failed.
pub async fn run(client: &GorestClient, plan: &ScenarioPlan) -> ScenarioReport {
    tracing::info!("Running scenario against {}", client.config().base_url);
    let report = run_steps(client, plan).await;
    tracing::info!("Scenario finished: {}", report.summary());
    report
}

async fn run_steps(client: &GorestClient, plan: &ScenarioPlan) -> ScenarioReport {
    let mut report = ScenarioReport::default();

    let (result, elapsed) = timed(Step::ListUsers, list_users(client)).await;
    report.record(Step::ListUsers, &result, elapsed);

    let (result, elapsed) = timed(Step::RejectDuplicateEmail, reject_duplicate_email(client, &plan.duplicate)).await;
    report.record(Step::RejectDuplicateEmail, &result, elapsed);

    let (result, elapsed) = timed(Step::CreateUser, create_user(client, &plan.fresh)).await;
    report.record(Step::CreateUser, &result, elapsed);

    let id = match result {
        Ok(id) => id,
        Err(_) => {
            for step in [Step::ReadCreatedUser, Step::UpdateUser, Step::DeleteUser, Step::ReadAfterDelete] {
                report.skip(step, "no user was created");
            }
            return report;
        }
    };
    report.created_id = Some(id);

    let (result, elapsed) = timed(Step::ReadCreatedUser, read_user(client, id)).await;
    report.record(Step::ReadCreatedUser, &result, elapsed);

    let (result, elapsed) = timed(Step::UpdateUser, update_user(client, id, &plan.update)).await;
    report.record(Step::UpdateUser, &result, elapsed);

    let (result, elapsed) = timed(Step::DeleteUser, delete_user(client, id)).await;
    report.record(Step::DeleteUser, &result, elapsed);

    if result.is_err() {
        report.skip(Step::ReadAfterDelete, format!("user {} was not deleted", id));
        return report;
    }

    let (result, elapsed) = timed(Step::ReadAfterDelete, confirm_deleted(client, id)).await;
    report.record(Step::ReadAfterDelete, &result, elapsed);

    report
}

async fn timed<T, F>(step: Step, fut: F) -> (Result<T, ScenarioError>, Duration)
where
    F: Future<Output = Result<T, ScenarioError>>,
{
    tracing::info!("{}: running", step);
    let started = Instant::now();
    let result = fut.await;
    (result, started.elapsed())
}
