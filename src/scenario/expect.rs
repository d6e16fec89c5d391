//! Checks applied to responses; each failure names the step it came from.

use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::api::ApiResponse;
use crate::error::ScenarioError;
use crate::scenario::Step;
use crate::types::{UserId, UserPayload};

pub fn status(step: Step, response: &ApiResponse, expected: StatusCode) -> Result<(), ScenarioError> {
    if response.status == expected {
        return Ok(());
    }

    Err(ScenarioError::UnexpectedStatus {
        step,
        expected,
        actual: response.status,
        body: response.body.clone(),
    })
}

pub fn array(step: Step, body: &Value) -> Result<&Vec<Value>, ScenarioError> {
    body.as_array()
        .ok_or_else(|| ScenarioError::payload_mismatch(step, format!("expected an array, got {}", body)))
}

pub fn object(step: Step, body: &Value) -> Result<&Map<String, Value>, ScenarioError> {
    body.as_object()
        .ok_or_else(|| ScenarioError::payload_mismatch(step, format!("expected an object, got {}", body)))
}

/// The `id` field, which must be a non-negative integer
pub fn numeric_id(step: Step, body: &Value) -> Result<UserId, ScenarioError> {
    let id = object(step, body)?
        .get("id")
        .ok_or_else(|| ScenarioError::payload_mismatch(step, format!("missing 'id' in {}", body)))?;

    id.as_u64()
        .ok_or_else(|| ScenarioError::payload_mismatch(step, format!("'id' is not a number: {}", id)))
}

pub fn field_eq(step: Step, body: &Value, field: &str, expected: &Value) -> Result<(), ScenarioError> {
    match object(step, body)?.get(field) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(ScenarioError::payload_mismatch(
            step,
            format!("'{}' expected {}, got {}", field, expected, actual),
        )),
        None => Err(ScenarioError::payload_mismatch(
            step,
            format!("missing '{}' in {}", field, body),
        )),
    }
}

/// Every field of `payload` comes back unchanged
pub fn echoes(step: Step, body: &Value, payload: &UserPayload) -> Result<(), ScenarioError> {
    let sent = serde_json::to_value(payload)
        .map_err(|e| ScenarioError::payload_mismatch(step, format!("payload not serializable: {}", e)))?;

    if let Value::Object(fields) = sent {
        for (field, expected) in &fields {
            field_eq(step, body, field, expected)?;
        }
    }

    Ok(())
}

/// Exact structural equality
pub fn deep_eq(step: Step, actual: &Value, expected: &Value) -> Result<(), ScenarioError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ScenarioError::payload_mismatch(
            step,
            format!("expected {}, got {}", expected, actual),
        ))
    }
}
