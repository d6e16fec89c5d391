//! Payloads used by the scenario

use rand::Rng;
use serde_json::{json, Value};

use crate::types::{Gender, UserPayload, UserStatus};

/// An address already registered on the public service
pub const TAKEN_EMAIL: &str = "johndoe@example.com";

pub const CREATED_NAME: &str = "John Doe";

pub const UPDATED_NAME: &str = "Jane Doe";
pub const UPDATED_EMAIL: &str = "janedoe@example.com";

/// Payload whose email the service rejects as taken
pub fn taken_email_user() -> UserPayload {
    UserPayload {
        name: CREATED_NAME.to_string(),
        email: TAKEN_EMAIL.to_string(),
        gender: Gender::Male,
        status: UserStatus::Active,
    }
}

/// Payload with a randomized email (`johndoe0.1234567890123456@example.com`)
/// and a randomized gender
pub fn fresh_user<R: Rng + ?Sized>(rng: &mut R) -> UserPayload {
    let suffix: f64 = rng.gen();
    let gender = if rng.gen::<f64>() > 0.5 {
        Gender::Female
    } else {
        Gender::Male
    };

    UserPayload {
        name: CREATED_NAME.to_string(),
        email: format!("johndoe{:.16}@example.com", suffix),
        gender,
        status: UserStatus::Active,
    }
}

pub fn updated_user() -> UserPayload {
    UserPayload {
        name: UPDATED_NAME.to_string(),
        email: UPDATED_EMAIL.to_string(),
        gender: Gender::Female,
        status: UserStatus::Inactive,
    }
}

/// Exact body the service returns for a taken email
pub fn duplicate_email_errors() -> Value {
    json!([{
        "field": "email",
        "message": "has already been taken",
    }])
}
