//! Shared types for the GoRest user resource

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned user identifier
pub type UserId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Body sent on `POST /users` and `PUT /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

/// A user record as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

/// One element of a 422 validation-error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_uses_lowercase_enums_on_the_wire() {
        let payload = UserPayload {
            name: "Jane Doe".to_string(),
            email: "janedoe@example.com".to_string(),
            gender: Gender::Female,
            status: UserStatus::Inactive,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "Jane Doe",
                "email": "janedoe@example.com",
                "gender": "female",
                "status": "inactive"
            })
        );
    }

    #[test]
    fn user_record_ignores_unknown_fields() {
        let user: User = serde_json::from_value(json!({
            "id": 7012345,
            "name": "John Doe",
            "email": "johndoe@example.com",
            "gender": "male",
            "status": "active",
            "extra": true
        }))
        .unwrap();

        assert_eq!(user.id, 7012345);
        assert_eq!(user.gender, Gender::Male);
        assert_eq!(user.status.to_string(), "active");
    }
}
