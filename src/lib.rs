pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod scenario;
pub mod types;

pub use api::{ApiResponse, GorestClient};
pub use config::ClientConfig;
pub use error::{ClientError, ScenarioError};
