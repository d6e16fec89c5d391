pub mod client;

pub use client::{ApiResponse, GorestClient};
