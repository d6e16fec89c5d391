pub mod scenario;
pub mod users;
