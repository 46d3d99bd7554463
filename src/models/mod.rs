mod environment;

pub use environment::{ApiErrorBody, UpdateEnvironmentStateRequest};
