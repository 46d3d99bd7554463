use tracing::info;
use crate::clients::environments::{EnvironmentTarget, EnvironmentsApi};
use crate::error::Result;
use crate::models::UpdateEnvironmentStateRequest;
use crate::utils::{retry_with_backoff, DEFAULT_MAX_RETRIES};

pub struct EnvironmentService<A> {
    api: A,
    max_retries: u32,
}

impl<A: EnvironmentsApi> EnvironmentService<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Requests `action` on `target`, retrying every failure with backoff.
    pub async fn update_state(
        &self,
        target: &EnvironmentTarget,
        action: &str,
    ) -> Result<serde_json::Value> {
        let request = UpdateEnvironmentStateRequest::new(action);

        let result = retry_with_backoff(self.max_retries, || {
            self.api.update_environment_state(target, &request)
        })
        .await?;

        info!(
            environment = %target.environment,
            action = action,
            "Environment state update accepted"
        );

        Ok(result)
    }
}
