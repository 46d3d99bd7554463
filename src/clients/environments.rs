use async_trait::async_trait;
use tracing::debug;
use crate::clients::http::HttpClient;
use crate::error::Result;
use crate::models::UpdateEnvironmentStateRequest;

/// Identifies one environment of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentTarget {
    pub organization: String,
    pub application: String,
    pub environment: String,
}

impl EnvironmentTarget {
    pub fn state_path(&self) -> String {
        format!(
            "organizations/{}/applications/{}/environments/{}/state",
            self.organization, self.application, self.environment
        )
    }
}

#[async_trait]
pub trait EnvironmentsApi: Send + Sync {
    async fn update_environment_state(
        &self,
        target: &EnvironmentTarget,
        request: &UpdateEnvironmentStateRequest,
    ) -> Result<serde_json::Value>;
}

pub struct EnvironmentsClient {
    http: HttpClient,
}

impl EnvironmentsClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(base_url, api_key)?,
        })
    }
}

#[async_trait]
impl EnvironmentsApi for EnvironmentsClient {
    async fn update_environment_state(
        &self,
        target: &EnvironmentTarget,
        request: &UpdateEnvironmentStateRequest,
    ) -> Result<serde_json::Value> {
        let body = serde_json::to_vec(request)?;

        debug!(
            organization = %target.organization,
            application = %target.application,
            environment = %target.environment,
            action = %request.action,
            "Updating environment state"
        );

        let response = self
            .http
            .send(self.http.put(&target.state_path()).body(body))
            .await?;

        HttpClient::json(response).await
    }
}
