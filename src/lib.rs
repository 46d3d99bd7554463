use tracing::{error, info, warn};

pub mod actions;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use clients::environments::EnvironmentTarget;
pub use clients::{EnvironmentsApi, EnvironmentsClient, HttpClient};
pub use crate::config::{InputOverrides, Settings};
pub use error::{Error, Result};
pub use services::EnvironmentService;
pub use utils::{backoff_delay, retry_with_backoff, DEFAULT_MAX_RETRIES};

/// Requests the configured state change and waits for the API to accept it.
///
/// Every failure is retried with backoff up to `settings.max_retries` times; the
/// error of the final attempt is returned as-is.
pub async fn update_environment_state(settings: &Settings) -> Result<serde_json::Value> {
    if !settings.uses_default_base_url() {
        let notice = format!("Using non-default base URL: {}", settings.base_url);
        warn!("{}", notice);
        actions::warning(&notice);
    }

    info!("Quant Cloud Environment State Update");
    info!("----------------------------------");
    info!("  • Organization: {}", settings.organization);
    info!("  • Application: {}", settings.application);
    info!("  • Environment: {}", settings.environment);
    info!("  • Action: {}", settings.action);

    let client = EnvironmentsClient::new(&settings.base_url, &settings.api_key)?;
    let service = EnvironmentService::new(client).with_max_retries(settings.max_retries);

    let target = EnvironmentTarget {
        organization: settings.organization.clone(),
        application: settings.application.clone(),
        environment: settings.environment.clone(),
    };

    match service.update_state(&target, &settings.action).await {
        Ok(result) => {
            info!("Environment state updated successfully");
            Ok(result)
        }
        Err(e) => {
            error!(error = %e, "Failed to update environment state after retries");
            actions::error("Failed to update environment state after retries");
            Err(e)
        }
    }
}
