use serde::Deserialize;
use std::fmt;
use std::path::Path;
use config::Config;
use tracing::debug;
use crate::error::{Error, Result};
use crate::utils::DEFAULT_MAX_RETRIES;

pub const DEFAULT_BASE_URL: &str = "https://dashboard.quantcdn.io/api/v3";
pub const DEFAULT_ACTION: &str = "redeploy";

/// Environment prefix the CI runner uses when exporting step inputs (`INPUT_API_KEY`, ...).
pub const INPUT_PREFIX: &str = "INPUT";

#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub organization: String,
    pub application: String,
    pub environment: String,
    pub base_url: String,
    pub action: String,
    pub max_retries: u32,
}

/// Values that take precedence over every other source, usually from the command line.
#[derive(Debug, Default, Clone)]
pub struct InputOverrides {
    pub api_key: Option<String>,
    pub organization: Option<String>,
    pub application: Option<String>,
    pub environment: Option<String>,
    pub base_url: Option<String>,
    pub action: Option<String>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct RawInputs {
    api_key: Option<String>,
    organization: Option<String>,
    application: Option<String>,
    environment: Option<String>,
    base_url: Option<String>,
    action: Option<String>,
    max_retries: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        Self::load(None, &InputOverrides::default())
    }

    /// Layers inputs as: optional file, then `INPUT_*` variables, then `overrides`.
    pub fn load(file: Option<&Path>, overrides: &InputOverrides) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            debug!(path = %path.display(), "Reading inputs from file");
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(config::Environment::with_prefix(INPUT_PREFIX));

        for (key, value) in overrides.entries() {
            if let Some(value) = value {
                builder = builder.set_override(key, value)?;
            }
        }

        let raw: RawInputs = builder.build()?.try_deserialize()?;
        let settings = Self::from_raw(raw)?;

        debug!(settings = ?settings, "Resolved inputs");

        Ok(settings)
    }

    pub fn uses_default_base_url(&self) -> bool {
        self.base_url == DEFAULT_BASE_URL
    }

    fn from_raw(raw: RawInputs) -> Result<Self> {
        let max_retries = match present(raw.max_retries) {
            Some(value) => value.parse().map_err(|_| Error::InvalidInput {
                name: "max_retries",
                value,
            })?,
            None => DEFAULT_MAX_RETRIES,
        };

        Ok(Self {
            api_key: required("api_key", raw.api_key)?,
            organization: required("organization", raw.organization)?,
            application: required("application", raw.application)?,
            environment: required("environment", raw.environment)?,
            base_url: present(raw.base_url)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            action: present(raw.action).unwrap_or_else(|| DEFAULT_ACTION.to_string()),
            max_retries,
        })
    }
}

impl InputOverrides {
    fn entries(&self) -> [(&'static str, Option<String>); 7] {
        [
            ("api_key", self.api_key.clone()),
            ("organization", self.organization.clone()),
            ("application", self.application.clone()),
            ("environment", self.environment.clone()),
            ("base_url", self.base_url.clone()),
            ("action", self.action.clone()),
            ("max_retries", self.max_retries.map(|n| n.to_string())),
        ]
    }
}

// Runners export declared-but-unset inputs as empty strings.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(name: &'static str, value: Option<String>) -> Result<String> {
    present(value).ok_or(Error::MissingInput(name))
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"***")
            .field("organization", &self.organization)
            .field("application", &self.application)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("action", &self.action)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
