use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Invalid value for input {name}: {value}")]
    InvalidInput { name: &'static str, value: String },

    #[error("API request failed with status {}{}", .status, detail(.message))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default()
}

impl Error {
    /// Text reported as the step's failure reason.
    ///
    /// API errors surface the server's `message` verbatim, or `Unknown error` when the
    /// body carried none.
    pub fn failure_message(&self) -> String {
        match self {
            Error::Api { message: Some(message), .. } => message.clone(),
            Error::Api { message: None, .. } => "Unknown error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_reports_server_message() {
        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            message: Some("Environment not found".to_string()),
        };

        assert_eq!(err.failure_message(), "Environment not found");
        assert_eq!(
            err.to_string(),
            "API request failed with status 404 Not Found: Environment not found"
        );
    }

    #[test]
    fn api_error_without_body_is_unknown() {
        let err = Error::Api {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };

        assert_eq!(err.failure_message(), "Unknown error");
        assert_eq!(err.to_string(), "API request failed with status 502 Bad Gateway");
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn input_errors_use_display_text() {
        let err = Error::MissingInput("api_key");

        assert_eq!(err.failure_message(), "Input required and not supplied: api_key");
        assert_eq!(err.status(), None);
    }
}
