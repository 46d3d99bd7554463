use reqwest::{Client, RequestBuilder, Response};
use http::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use crate::error::{Error, Result};
use crate::models::ApiErrorBody;
use tracing::{debug, error};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON client that authenticates every request with a bearer token.
pub struct HttpClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        debug!(base_url = base_url, "Created API client");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let mut request = self.client.put(url.as_str());

        for (key, value) in self.headers.iter() {
            request = request.header(key, value);
        }

        debug!(url = %url, "Creating PUT request");

        request
    }

    /// Sends `request`, turning any non-2xx status into [`Error::Api`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        debug!(
            status = status.as_u16(),
            url = %response.url(),
            "Response received"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = ApiErrorBody::message_from(&body);

        error!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body),
            "API request failed"
        );

        Err(Error::Api { status, message })
    }

    /// Reads a JSON body, mapping an empty body to `null`.
    pub async fn json(response: Response) -> Result<serde_json::Value> {
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| {
            error!(
                error = %e,
                body = %String::from_utf8_lossy(&body),
                "Failed to parse response body"
            );
            Error::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_doubling_slashes() {
        let client = HttpClient::new("https://api.example.com/v3/", "token").unwrap();

        assert_eq!(
            client.url("/organizations/acme"),
            "https://api.example.com/v3/organizations/acme"
        );
    }

    #[test]
    fn rejects_api_key_with_control_characters() {
        let err = HttpClient::new("https://api.example.com", "bad\ntoken").err().unwrap();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }
}
