use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::models::Platform;

/// One GET against a platform API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub platform: Platform,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn get(platform: Platform, url: impl Into<String>) -> Self {
        Self {
            platform,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    #[cfg(test)]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[async_trait]
pub trait JsonTransport: Send + Sync {
    async fn get_json(&self, request: ApiRequest) -> Result<Value, FetchError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, platform: Platform, source: reqwest::Error) -> FetchError {
        if source.is_timeout() {
            FetchError::Timeout {
                platform,
                timeout: self.timeout,
            }
        } else if let Some(status) = source.status() {
            FetchError::Status {
                platform,
                status: status.as_u16(),
                url: source.url().map(|url| url.to_string()).unwrap_or_default(),
            }
        } else {
            FetchError::Transport { platform, source }
        }
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn get_json(&self, request: ApiRequest) -> Result<Value, FetchError> {
        let platform = request.platform;
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| self.classify(platform, err))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| self.classify(platform, err))?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { platform, source })
    }
}
