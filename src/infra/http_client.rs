use crate::config::HttpConfig;
use crate::error::{Result, RatingsError};
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Thin wrapper over one shared `reqwest::Client` that turns non-2xx responses into errors.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn send(
        &self,
        url: &str,
        query: &[(&str, &str)],
        user_agent: Option<&str>,
    ) -> Result<reqwest::Response> {
        let mut request = self.client.get(url).query(query);
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }
        let resp = request.send().await?;
        let status = resp.status();
        debug!("GET {} -> {}", resp.url(), status.as_u16());
        if !status.is_success() {
            return Err(RatingsError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    pub async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        Ok(self.send(url, query, None).await?.text().await?)
    }

    pub async fn get_text_as(
        &self,
        url: &str,
        query: &[(&str, &str)],
        user_agent: &str,
    ) -> Result<String> {
        Ok(self.send(url, query, Some(user_agent)).await?.text().await?)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let body = self.send(url, query, None).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Joins a base URL and a path, tolerating a trailing slash on the base.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
