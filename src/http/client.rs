use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Blocking HTTP client shared by every remote source.
///
/// Blocking is deliberate: the pipeline runs one user action at a time and
/// waits on each call in sequence. The timeout bounds how long a slow
/// remote host can stall that action; a timeout is reported like any other
/// transport failure.
pub struct WebClient {
    client: Client,
}

impl WebClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client })
    }

    pub fn get(&self, url: &str) -> Result<Response> {
        self.send_get_request(url, &[])
    }

    /// GET with extra request headers (e.g. a content-negotiation Accept).
    pub fn get_with_headers(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response> {
        self.send_get_request(url, headers)
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    fn send_get_request(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request.send().context("Failed to send GET request")
    }
}
