// Plain HTTP page session for server-rendered listing pages
use super::traits::{PageSession, SessionLauncher};
use crate::model::HarvestError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::info;

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct HttpLauncher;

impl SessionLauncher for HttpLauncher {
    fn launch(&self) -> Result<Box<dyn PageSession>, HarvestError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HarvestError::Launch(e.to_string()))?;

        Ok(Box::new(HttpSession {
            client,
            url: None,
            body: None,
        }))
    }
}

pub struct HttpSession {
    client: Client,
    url: Option<String>,
    body: Option<String>,
}

impl PageSession for HttpSession {
    fn navigate(&mut self, url: &str) -> Result<(), HarvestError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .map_err(|e| HarvestError::Navigation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Navigation(format!("{} returned {}", url, status)));
        }

        self.url = Some(response.url().to_string());
        let body = response
            .text()
            .map_err(|e| HarvestError::Navigation(e.to_string()))?;
        info!("Fetched {} bytes from {}", body.len(), url);
        self.body = Some(body);
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<u64, HarvestError> {
        Ok(self.body.as_ref().map_or(0, |b| b.len() as u64))
    }

    fn scroll_to_bottom(&mut self) -> Result<(), HarvestError> {
        Ok(())
    }

    fn scroll_by(&mut self, _dy: i64) -> Result<(), HarvestError> {
        Ok(())
    }

    fn content(&mut self) -> Result<String, HarvestError> {
        self.body
            .clone()
            .ok_or_else(|| HarvestError::Navigation("no page loaded".into()))
    }

    fn current_url(&self) -> Option<String> {
        self.url.clone()
    }

    fn needs_settling(&self) -> bool {
        false
    }
}
