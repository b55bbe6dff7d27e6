// Headless Chrome page session
use super::fetcher::USER_AGENT;
use super::traits::{PageSession, SessionLauncher};
use crate::model::HarvestError;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const HIDE_WEBDRIVER: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

pub struct ChromeLauncher {
    pub headless: bool,
}

impl SessionLauncher for ChromeLauncher {
    fn launch(&self) -> Result<Box<dyn PageSession>, HarvestError> {
        let options = LaunchOptions::default_builder()
            .headless(self.headless)
            .sandbox(false)
            .idle_browser_timeout(Duration::from_secs(120))
            .args(vec![
                OsStr::new("--disable-blink-features=AutomationControlled"),
                OsStr::new("--disable-dev-shm-usage"),
            ])
            .build()
            .map_err(|e| HarvestError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| HarvestError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| HarvestError::Launch(e.to_string()))?;
        tab.set_user_agent(USER_AGENT, Some("en-US,en;q=0.9"), None)
            .map_err(|e| HarvestError::Launch(e.to_string()))?;

        info!("Chrome session started (headless: {})", self.headless);
        Ok(Box::new(ChromeSession {
            _browser: browser,
            tab,
        }))
    }
}

pub struct ChromeSession {
    // Dropping the browser kills the Chrome process.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    fn eval(&self, script: &str) -> Result<Option<serde_json::Value>, HarvestError> {
        self.tab
            .evaluate(script, false)
            .map(|obj| obj.value)
            .map_err(|e| HarvestError::Script(e.to_string()))
    }
}

impl PageSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<(), HarvestError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| HarvestError::Navigation(e.to_string()))?;
        if let Err(e) = self.eval(HIDE_WEBDRIVER) {
            debug!("Could not mask webdriver flag: {}", e);
        }
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<u64, HarvestError> {
        self.eval("document.body.scrollHeight")?
            .and_then(|v| v.as_f64())
            .map(|h| h as u64)
            .ok_or_else(|| HarvestError::Script("scrollHeight unavailable".into()))
    }

    fn scroll_to_bottom(&mut self) -> Result<(), HarvestError> {
        self.eval("window.scrollTo(0, document.body.scrollHeight);")
            .map(|_| ())
    }

    fn scroll_by(&mut self, dy: i64) -> Result<(), HarvestError> {
        self.eval(&format!("window.scrollBy(0, {});", dy)).map(|_| ())
    }

    fn content(&mut self) -> Result<String, HarvestError> {
        self.tab
            .get_content()
            .map_err(|e| HarvestError::Script(e.to_string()))
    }

    fn current_url(&self) -> Option<String> {
        Some(self.tab.get_url())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        match self.tab.close(true) {
            Ok(_) => debug!("Chrome tab closed"),
            Err(e) => debug!("Chrome tab close failed: {}", e),
        }
    }
}
