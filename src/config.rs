use crate::model::ConfigError;
use crate::storage::IdStrategy;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str =
    "https://www.linkedin.com/jobs/search/?keywords=software%20engineer%20intern&f_TPR=r86400&f_E=1";
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub sender: String,
    pub password: String,
    pub recipient: String,
    pub smtp_server: String,
    pub smtp_port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Headless Chrome: renders JavaScript and scrolls for lazy-loaded cards.
    Browser,
    /// Plain HTTP GET of the listing page, no scripting.
    Http,
}

impl FromStr for Backend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "browser" | "chrome" => Ok(Backend::Browser),
            "http" => Ok(Backend::Http),
            _ => Err(()),
        }
    }
}

/// Timing of the load-and-scroll protocol.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub initial_settle: Duration,
    pub scroll_settle: Duration,
    pub nudge_settle: Duration,
    pub final_settle: Duration,
    /// Upper bound of the random extra delay added to every settle.
    pub jitter: Duration,
    pub max_scrolls: usize,
    pub nudge_offset: i64,
    pub headless: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            initial_settle: Duration::from_secs(5),
            scroll_settle: Duration::from_secs(2),
            nudge_settle: Duration::from_secs(1),
            final_settle: Duration::from_secs(2),
            jitter: Duration::from_millis(300),
            max_scrolls: 10,
            nudge_offset: 500,
            headless: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub email: EmailConfig,
    pub search_url: String,
    pub check_interval_seconds: u64,
    pub seen_jobs_path: PathBuf,
    pub id_strategy: IdStrategy,
    pub recent_only: bool,
    pub backend: Backend,
    pub harvest: HarvestConfig,
}

/// Loads configuration from the process environment, honouring a `.env`
/// file when one is present.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let _ = dotenvy::dotenv();
    AppConfig::from_lookup(|key| std::env::var(key).ok())
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key).map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value: v }),
        },
    }
}

impl AppConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str, missing: &mut Vec<&'static str>| {
            let value = lookup(key).unwrap_or_default();
            if value.trim().is_empty() {
                missing.push(key);
            }
            value
        };

        let mut missing = Vec::new();
        let sender = required("EMAIL_SENDER", &mut missing);
        let password = required("EMAIL_PASSWORD", &mut missing);
        let recipient = required("EMAIL_RECIPIENT", &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let email = EmailConfig {
            sender,
            password,
            recipient,
            smtp_server: lookup("SMTP_SERVER")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
            smtp_port: parse_or(&lookup, "SMTP_PORT", DEFAULT_SMTP_PORT)?,
        };

        Self::with_email(email, &lookup)
    }

    /// Configuration for a one-off harvest, where no mail is sent.
    pub fn scrape_only(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let email = EmailConfig {
            sender: String::new(),
            password: String::new(),
            recipient: String::new(),
            smtp_server: DEFAULT_SMTP_SERVER.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
        };
        Self::with_email(email, &lookup)
    }

    fn with_email(
        email: EmailConfig,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let id_strategy = match lookup("JOB_ID_STRATEGY").filter(|v| !v.trim().is_empty()) {
            None => IdStrategy::default(),
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "JOB_ID_STRATEGY",
                value,
            })?,
        };
        let backend = match lookup("SCRAPER_BACKEND").filter(|v| !v.trim().is_empty()) {
            None => Backend::Browser,
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "SCRAPER_BACKEND",
                value,
            })?,
        };

        let harvest = HarvestConfig {
            headless: parse_bool(lookup, "HEADLESS", true)?,
            ..HarvestConfig::default()
        };

        Ok(Self {
            email,
            search_url: lookup("LINKEDIN_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            check_interval_seconds: parse_or(lookup, "CHECK_INTERVAL_SECONDS", 300)?,
            seen_jobs_path: lookup("SEEN_JOBS_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("sent_jobs.json")),
            id_strategy,
            recent_only: parse_bool(lookup, "RECENT_ONLY", false)?,
            backend,
            harvest,
        })
    }
}
