mod analyzer;
mod config;
mod model;
mod notifier;
mod parser;
mod pipeline;
mod scheduler;
mod scraper;
mod storage;
mod utils;

use config::{AppConfig, Backend, load_config};
use model::ConfigError;
use notifier::{EmailNotifier, SmtpMailer};
use pipeline::JobBot;
use scheduler::Scheduler;
use scraper::{ChromeLauncher, Harvester, HttpLauncher, SessionLauncher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("scrape") => run_scrape(args.get(1).cloned()).await,
        Some("-h") | Some("--help") => print_usage(),
        other => run_bot(other.map(str::to_string)).await,
    }
}

fn build_harvester(config: &AppConfig) -> Arc<Harvester> {
    let launcher: Arc<dyn SessionLauncher> = match config.backend {
        Backend::Browser => Arc::new(ChromeLauncher {
            headless: config.harvest.headless,
        }),
        Backend::Http => Arc::new(HttpLauncher),
    };
    Arc::new(Harvester::new(launcher, config.harvest.clone()))
}

async fn run_bot(url_override: Option<String>) {
    let mut config = match load_config() {
        Ok(cfg) => cfg,
        Err(ConfigError::Missing(keys)) => {
            print_setup_guidance(&keys);
            return;
        }
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };
    if let Some(url) = url_override {
        config.search_url = url;
    }

    let mailer = match SmtpMailer::new(&config.email) {
        Ok(m) => m,
        Err(e) => {
            error!("Failed to set up mail transport: {}", e);
            return;
        }
    };

    let notifier = EmailNotifier::new(mailer, config.recent_only);
    let mut bot = JobBot::new(&config, build_harvester(&config), notifier);

    let scheduler = Scheduler::every(Duration::from_secs(config.check_interval_seconds));

    info!("Starting LinkedIn job bot...");
    info!("Checking every {} seconds", scheduler.period().as_secs());
    info!("Search URL: {}", config.search_url);
    if bot.seen().is_empty() {
        info!("No previously sent jobs in {}", config.seen_jobs_path.display());
    } else {
        info!(
            "Tracking {} previously sent jobs in {}",
            bot.seen().len(),
            config.seen_jobs_path.display()
        );
    }
    if config.recent_only {
        info!("Only jobs posted within the past hour will be sent");
    }

    scheduler.run(&mut bot).await;
}

async fn run_scrape(url_override: Option<String>) {
    let _ = dotenvy::dotenv();
    let mut config = match AppConfig::scrape_only(|key| std::env::var(key).ok()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };
    if let Some(url) = url_override {
        config.search_url = url;
    }

    info!("Scraping {}", config.search_url);
    let jobs = build_harvester(&config)
        .harvest_blocking(config.search_url.clone())
        .await;

    println!("\nFound {} jobs:", jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        println!("{}. {}", i + 1, job.title);
        println!("   Company: {}", job.company);
        println!("   Location: {}", job.location);
        println!("   Posted: {}", job.time_posted);
        println!("   Link: {}", job.link);
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  job-sniper [SEARCH_URL]         run the bot on a fixed interval");
    println!("  job-sniper scrape [SEARCH_URL]  harvest once and print the results");
}

fn print_setup_guidance(missing: &[&str]) {
    eprintln!("❌ Missing required environment variables: {}", missing.join(", "));
    eprintln!();
    eprintln!("Set them in your shell or in a .env file next to the binary:");
    eprintln!("  EMAIL_SENDER=your.address@gmail.com");
    eprintln!("  EMAIL_PASSWORD=your-app-password");
    eprintln!("  EMAIL_RECIPIENT=where.to.send@example.com");
    eprintln!();
    eprintln!("Optional:");
    eprintln!("  LINKEDIN_URL, CHECK_INTERVAL_SECONDS (default 300), SMTP_SERVER, SMTP_PORT,");
    eprintln!("  SEEN_JOBS_FILE (default sent_jobs.json), JOB_ID_STRATEGY (url|composite),");
    eprintln!("  RECENT_ONLY, SCRAPER_BACKEND (browser|http), HEADLESS");
    eprintln!();
    eprintln!("For Gmail, EMAIL_PASSWORD must be an App Password, not your account password.");
}
