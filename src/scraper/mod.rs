pub mod browser;
pub mod fetcher;
pub mod harvester;
pub mod traits;

pub use browser::ChromeLauncher;
pub use fetcher::HttpLauncher;
pub use harvester::Harvester;
pub use traits::SessionLauncher;
