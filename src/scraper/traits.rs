use crate::model::HarvestError;

/// A live page the harvester can drive.
///
/// The session is a scoped resource: dropping it must release the
/// underlying browser or connection.
pub trait PageSession: Send {
    fn navigate(&mut self, url: &str) -> Result<(), HarvestError>;

    fn scroll_height(&mut self) -> Result<u64, HarvestError>;

    fn scroll_to_bottom(&mut self) -> Result<(), HarvestError>;

    fn scroll_by(&mut self, dy: i64) -> Result<(), HarvestError>;

    /// Serialized DOM of the current page.
    fn content(&mut self) -> Result<String, HarvestError>;

    /// URL of the current page after redirects, if known.
    fn current_url(&self) -> Option<String>;

    /// Whether content keeps arriving after navigation, so that the settle
    /// delays are worth waiting for.
    fn needs_settling(&self) -> bool {
        true
    }
}

pub trait SessionLauncher: Send + Sync {
    fn launch(&self) -> Result<Box<dyn PageSession>, HarvestError>;
}
