// Analyzer module: filters applied to harvested records before notification.

pub mod recency;

pub use recency::is_within_window;
