pub mod identity;
pub mod json_store;
pub mod seen;

pub use identity::IdStrategy;
pub use json_store::JsonSeenStore;
pub use seen::SeenSet;
