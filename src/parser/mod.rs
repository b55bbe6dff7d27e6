pub mod dom;
pub mod job_card;
pub mod selectors;
pub mod slug;

pub use dom::{DomNode, ScraperNode};
pub use job_card::{ElementContext, extract};
