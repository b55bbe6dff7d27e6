// Selector tables for LinkedIn job-search result pages

/// Anchors pointing at a job-detail page.
pub const JOB_LINK: &str = "a[href*='/jobs/view/']";

pub const JOB_VIEW_SEGMENT: &str = "/jobs/view/";

/// Containers used by the secondary harvest pass.
pub const JOB_CONTAINERS: &[&str] = &[
    "li.jobs-search-results__list-item",
    "div.job-search-card",
    "div.base-card",
    "div[data-job-id]",
    "div.job-result-card",
];

pub const TITLE: &[&str] = &[
    "h3.base-search-card__title",
    "h3.job-search-card__title",
    "h3.job-result-card__title",
    "h2.job-result-card__title",
    "h3[class*='title']",
    "h2[class*='title']",
    "a.job-search-card__title-link",
    "span.job-search-card__title",
    "h3",
    "h2",
];

pub const HEADINGS: &str = "h1, h2, h3, h4";

pub const TITLE_LIKE: &str =
    "span[class*='title'], div[class*='title'], span[aria-label], div[aria-label]";

pub const ARIA_LABELLED: &str = "[aria-label]";

pub const COMPANY: &[&str] = &[
    "h4.base-search-card__subtitle",
    "h4.job-search-card__subtitle",
    "a.job-search-card__subtitle-link",
    "h4[class*='subtitle']",
    "span[class*='company']",
    "div[class*='company']",
];

pub const LOCATION: &[&str] = &[
    "span.job-search-card__location",
    "span.base-search-card__metadata",
    "span[class*='location']",
    "div[class*='location']",
];

pub const TIME: &[&str] = &[
    "time.job-search-card__listdate",
    "time.job-search-card__listdate--new",
    "time[datetime]",
    "span.job-search-card__listdate",
];

pub const DATA_TITLE_ATTR: &str = "data-job-title";

/// Class-name fragments that mark an ancestor as the job card.
pub const CARD_MARKERS: &[&str] = &["job", "card", "result", "base-card"];

/// Class-name fragments accepted on `<li>` ancestors.
pub const LIST_ITEM_MARKERS: &[&str] = &["job", "result"];

/// How far up from an anchor the card search goes before giving up.
pub const MAX_CARD_HOPS: usize = 8;

/// Link or heading text that is never a title.
pub const BOILERPLATE: &[&str] = &["view job", "apply", "save"];

/// Lines containing any of these are skipped when guessing a title from
/// the card's full text.
pub const TITLE_LINE_STOPLIST: &[&str] = &[
    "view job", "apply", "save", "company", "location", "ago", "minute", "hour",
];
