// Field extraction for a single job card or job anchor
//
// Every field is filled by an ordered list of strategies; the first one to
// return a non-empty value wins and a placeholder covers the rest.
use super::dom::DomNode;
use super::selectors as sel;
use super::slug::parse_slug;
use crate::model::{COMPANY_NOT_FOUND, JobRecord, TITLE_NOT_FOUND, UNKNOWN};
use crate::utils::{collapse_whitespace, resolve_href};

/// What the extractor can see for one candidate listing.
#[derive(Clone)]
pub struct ElementContext<N: DomNode> {
    pub anchor: Option<N>,
    pub card: Option<N>,
    link: String,
}

type Strategy<N> = fn(&ElementContext<N>) -> Option<String>;

impl<N: DomNode> ElementContext<N> {
    /// Context for a job link found directly on the page; the card is the
    /// nearest ancestor that looks like a listing container.
    pub fn from_anchor(anchor: N, page_url: &str) -> Self {
        let card = resolve_card(&anchor);
        Self::build(Some(anchor), card, page_url)
    }

    /// Context for a listing container; the anchor is its inner job link.
    pub fn from_card(card: N, page_url: &str) -> Self {
        let anchor = card.select_first(sel::JOB_LINK);
        Self::build(anchor, Some(card), page_url)
    }

    fn build(anchor: Option<N>, card: Option<N>, page_url: &str) -> Self {
        let href = anchor
            .as_ref()
            .and_then(|a| a.attr("href"))
            .or_else(|| card.as_ref().and_then(|c| c.attr("href")))
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        let link = match href {
            Some(h) => resolve_href(page_url, &h),
            None => page_url.to_string(),
        };
        Self {
            anchor,
            card,
            link,
        }
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    fn anchor_text(&self) -> Option<String> {
        self.anchor.as_ref().map(|a| a.text())
    }
}

/// The card scope for an anchor.
///
/// A block-level container (`div`, `article`, `section`) with a card marker
/// wins over a marked `<li>`, even when the list item is closer. Without
/// either, the immediate parent is used.
pub fn resolve_card<N: DomNode>(anchor: &N) -> Option<N> {
    anchor
        .closest(sel::MAX_CARD_HOPS, is_block_card)
        .or_else(|| anchor.closest(sel::MAX_CARD_HOPS, is_list_card))
        .or_else(|| anchor.parent())
}

fn has_marker<N: DomNode>(node: &N, markers: &[&str]) -> bool {
    let class = node.class_name().to_lowercase();
    markers.iter().any(|m| class.contains(m))
}

fn is_block_card<N: DomNode>(node: &N) -> bool {
    matches!(node.tag_name().as_str(), "div" | "article" | "section")
        && has_marker(node, sel::CARD_MARKERS)
}

fn is_list_card<N: DomNode>(node: &N) -> bool {
    node.tag_name() == "li" && has_marker(node, sel::LIST_ITEM_MARKERS)
}

pub fn extract<N: DomNode>(ctx: &ElementContext<N>) -> JobRecord {
    JobRecord {
        title: first_match(ctx, &title_strategies()).unwrap_or_else(|| TITLE_NOT_FOUND.into()),
        company: first_match(ctx, &company_strategies())
            .unwrap_or_else(|| COMPANY_NOT_FOUND.into()),
        location: first_match(ctx, &[location_from_card as Strategy<N>])
            .unwrap_or_else(|| UNKNOWN.into()),
        link: ctx.link.clone(),
        time_posted: first_match(ctx, &time_strategies()).unwrap_or_else(|| UNKNOWN.into()),
    }
}

fn first_match<N: DomNode>(ctx: &ElementContext<N>, strategies: &[Strategy<N>]) -> Option<String> {
    strategies
        .iter()
        .filter_map(|strategy| strategy(ctx))
        .map(|value| collapse_whitespace(&value))
        .find(|value| !value.is_empty())
}

fn title_strategies<N: DomNode>() -> [Strategy<N>; 6] {
    [
        title_from_slug,
        title_from_anchor_text,
        title_from_card_selectors,
        title_from_aria_label,
        title_from_card_lines,
        title_from_data_attribute,
    ]
}

fn company_strategies<N: DomNode>() -> [Strategy<N>; 2] {
    [company_from_slug, company_from_card]
}

fn time_strategies<N: DomNode>() -> [Strategy<N>; 2] {
    [time_from_element, time_from_ago_line]
}

fn long_enough(text: &str) -> bool {
    text.chars().count() > 3
}

fn is_boilerplate(text: &str) -> bool {
    sel::BOILERPLATE.contains(&text.to_lowercase().as_str())
}

fn title_from_slug<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    parse_slug(&ctx.link).title
}

fn title_from_anchor_text<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    ctx.anchor_text()
        .filter(|t| long_enough(t) && t.to_lowercase() != "view job")
}

fn title_from_card_selectors<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    let card = ctx.card.as_ref()?;
    let link_text = ctx.anchor_text().unwrap_or_default();
    let differs = |t: &String| long_enough(t) && *t != link_text;

    sel::TITLE
        .iter()
        .filter_map(|s| card.select_first(s))
        .map(|el| el.text())
        .find(|t| differs(t) && !is_boilerplate(t))
        .or_else(|| {
            card.select_all(sel::HEADINGS)
                .into_iter()
                .map(|el| el.text())
                .find(|t| differs(t))
        })
        .or_else(|| {
            card.select_all(sel::TITLE_LIKE)
                .into_iter()
                .map(|el| el.text())
                .find(|t| differs(t) && !is_boilerplate(t))
        })
}

fn title_from_aria_label<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    let own = ctx
        .anchor
        .as_ref()
        .and_then(|a| a.attr("aria-label"))
        .filter(|l| long_enough(l.trim()));
    if own.is_some() {
        return own;
    }
    ctx.card
        .as_ref()?
        .select_all(sel::ARIA_LABELLED)
        .into_iter()
        .filter_map(|el| el.attr("aria-label"))
        .find(|l| long_enough(l.trim()) && l.to_lowercase().contains("job"))
}

fn title_from_card_lines<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    ctx.card.as_ref()?.text_lines().into_iter().find(|line| {
        let lower = line.to_lowercase();
        long_enough(line) && !sel::TITLE_LINE_STOPLIST.iter().any(|s| lower.contains(s))
    })
}

fn title_from_data_attribute<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    ctx.card.as_ref()?.attr(sel::DATA_TITLE_ATTR)
}

fn company_from_slug<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    parse_slug(&ctx.link).company
}

fn company_from_card<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    let card = ctx.card.as_ref()?;
    sel::COMPANY
        .iter()
        .filter_map(|s| card.select_first(s))
        .map(|el| el.text())
        .find(|t| t.chars().count() > 1)
}

fn location_from_card<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    let card = ctx.card.as_ref()?;
    sel::LOCATION
        .iter()
        .filter_map(|s| card.select_first(s))
        .map(|el| el.text())
        .find(|t| !t.is_empty())
}

fn time_from_element<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    let card = ctx.card.as_ref()?;
    sel::TIME.iter().filter_map(|s| card.select_first(s)).find_map(|el| {
        let text = el.text();
        if text.is_empty() {
            el.attr("datetime").filter(|d| !d.trim().is_empty())
        } else {
            Some(text)
        }
    })
}

fn time_from_ago_line<N: DomNode>(ctx: &ElementContext<N>) -> Option<String> {
    ctx.card
        .as_ref()?
        .text_lines()
        .into_iter()
        .find(|line| line.to_lowercase().contains("ago"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dom::ScraperNode;
    use scraper::Html;

    const PAGE: &str = "https://www.linkedin.com/jobs/search/?keywords=intern";

    fn extract_first_anchor(html: &str) -> JobRecord {
        let doc = Html::parse_document(html);
        let root = ScraperNode::new(doc.root_element());
        let anchor = root.select_first("a").expect("fixture has an anchor");
        extract(&ElementContext::from_anchor(anchor, PAGE))
    }

    #[test]
    fn guest_card_uses_slug_and_card_fields() {
        let record = extract_first_anchor(
            r#"<ul><li>
              <div class="base-card job-search-card">
                <a class="base-card__full-link"
                   href="https://www.linkedin.com/jobs/view/software-engineer-intern-at-docusign-4322361530?refId=abc">
                  <span class="sr-only">Software Engineer Intern</span>
                </a>
                <div class="base-search-card__info">
                  <h3 class="base-search-card__title">Software Engineer Intern</h3>
                  <h4 class="base-search-card__subtitle"><a>DocuSign</a></h4>
                  <div class="base-search-card__metadata">
                    <span class="job-search-card__location">San Francisco, CA</span>
                    <time class="job-search-card__listdate--new" datetime="2026-10-18">
                      12 minutes ago
                    </time>
                  </div>
                </div>
              </div>
            </li></ul>"#,
        );

        assert_eq!(record.title, "Software Engineer Intern");
        assert_eq!(record.company, "Docusign");
        assert_eq!(record.location, "San Francisco, CA");
        assert_eq!(record.time_posted, "12 minutes ago");
        assert_eq!(
            record.link,
            "https://www.linkedin.com/jobs/view/software-engineer-intern-at-docusign-4322361530?refId=abc"
        );
    }

    #[test]
    fn bare_fragment_degrades_to_placeholders() {
        let record = extract_first_anchor("<div><a>ok</a></div>");

        assert_eq!(record.link, PAGE);
        assert_eq!(record.title, TITLE_NOT_FOUND);
        assert_eq!(record.company, COMPANY_NOT_FOUND);
        assert_eq!(record.location, UNKNOWN);
        assert_eq!(record.time_posted, UNKNOWN);
    }

    #[test]
    fn anchor_text_used_when_slug_has_no_words() {
        let record = extract_first_anchor(
            r#"<div class="job-card"><a href="/jobs/view/4322361530/">Senior Rust Engineer</a></div>"#,
        );
        assert_eq!(record.title, "Senior Rust Engineer");
        assert_eq!(record.link, "https://www.linkedin.com/jobs/view/4322361530/");
    }

    #[test]
    fn view_job_text_falls_through_to_card_heading() {
        let record = extract_first_anchor(
            r#"<div class="job-result-card">
                 <h2>Platform Engineer</h2>
                 <span class="company-name">Initech</span>
                 <a href="/jobs/view/99">View job</a>
               </div>"#,
        );
        assert_eq!(record.title, "Platform Engineer");
        assert_eq!(record.company, "Initech");
    }

    #[test]
    fn aria_label_is_used_before_card_text() {
        let record = extract_first_anchor(
            r#"<div class="card"><a href="/jobs/view/5" aria-label="Firmware Engineer">go</a></div>"#,
        );
        assert_eq!(record.title, "Firmware Engineer");

        let record = extract_first_anchor(
            r#"<div class="card">
                 <a href="/jobs/view/6">go</a>
                 <button aria-label="Save the Machine Learning job">x</button>
               </div>"#,
        );
        assert_eq!(record.title, "Save the Machine Learning job");
    }

    #[test]
    fn first_clean_card_line_skips_boilerplate() {
        let record = extract_first_anchor(
            r#"<div class="result-item">
                 <p>Apply now</p>
                 <p>Posted 2 hours ago</p>
                 <p>Backend Platform Engineer</p>
                 <a href="/jobs/view/7">go</a>
               </div>"#,
        );
        assert_eq!(record.title, "Backend Platform Engineer");
        assert_eq!(record.time_posted, "Posted 2 hours ago");
    }

    #[test]
    fn data_attribute_is_last_resort() {
        let record = extract_first_anchor(
            r#"<div class="job-tile" data-job-title="Site Reliability Engineer">
                 <span>3 hours ago</span>
                 <a href="/jobs/view/8">go</a>
               </div>"#,
        );
        assert_eq!(record.title, "Site Reliability Engineer");
    }

    #[test]
    fn time_falls_back_to_datetime_attribute() {
        let record = extract_first_anchor(
            r#"<div class="job-card">
                 <a href="/jobs/view/data-engineer-at-acme-1">Data Engineer</a>
                 <time datetime="2026-10-18T08:00:00Z"></time>
               </div>"#,
        );
        assert_eq!(record.time_posted, "2026-10-18T08:00:00Z");
        assert_eq!(record.company, "Acme");
    }

    #[test]
    fn card_resolution_falls_back_to_parent() {
        let doc = Html::parse_document(
            r#"<section><p class="wrapper"><a href="/jobs/view/1">x</a></p></section>"#,
        );
        let root = ScraperNode::new(doc.root_element());
        let anchor = root.select_first("a").unwrap();
        let card = resolve_card(&anchor).unwrap();
        assert_eq!(card.tag_name(), "p");
    }

    #[test]
    fn list_item_card_needs_job_or_result_class() {
        let doc = Html::parse_document(
            r#"<div class="wrap"><ul><li class="card-ish"><span><a href="/jobs/view/1">x</a></span></li></ul></div>"#,
        );
        let root = ScraperNode::new(doc.root_element());
        let anchor = root.select_first("a").unwrap();
        assert_eq!(resolve_card(&anchor).unwrap().tag_name(), "span");

        let doc = Html::parse_document(
            r#"<ul><li class="jobs-search-results__list-item"><span><a href="/jobs/view/1">x</a></span></li></ul>"#,
        );
        let root = ScraperNode::new(doc.root_element());
        let anchor = root.select_first("a").unwrap();
        assert_eq!(
            resolve_card(&anchor).unwrap().class_name(),
            "jobs-search-results__list-item"
        );
    }

    #[test]
    fn enclosing_div_card_wins_over_nearer_list_item() {
        let html = r#"<div class="job-card">
                 <h3>Outer Title Here</h3>
                 <ul><li class="result-row"><a href="/jobs/view/1">go</a></li></ul>
               </div>"#;
        let doc = Html::parse_document(html);
        let root = ScraperNode::new(doc.root_element());
        let anchor = root.select_first("a").unwrap();
        assert_eq!(resolve_card(&anchor).unwrap().class_name(), "job-card");

        let record = extract_first_anchor(html);
        assert_eq!(record.title, "Outer Title Here");
    }

    #[test]
    fn from_card_reads_inner_link() {
        let doc = Html::parse_document(
            r#"<div data-job-id="42"><h3>Compiler Engineer</h3><a href="/jobs/view/42?x=1">View job</a></div>"#,
        );
        let root = ScraperNode::new(doc.root_element());
        let card = root.select_first("div[data-job-id]").unwrap();
        let record = extract(&ElementContext::from_card(card, PAGE));
        assert_eq!(record.title, "Compiler Engineer");
        assert_eq!(record.link, "https://www.linkedin.com/jobs/view/42?x=1");
    }
}
