// Read-only DOM query capability and its adapter over `scraper`
use scraper::{ElementRef, Selector};
use tracing::debug;

/// The tree queries the extractor is allowed to make.
///
/// Implementations must be cheap to clone; a node is a handle, not a copy
/// of the subtree.
pub trait DomNode: Clone {
    fn tag_name(&self) -> String;

    fn attr(&self, name: &str) -> Option<String>;

    /// Rendered text split into lines, one per block-level run, each
    /// whitespace-collapsed. Empty lines are dropped.
    fn text_lines(&self) -> Vec<String>;

    fn parent(&self) -> Option<Self>;

    /// First descendant matching a CSS selector.
    fn select_first(&self, selector: &str) -> Option<Self>;

    /// Every descendant matching a CSS selector, in document order.
    fn select_all(&self, selector: &str) -> Vec<Self>;

    /// Visible text on a single line.
    fn text(&self) -> String {
        self.text_lines().join(" ")
    }

    fn class_name(&self) -> String {
        self.attr("class").unwrap_or_default()
    }

    /// Walks up through at most `max_hops` ancestors and returns the first
    /// one accepted by `accept`.
    fn closest<F>(&self, max_hops: usize, accept: F) -> Option<Self>
    where
        F: Fn(&Self) -> bool,
    {
        let mut current = self.parent();
        for _ in 0..max_hops {
            let node = current?;
            if accept(&node) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

const HIDDEN_TAGS: &[&str] = &["head", "noscript", "script", "style", "template"];

/// `DomNode` over a parsed `scraper::Html` document.
#[derive(Clone, Copy)]
pub struct ScraperNode<'a>(pub ElementRef<'a>);

impl<'a> ScraperNode<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self(element)
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            debug!("Skipping invalid selector {:?}: {:?}", selector, e);
            None
        }
    }
}

fn flush_line(lines: &mut Vec<String>, current: &mut String) {
    let line = crate::utils::collapse_whitespace(current);
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}

fn push_lines(element: ElementRef<'_>, lines: &mut Vec<String>, current: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            current.push_str(text);
            continue;
        }
        let Some(el) = ElementRef::wrap(child) else {
            continue;
        };
        let name = el.value().name();
        if HIDDEN_TAGS.contains(&name) {
            continue;
        }
        if name == "br" {
            flush_line(lines, current);
            continue;
        }
        let block = BLOCK_TAGS.contains(&name);
        if block {
            flush_line(lines, current);
        }
        push_lines(el, lines, current);
        if block {
            flush_line(lines, current);
        }
    }
}

impl DomNode for ScraperNode<'_> {
    fn tag_name(&self) -> String {
        self.0.value().name().to_string()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }

    fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        push_lines(self.0, &mut lines, &mut current);
        flush_line(&mut lines, &mut current);
        lines
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(ScraperNode)
    }

    fn select_first(&self, selector: &str) -> Option<Self> {
        let sel = parse_selector(selector)?;
        self.0.select(&sel).next().map(ScraperNode)
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        match parse_selector(selector) {
            Some(sel) => self.0.select(&sel).map(ScraperNode).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const CARD: &str = r#"
        <ul>
          <li class="result">
            <div class="base-card job-search-card">
              <a class="base-card__full-link" href="/jobs/view/1">
                <span class="sr-only">Data   Analyst</span>
              </a>
              <div class="base-search-card__info">
                <h3 class="base-search-card__title">Data <b>Analyst</b></h3>
                <h4 class="base-search-card__subtitle">Acme</h4>
                <time datetime="2026-10-18">3 minutes ago</time>
                <script>var x = 1;</script>
              </div>
            </div>
          </li>
        </ul>"#;

    #[test]
    fn text_lines_follow_block_structure() {
        let doc = Html::parse_document(CARD);
        let root = ScraperNode::new(doc.root_element());
        let card = root.select_first("div.base-card").unwrap();
        assert_eq!(
            card.text_lines(),
            vec!["Data Analyst", "Data Analyst", "Acme", "3 minutes ago"]
        );
        let title = card.select_first("h3").unwrap();
        assert_eq!(title.text(), "Data Analyst");
    }

    #[test]
    fn closest_walks_up_within_hop_limit() {
        let doc = Html::parse_document(CARD);
        let root = ScraperNode::new(doc.root_element());
        let anchor = root.select_first("a").unwrap();

        let li = anchor.closest(5, |n| n.tag_name() == "li").unwrap();
        assert_eq!(li.class_name(), "result");
        assert!(anchor.closest(1, |n| n.tag_name() == "li").is_none());
    }

    #[test]
    fn invalid_selector_matches_nothing() {
        let doc = Html::parse_document(CARD);
        let root = ScraperNode::new(doc.root_element());
        assert!(root.select_first("h3[[").is_none());
        assert!(root.select_all("h3[[").is_empty());
    }
}
