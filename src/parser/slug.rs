// Title/company parsing from job-detail URL slugs
//
// LinkedIn detail links look like
// `/jobs/view/software-engineer-intern-at-docusign-4322361530`.
use super::selectors::JOB_VIEW_SEGMENT;
use crate::utils::title_case;

const COMPANY_SEPARATOR: &str = "-at-";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlugParts {
    pub title: Option<String>,
    pub company: Option<String>,
}

/// The path segment right after `/jobs/view/`, without query string.
pub fn job_view_segment(link: &str) -> Option<&str> {
    let (_, rest) = link.split_once(JOB_VIEW_SEGMENT)?;
    let segment = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if segment.is_empty() { None } else { Some(segment) }
}

fn strip_job_id(slug: &str) -> &str {
    match slug.rsplit_once('-') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => slug,
    }
}

fn words(part: &str) -> String {
    title_case(&part.replace('-', " ")).trim().to_string()
}

/// Splits a slug into a title part and a company part.
///
/// The title is kept only when longer than three characters and the
/// company only when longer than one.
pub fn parse_slug(link: &str) -> SlugParts {
    let Some(segment) = job_view_segment(link) else {
        return SlugParts::default();
    };
    let slug = strip_job_id(segment);

    let lower = slug.to_ascii_lowercase();
    let (title_part, company_part) = match lower.rfind(COMPANY_SEPARATOR) {
        Some(idx) => (&slug[..idx], Some(&slug[idx + COMPANY_SEPARATOR.len()..])),
        None => (slug, None),
    };

    let title = Some(words(title_part))
        .filter(|t| t.chars().count() > 3 && t.chars().any(char::is_alphabetic));
    let company = company_part
        .map(words)
        .filter(|c| c.chars().count() > 1);

    SlugParts { title, company }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_and_company() {
        let parts = parse_slug(
            "https://www.linkedin.com/jobs/view/software-engineer-intern-at-docusign-4322361530",
        );
        assert_eq!(parts.title.as_deref(), Some("Software Engineer Intern"));
        assert_eq!(parts.company.as_deref(), Some("Docusign"));
    }

    #[test]
    fn splits_on_last_separator_and_ignores_query() {
        let parts = parse_slug(
            "https://www.linkedin.com/jobs/view/head-of-at-risk-programs-at-big-bank-77?refId=x",
        );
        assert_eq!(parts.title.as_deref(), Some("Head Of At Risk Programs"));
        assert_eq!(parts.company.as_deref(), Some("Big Bank"));
    }

    #[test]
    fn slug_without_company() {
        let parts = parse_slug("https://www.linkedin.com/jobs/view/backend-developer-123/");
        assert_eq!(parts.title.as_deref(), Some("Backend Developer"));
        assert_eq!(parts.company, None);
    }

    #[test]
    fn numeric_only_segment_yields_nothing_useful() {
        let parts = parse_slug("https://www.linkedin.com/jobs/view/4322361530/");
        assert_eq!(parts.title, None);
        assert_eq!(parts.company, None);
    }

    #[test]
    fn short_parts_are_rejected() {
        let parts = parse_slug("/jobs/view/qa-at-x-99");
        assert_eq!(parts, SlugParts::default());
    }

    #[test]
    fn non_job_links_have_no_slug() {
        assert_eq!(job_view_segment("https://www.linkedin.com/company/acme"), None);
        assert_eq!(parse_slug("https://www.linkedin.com/company/acme"), SlugParts::default());
    }
}
