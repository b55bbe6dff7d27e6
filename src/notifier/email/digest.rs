// HTML digest of newly found jobs
use crate::model::JobRecord;
use crate::utils::escape_html;
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub html: String,
    pub plain: String,
}

pub fn subject_for(count: usize) -> String {
    format!("New LinkedIn Jobs - {} New Posting(s)", count)
}

pub fn render_digest(
    jobs: &[JobRecord],
    recent_only: bool,
    generated_at: DateTime<Utc>,
) -> Result<Digest, fmt::Error> {
    let window = if recent_only { " (Past Hour)" } else { "" };
    let stamp = generated_at.format("%Y-%m-%d %H:%M UTC");

    let mut html = String::new();
    let mut plain = String::new();

    writeln!(html, "<html>\n<head></head>\n<body>")?;
    writeln!(html, "<h2>New LinkedIn Job Postings{window}</h2>")?;
    writeln!(html, "<p>Found <strong>{}</strong> new posting(s):</p>\n<ul>", jobs.len())?;
    writeln!(plain, "New LinkedIn Job Postings{window}\n\nFound {} new posting(s):\n", jobs.len())?;

    for (i, job) in jobs.iter().enumerate() {
        writeln!(html, "<li style=\"margin-bottom: 15px;\">")?;
        writeln!(html, "<strong>{}</strong><br>", escape_html(&job.title))?;
        writeln!(html, "<strong>Company:</strong> {}<br>", escape_html(&job.company))?;
        writeln!(plain, "{}. {}\n   Company: {}", i + 1, job.title, job.company)?;

        if job.has_location() {
            writeln!(html, "<strong>Location:</strong> {}<br>", escape_html(&job.location))?;
            writeln!(plain, "   Location: {}", job.location)?;
        }
        if job.has_time_posted() {
            writeln!(html, "<strong>Posted:</strong> {}<br>", escape_html(&job.time_posted))?;
            writeln!(plain, "   Posted: {}", job.time_posted)?;
        }
        writeln!(html, "<a href=\"{}\">View Job</a>\n</li>", escape_html(&job.link))?;
        writeln!(plain, "   {}\n", job.link)?;
    }

    writeln!(html, "</ul>\n<p>Happy job hunting!</p>")?;
    writeln!(html, "<p><small>Sent by job-sniper at {stamp}.</small></p>\n</body>\n</html>")?;
    writeln!(plain, "Happy job hunting!\nSent by job-sniper at {stamp}.")?;

    Ok(Digest {
        subject: subject_for(jobs.len()),
        html,
        plain,
    })
}
