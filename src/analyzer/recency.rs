// One-hour recency window over free-text posting times ("2 hours ago")

/// Whether a relative posting time falls inside the most recent hour.
///
/// Only "1 hour ago" counts among hour-granular values; anything phrased in
/// minutes or as "now" is always inside the window.
pub fn is_within_window(time_text: &str) -> bool {
    let text = time_text.trim().to_lowercase();

    if text.contains("hour ago") || text.contains("hours ago") {
        let mut tokens = text.split_whitespace();
        if let (Some(first), Some(_)) = (tokens.next(), tokens.next()) {
            if let Ok(n) = first.parse::<u32>() {
                return n == 1;
            }
        }
    }

    if text.contains("minute") {
        return true;
    }

    text.contains("just now") || text.split(|c: char| !c.is_alphanumeric()).any(|w| w == "now")
}
