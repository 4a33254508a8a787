//! Reading-time estimation

/// Estimate reading time for a markdown body, e.g. "4 min read".
///
/// Words are whitespace-separated tokens of the raw body; the estimate is
/// rounded up and never below one minute.
pub fn reading_time(body: &str, words_per_minute: usize) -> String {
    let wpm = words_per_minute.max(1);
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(wpm).max(1);
    format!("{} min read", minutes)
}
