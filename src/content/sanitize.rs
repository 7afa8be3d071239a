use regex::Regex;
use std::borrow::Cow;

lazy_static::lazy_static! {
    // Non-greedy, and `.` stops at newlines, so bold spans never cross lines.
    static ref BOLD_MARKUP: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
}

/// Strip `**bold**` markup from a model reply, keeping the inner text verbatim.
///
/// Returns the input borrowed when there is nothing to strip.
pub fn sanitize(raw: &str) -> Cow<'_, str> {
    BOLD_MARKUP.replace_all(raw, "${1}")
}
