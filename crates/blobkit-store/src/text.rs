/// Placeholder shown to users instead of a blank value.
pub const NOT_PROVIDED: &str = "[VALUE NOT PROVIDED]";

/// `None` for missing or whitespace-only input.
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

pub fn user_friendly(text: Option<&str>) -> &str {
    non_blank(text).unwrap_or(NOT_PROVIDED)
}

/// Distinguishes missing, empty and blank values in diagnostics.
pub fn debug_display(text: Option<&str>) -> &str {
    match text {
        None => "[NULL]",
        Some("") => "[EMPTY TEXT]",
        Some(t) if t.trim().is_empty() => "[BLANK TEXT]",
        Some(t) => t,
    }
}
