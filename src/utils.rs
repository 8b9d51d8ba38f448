pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Truncate display text, appending an ellipsis when it was cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}
