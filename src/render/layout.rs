// Plain-text layout shared by the console and plain renderers

use crate::json::truncate_str;

/// Apply the renderer's string length limit
pub(super) fn limit(text: &str, max_str_len: Option<usize>) -> String {
    match max_str_len {
        Some(max) => truncate_str(text, max),
        None => text.to_string(),
    }
}

/// Left-pad `text` so it sits in the middle of `width` columns
pub(super) fn centered(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

pub(super) fn rule(symbol: char, width: usize) -> String {
    std::iter::repeat_n(symbol, width).collect()
}
