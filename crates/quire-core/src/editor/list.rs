//! Ordered-collection primitives shared by every editing operation.
//!
//! Each primitive reports whether it changed anything; out-of-range
//! positions and blank text are rejected rather than raised as errors.

/// Collapses every whitespace run in `text` (line breaks included) to one
/// space and returns the result when something is left.
pub fn clean_text(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    (!words.is_empty()).then(|| words.join(" "))
}

/// Trims `text`, keeping its inner line breaks.
pub fn clean_paragraph(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Appends the cleaned single-line `text` to `items`.
pub fn push_text(items: &mut Vec<String>, text: &str) -> bool {
    match clean_text(text) {
        Some(text) => {
            items.push(text);
            true
        }
        None => false,
    }
}

/// Replaces the entry at `index` with the cleaned single-line `text`.
pub fn replace_text(items: &mut [String], index: usize, text: &str) -> bool {
    match (items.get_mut(index), clean_text(text)) {
        (Some(slot), Some(text)) => {
            *slot = text;
            true
        }
        _ => false,
    }
}

/// Removes and returns the entry at `index`, if any.
pub fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

/// Relocates one entry from `from` to `to`, keeping the relative order of
/// every other entry.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}
