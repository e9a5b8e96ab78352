//! Text transforms applied while rendering user content.

/// Escapes Markdown emphasis underscores.
///
/// Applied at render time only; stored text is never escaped.
pub fn escape_markdown(text: &str) -> String {
    text.replace('_', "\\_")
}

/// Joins the words of `text` with single spaces so that a list entry or
/// heading never spills onto a second line.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Backtick fence longer than any backtick run inside `code`.
pub fn code_fence(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Bolds every parenthesized span: `(x)` becomes `(**x**)`.
///
/// A span runs from an opening parenthesis to the next closing one; empty
/// spans and unmatched parentheses are left alone.
pub fn bold_parentheses(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        out.push_str(&rest[..=open]);
        rest = &rest[open + 1..];
        match rest.find(')') {
            Some(close) if close > 0 => {
                out.push_str("**");
                out.push_str(&rest[..close]);
                out.push_str("**)");
                rest = &rest[close + 1..];
            }
            _ => {}
        }
    }
    out.push_str(rest);
    out
}

/// Non-empty lines of `impact`, without any bullet marker already typed.
pub fn impact_bullets(impact: &str) -> impl Iterator<Item = &str> {
    impact
        .lines()
        .map(str::trim)
        .map(|line| line.strip_prefix("- ").map(str::trim_start).unwrap_or(line))
        .filter(|line| !line.is_empty() && *line != "-")
}

/// Ordinal used for divider stages (`1ª Etapa`).
pub fn stage_label(number: usize) -> String {
    format!("{number}ª Etapa")
}
