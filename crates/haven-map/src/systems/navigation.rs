//! Page links: system drill-down and photo hrefs.

/// File-name-safe form of a display name.
///
/// Keeps ASCII letters, digits, space, `-` and `_`; every other character
/// becomes `_`. The result is trimmed and its spaces turned into `_`.
pub fn slug(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    mapped.trim().replace(' ', "_")
}

/// Page that shows a single system.
pub fn system_page(name: &str) -> String {
    format!("system_{}.html", slug(name))
}

/// Resolve a photo path against the hosting page.
///
/// Absolute URLs and root-relative paths pass through. Pages served from a
/// `/dist/` directory look one level up. Empty paths have no link.
pub fn resolve_photo_href(photo: &str, page_path: &str) -> Option<String> {
    if photo.is_empty() {
        return None;
    }
    let lower = photo.get(..6).unwrap_or(photo).to_ascii_lowercase();
    if lower.starts_with("http:") || lower.starts_with("https:") || photo.starts_with('/') {
        return Some(photo.to_string());
    }
    if page_path.replace('\\', "/").contains("/dist/") {
        return Some(format!("../{}", photo.trim_start_matches('/')));
    }
    Some(photo.to_string())
}
