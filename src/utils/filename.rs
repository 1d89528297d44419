/// Reduce a backend-supplied file name to a safe basename ending in `.pdf`.
///
/// Returns `None` when nothing usable is left, so callers can fall back to a
/// generated name.
pub fn safe_pdf_filename(raw: &str) -> Option<String> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        return None;
    }
    if cleaned.to_lowercase().ends_with(".pdf") {
        Some(cleaned)
    } else {
        Some(format!("{}.pdf", cleaned))
    }
}
