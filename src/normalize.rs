/// Collapses every run of whitespace into a single ASCII space.
///
/// Leading and trailing runs are collapsed as well, not trimmed, so page text
/// keeps one separator where it met the page edge and concatenated pages do
/// not glue words together. Titles and page text go through the same
/// function so that they compare like for like.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                normalized.push(' ');
                in_run = true;
            }
        } else {
            normalized.push(c);
            in_run = false;
        }
    }
    normalized
}
