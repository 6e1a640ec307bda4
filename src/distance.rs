use unicode_segmentation::UnicodeSegmentation;

/// Levenshtein distance between two unit sequences.
///
/// Uses a single rolling row sized after the shorter input, so memory stays
/// `O(min(a, b))`.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lu) in long.iter().enumerate() {
        // row[0] before overwrite is the diagonal for j = 0
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, su) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(lu != su);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[short.len()]
}

/// Edit distance between two strings, counted in extended grapheme clusters.
///
/// ```rust
/// use fuzzy_toc_segmenter::distance;
///
/// assert_eq!(distance("kitten", "sitting"), 3);
/// assert_eq!(distance("", "Größe"), 5);
/// ```
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<&str> = a.graphemes(true).collect();
    let b: Vec<&str> = b.graphemes(true).collect();
    levenshtein(&a, &b)
}
