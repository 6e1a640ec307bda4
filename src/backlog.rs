use crate::normalize::collapse_whitespace;
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

/// LIFO of titles still to be found.
///
/// The top is always the next title expected during the back-to-front scan,
/// i.e. the one nearest the end of the document. Titles are whitespace
/// normalized on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleBacklog {
    /// Top of the stack is the last element.
    stack: Vec<String>,
    rejected: Vec<String>,
}

impl TitleBacklog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a backlog from titles in document (reading) order, so the last
    /// title ends up on top.
    ///
    /// ```rust
    /// use fuzzy_toc_segmenter::TitleBacklog;
    ///
    /// let backlog = TitleBacklog::from_reading_order(["Intro", "Methods"]);
    /// assert_eq!(backlog.peek(), Some("Methods"));
    /// ```
    pub fn from_reading_order<T>(titles: impl IntoIterator<Item = T>) -> Self
    where
        T: AsRef<str>,
    {
        Self {
            stack: titles
                .into_iter()
                .map(|t| collapse_whitespace(t.as_ref()))
                .collect(),
            rejected: Vec::new(),
        }
    }

    /// Builds a backlog from titles already in search order: the first item
    /// is searched for first.
    pub fn from_search_order<T>(titles: impl IntoIterator<Item = T>) -> Self
    where
        T: AsRef<str>,
    {
        let mut backlog = Self::from_reading_order(titles);
        backlog.stack.reverse();
        backlog
    }

    /// Builds a backlog from a table of contents in reading order. When
    /// `marker` is given, every entry up to and including the first entry equal
    /// to it is dropped; if the marker never occurs the backlog is empty.
    pub fn from_toc<T>(entries: impl IntoIterator<Item = T>, marker: Option<&str>) -> Self
    where
        T: AsRef<str>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|t| collapse_whitespace(t.as_ref()))
            .collect();
        let skip = match marker {
            Some(marker) => {
                let marker = collapse_whitespace(marker);
                entries
                    .iter()
                    .position(|e| e.trim() == marker.trim())
                    .map_or(entries.len(), |i| i + 1)
            }
            None => 0,
        };
        Self {
            stack: entries.into_iter().skip(skip).collect(),
            rejected: Vec::new(),
        }
    }

    /// Places `title` on top, making it the next one searched for.
    pub fn push(&mut self, title: &str) {
        self.stack.push(collapse_whitespace(title));
    }

    #[inline]
    pub fn peek(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    #[inline]
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Titles dropped as too short to be located.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Remaining titles in reading order.
    pub fn into_reading_order(self) -> Vec<String> {
        self.stack
    }

    /// Drops titles with fewer than `min_len` graphemes once trimmed. A blank
    /// title would match a zero-length window everywhere.
    pub(crate) fn reject_shorter_than(&mut self, min_len: usize) {
        let rejected = &mut self.rejected;
        self.stack.retain(|title| {
            if title.trim().graphemes(true).count() >= min_len {
                true
            } else {
                warn!(title = %title, min_len, "dropping degenerate title");
                rejected.push(title.clone());
                false
            }
        });
    }
}
