use serde::{Deserialize, Serialize};
use std::fmt;

/// Edit budget for a title, proportional to its length.
///
/// `threshold = round_half_up(max_error_ratio * len)`, with the length taken
/// in grapheme clusters. Titles shorter than `min_title_len` are never
/// matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub max_error_ratio: f64,
    pub min_title_len: usize,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            max_error_ratio: 0.1,
            min_title_len: 1,
        }
    }
}

impl Tolerance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_error_ratio(mut self, ratio: f64) -> Self {
        self.max_error_ratio = ratio;
        self
    }

    pub fn min_title_len(mut self, len: usize) -> Self {
        self.min_title_len = len;
        self
    }

    /// Maximum accepted edit distance for a title of `title_len` graphemes.
    ///
    /// ```rust
    /// use fuzzy_toc_segmenter::Tolerance;
    ///
    /// let t = Tolerance::default();
    /// assert_eq!(t.threshold(4), 0);
    /// assert_eq!(t.threshold(5), 1);
    /// assert_eq!(t.threshold(12), 1);
    /// assert_eq!(t.threshold(15), 2);
    /// ```
    #[inline]
    pub fn threshold(&self, title_len: usize) -> usize {
        (self.max_error_ratio * title_len as f64 + 0.5).floor() as usize
    }

    #[inline]
    pub fn accepts(&self, distance: usize, title_len: usize) -> bool {
        title_len >= self.min_title_len && distance <= self.threshold(title_len)
    }
}

/// Best window found by [`Segmenter::locate`](crate::Segmenter::locate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Edit distance between the window and the title.
    pub distance: usize,
    /// Title length in grapheme clusters.
    pub title_len: usize,
    /// Inclusive start byte index of the window.
    pub start: usize,
    /// Exclusive end byte index of the window.
    pub end: usize,
}

/// Opaque per-document metadata, copied into every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: String,
    pub topic: String,
    pub language: String,
}

impl DocumentMeta {
    pub fn new(
        title: impl Into<String>,
        topic: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            topic: topic.into(),
            language: language.into(),
        }
    }
}

/// One output section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Document title.
    pub title: String,
    /// Document identifier, usually the file name.
    pub topic: String,
    pub language: String,
    /// Section content, without its title.
    pub text: String,
    /// The matched section title.
    pub paragraph: String,
}

/// Everything a finished session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub meta: DocumentMeta,
    /// Sections in discovery order: the last section of the document first.
    pub sections: Vec<SectionRecord>,
    /// Content preceding the first matched title, in reading order.
    pub front_matter: String,
    /// Titles never found, in reading order.
    pub unmatched_titles: Vec<String>,
    /// Titles dropped before the scan as too short to locate.
    pub rejected_titles: Vec<String>,
}

impl Segmentation {
    /// Sections in document order.
    #[must_use]
    pub fn into_reading_order(self) -> Vec<SectionRecord> {
        let mut sections = self.sections;
        sections.reverse();
        sections
    }

    /// Wraps the discarded front matter into a record labelled `label`.
    ///
    /// Returns `None` when there is no non-blank front matter.
    pub fn front_matter_record(&self, label: &str) -> Option<SectionRecord> {
        if self.front_matter.trim().is_empty() {
            return None;
        }
        Some(SectionRecord {
            title: self.meta.title.clone(),
            topic: self.meta.topic.clone(),
            language: self.meta.language.clone(),
            text: self.front_matter.clone(),
            paragraph: label.to_owned(),
        })
    }
}

/// Serializable knobs of a [`Segmenter`](crate::Segmenter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Tolerated edits per title grapheme. Default: 0.1.
    pub max_error_ratio: f64,
    /// Shortest title, in graphemes after trimming, worth searching. Default: 1.
    pub min_title_len: usize,
    /// Compare grapheme-wise lowercased text. Default: false.
    pub case_insensitive: bool,
    /// TOC entries up to and including this one are dropped. Default: none.
    pub toc_marker: Option<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        let tolerance = Tolerance::default();
        Self {
            max_error_ratio: tolerance.max_error_ratio,
            min_title_len: tolerance.min_title_len,
            case_insensitive: false,
            toc_marker: None,
        }
    }
}

/// Immutable segmentation engine. Build it with
/// [`SegmenterBuilder`](crate::SegmenterBuilder).
pub struct Segmenter {
    pub(crate) tolerance: Tolerance,
    pub(crate) case_insensitive: bool,
    pub(crate) toc_marker: Option<String>,
}

impl fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = &mut f.debug_struct("Segmenter");
        s = s.field("tolerance", &self.tolerance);
        if self.case_insensitive {
            s = s.field("case_insensitive", &self.case_insensitive);
        }
        if let Some(marker) = &self.toc_marker {
            s = s.field("toc_marker", marker);
        }
        s.finish()
    }
}
