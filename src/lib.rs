//! Splits the extracted text of a document into sections by fuzzy-matching
//! the titles of its table of contents.
//!
//! Pages are consumed back to front. On each page the next expected title
//! (the one nearest the end of the document) is located with an edit-distance
//! sliding window; everything after it becomes that section's text, and the
//! search continues on the text in front of it.
//!
//! ```rust
//! use fuzzy_toc_segmenter::{DocumentMeta, SegmenterBuilder};
//!
//! let segmenter = SegmenterBuilder::new().build().unwrap();
//! let backlog = segmenter.backlog(["Intro", "Methods"]);
//! let result = segmenter
//!     .segment(
//!         DocumentMeta::new("Report", "report.pdf", "en"),
//!         backlog,
//!         ["noise Intro content one Methods content two"],
//!     )
//!     .unwrap();
//!
//! assert_eq!(result.sections[0].paragraph, "Methods");
//! assert_eq!(result.sections[0].text, " content two");
//! assert_eq!(result.sections[1].paragraph, "Intro");
//! assert_eq!(result.sections[1].text, " content one");
//! assert_eq!(result.front_matter, "noise");
//! ```

mod backlog;
mod builder;
mod distance;
mod error;
pub mod input;
mod normalize;
mod session;
mod structs;

pub use backlog::TitleBacklog;
pub use builder::SegmenterBuilder;
pub use distance::{distance, levenshtein};
pub use error::{Result, SegmentError};
pub use normalize::collapse_whitespace;
pub use session::Session;
pub use structs::*;

use std::borrow::Cow;
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

/// Rounds `offset` down to the start of the grapheme cluster containing it.
///
/// Returns `None` when `offset` lies past the end of `text`.
///
/// ```rust
/// use fuzzy_toc_segmenter::floor_boundary;
///
/// let text = "Maße";
/// assert_eq!(floor_boundary(text, 3), Some(2)); // inside "ß"
/// assert_eq!(floor_boundary(text, text.len()), Some(text.len()));
/// assert_eq!(floor_boundary(text, 99), None);
/// ```
pub fn floor_boundary(text: &str, offset: usize) -> Option<usize> {
    if offset > text.len() {
        return None;
    }
    if offset == text.len() {
        return Some(offset);
    }
    Some(
        text.grapheme_indices(true)
            .map(|(i, _)| i)
            .take_while(|&i| i <= offset)
            .last()
            .unwrap_or(0),
    )
}

/// Fuzzy title locator and session factory
impl Segmenter {
    #[inline]
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    fn units<'t>(&self, text: &'t str) -> impl Iterator<Item = (usize, Cow<'t, str>)> {
        let case_insensitive = self.case_insensitive;
        text.grapheme_indices(true).map(move |(i, g)| {
            if case_insensitive {
                (i, Cow::Owned(g.to_lowercase()))
            } else {
                (i, Cow::Borrowed(g))
            }
        })
    }

    /// Finds the window of `content` closest to `title`, whether or not it is
    /// within tolerance.
    ///
    /// Windows are as long as the title in grapheme clusters and are scanned
    /// from the rightmost to the leftmost. Only a strictly better distance
    /// moves the result, so among equal scores the rightmost window wins; an
    /// exact match ends the scan. Returns `None` when the title is degenerate
    /// or longer than `content`.
    pub fn locate(&self, content: &str, title: &str) -> Option<Boundary> {
        if title.trim().graphemes(true).count() < self.tolerance.min_title_len {
            return None;
        }

        let title_units: Vec<Cow<str>> = self.units(title).map(|(_, g)| g).collect();
        let (offsets, units): (Vec<usize>, Vec<Cow<str>>) = self.units(content).unzip();
        let width = title_units.len();
        if width > units.len() {
            return None;
        }

        let mut best: Option<(usize, usize)> = None;
        for start in (0..=units.len() - width).rev() {
            let distance = levenshtein(&units[start..start + width], &title_units[..]);
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, start));
                if distance == 0 {
                    break;
                }
            }
        }

        let (distance, start) = best?;
        let start_byte = floor_boundary(content, offsets[start])?;
        let end_byte = offsets.get(start + width).copied().unwrap_or(content.len());
        Some(Boundary {
            distance,
            title_len: width,
            start: start_byte,
            end: end_byte,
        })
    }

    /// Like [`locate`](Self::locate), but only returns a boundary the
    /// tolerance accepts.
    pub fn find(&self, content: &str, title: &str) -> Option<Boundary> {
        let boundary = self.locate(content, title)?;
        let accepted = self.tolerance.accepts(boundary.distance, boundary.title_len);
        trace!(
            title,
            distance = boundary.distance,
            threshold = self.tolerance.threshold(boundary.title_len),
            start = boundary.start,
            accepted,
            "located title"
        );
        accepted.then_some(boundary)
    }

    /// Builds a backlog from a table of contents in reading order, applying
    /// the configured TOC marker.
    pub fn backlog<T>(&self, toc: impl IntoIterator<Item = T>) -> TitleBacklog
    where
        T: AsRef<str>,
    {
        TitleBacklog::from_toc(toc, self.toc_marker.as_deref())
    }

    /// Opens a session over `backlog`.
    ///
    /// Titles too short to be located are dropped first; if none remain the
    /// document cannot be segmented and [`SegmentError::EmptyBacklog`] is
    /// returned.
    pub fn session(&self, mut backlog: TitleBacklog) -> Result<Session<'_>> {
        backlog.reject_shorter_than(self.tolerance.min_title_len);
        if backlog.is_empty() {
            return Err(SegmentError::EmptyBacklog);
        }
        Ok(Session::new(self, backlog))
    }

    /// Segments a whole document. `pages` are given in reading order; they are
    /// whitespace normalized and fed to a session last page first.
    pub fn segment<I, P>(
        &self,
        meta: DocumentMeta,
        backlog: TitleBacklog,
        pages: I,
    ) -> Result<Segmentation>
    where
        I: IntoIterator<Item = P>,
        I::IntoIter: DoubleEndedIterator,
        P: AsRef<str>,
    {
        let mut session = self.session(backlog)?;
        for page in pages.into_iter().rev() {
            session.consume_page(&collapse_whitespace(page.as_ref()));
        }
        Ok(session.finish(meta))
    }
}
