use crate::{DocumentMeta, SectionRecord, Segmentation, Segmenter, TitleBacklog};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Text collected for one section.
///
/// Pages arrive back to front and each page adds at most one fragment to a
/// given accumulator, so the fragments are stored in arrival order and joined
/// in reverse.
#[derive(Debug, Default)]
struct Accumulator {
    fragments: Vec<String>,
}

impl Accumulator {
    fn push(&mut self, fragment: &str) {
        if !fragment.is_empty() {
            self.fragments.push(fragment.to_owned());
        }
    }

    fn into_text(self) -> String {
        self.fragments.into_iter().rev().collect()
    }
}

/// Stateful back-to-front segmentation of one document.
///
/// Created by [`Segmenter::session`]. Feed it whitespace-normalized pages
/// with [`consume_page`](Self::consume_page), last page first, then call
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct Session<'a> {
    segmenter: &'a Segmenter,
    backlog: TitleBacklog,
    /// The last one is the open accumulator; one more than `consumed`.
    accumulators: Vec<Accumulator>,
    /// Matched titles, in the order they were found.
    consumed: VecDeque<String>,
    pages: usize,
}

impl<'a> Session<'a> {
    pub(crate) fn new(segmenter: &'a Segmenter, backlog: TitleBacklog) -> Self {
        Self {
            segmenter,
            backlog,
            accumulators: vec![Accumulator::default()],
            consumed: VecDeque::new(),
            pages: 0,
        }
    }

    /// Titles still to be found; the top is searched next.
    pub fn backlog(&self) -> &TitleBacklog {
        &self.backlog
    }

    pub fn pages_consumed(&self) -> usize {
        self.pages
    }

    pub fn sections_found(&self) -> usize {
        self.consumed.len()
    }

    /// Consumes the next page (going backwards through the document).
    ///
    /// The top title is searched in what is left of the page. On a match the
    /// text after the title goes to the open section, a new section is
    /// opened and the search goes on in front of the title. Once a title is
    /// not found, the rest of the page belongs to the open section, which
    /// continues on earlier pages. Pages seen after the backlog runs out are
    /// front matter.
    pub fn consume_page(&mut self, page: &str) {
        self.pages += 1;
        let mut remaining = page;
        let found_before = self.consumed.len();

        while let Some(title) = self.backlog.peek() {
            let Some(boundary) = self.segmenter.find(remaining, title) else {
                break;
            };
            self.open().push(&remaining[boundary.end..]);
            remaining = remaining[..boundary.start].trim_end();

            if let Some(title) = self.backlog.pop() {
                self.consumed.push_back(title);
            }
            self.accumulators.push(Accumulator::default());
        }
        self.open().push(remaining);

        debug_assert_eq!(self.accumulators.len(), self.consumed.len() + 1);
        debug!(
            page = self.pages,
            matched = self.consumed.len() - found_before,
            pending = self.backlog.len(),
            "consumed page"
        );
    }

    fn open(&mut self) -> &mut Accumulator {
        // never empty: starts with one and only grows
        let last = self.accumulators.len() - 1;
        &mut self.accumulators[last]
    }

    /// Pairs every finished section with its title.
    ///
    /// The trailing accumulator, holding whatever precedes the first matched
    /// title, has no title and is moved to
    /// [`Segmentation::front_matter`]. Sections come out in the order their
    /// titles were found, the last section of the document first.
    pub fn finish(self, meta: DocumentMeta) -> Segmentation {
        let Session {
            backlog,
            mut accumulators,
            mut consumed,
            ..
        } = self;

        let mut front_matter = String::new();
        while accumulators.len() > consumed.len() {
            let Some(tail) = accumulators.pop() else {
                break;
            };
            front_matter.push_str(&tail.into_text());
        }

        let mut sections = Vec::with_capacity(consumed.len());
        for accumulator in accumulators {
            let Some(paragraph) = consumed.pop_front() else {
                break;
            };
            sections.push(SectionRecord {
                title: meta.title.clone(),
                topic: meta.topic.clone(),
                language: meta.language.clone(),
                text: accumulator.into_text(),
                paragraph,
            });
        }

        let rejected_titles = backlog.rejected().to_vec();
        let unmatched_titles = backlog.into_reading_order();
        if !front_matter.is_empty() || !unmatched_titles.is_empty() {
            debug!(
                topic = %meta.topic,
                front_matter_len = front_matter.len(),
                unmatched = unmatched_titles.len(),
                "discarding content without a matched title"
            );
        }
        if sections.is_empty() {
            warn!(
                title = %meta.title,
                topic = %meta.topic,
                "no title matched, document produced no sections"
            );
        }

        Segmentation {
            meta,
            sections,
            front_matter,
            unmatched_titles,
            rejected_titles,
        }
    }
}
