use crate::{Result, SegmentError, Segmenter, SegmenterConfig, Tolerance};

/// Builder for [`Segmenter`].
///
/// ```rust
/// use fuzzy_toc_segmenter::SegmenterBuilder;
///
/// let segmenter = SegmenterBuilder::new()
///     .max_error_ratio(0.2)
///     .case_insensitive(true)
///     .build()
///     .unwrap();
///
/// let boundary = segmenter.find("see METHODS below", "Methods").unwrap();
/// assert_eq!(boundary.start, 4);
/// ```
#[derive(Debug, Default)]
pub struct SegmenterBuilder {
    config: SegmenterConfig,
}

impl SegmenterBuilder {
    /// Start with the defaults: 10% edit budget, one-grapheme minimum title,
    /// case-sensitive, no TOC marker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SegmenterConfig::default(),
        }
    }

    /// Start from a loaded configuration.
    #[must_use]
    pub fn from_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Tolerated edits per title grapheme, rounded half-up per title.
    #[must_use]
    pub fn max_error_ratio(mut self, ratio: f64) -> Self {
        self.config.max_error_ratio = ratio;
        self
    }

    /// Titles shorter than this (in graphemes, after trimming) are rejected.
    #[must_use]
    pub fn min_title_len(mut self, len: usize) -> Self {
        self.config.min_title_len = len;
        self
    }

    /// Enable Unicode-aware *case-insensitive* matching.
    #[must_use]
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.config.case_insensitive = value;
        self
    }

    /// Drop TOC entries up to and including `marker` when building a backlog.
    #[must_use]
    pub fn toc_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.toc_marker = Some(marker.into());
        self
    }

    /// Validates the configuration and builds an immutable [`Segmenter`].
    pub fn build(self) -> Result<Segmenter> {
        let SegmenterConfig {
            max_error_ratio,
            min_title_len,
            case_insensitive,
            toc_marker,
        } = self.config;

        if !max_error_ratio.is_finite() || max_error_ratio < 0.0 {
            return Err(SegmentError::InvalidConfig(format!(
                "max_error_ratio must be a finite non-negative number, got {max_error_ratio}"
            )));
        }
        if min_title_len == 0 {
            return Err(SegmentError::InvalidConfig(
                "min_title_len must be at least 1".to_owned(),
            ));
        }

        Ok(Segmenter {
            tolerance: Tolerance::new()
                .max_error_ratio(max_error_ratio)
                .min_title_len(min_title_len),
            case_insensitive,
            toc_marker: toc_marker.filter(|m| !m.trim().is_empty()),
        })
    }
}
