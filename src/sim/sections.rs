//! Scroll-driven section drawer
//!
//! Every section after the first slides up over its predecessor while the
//! page scrolls through one section height. The covered section fades out.
//! All output is a pure function of the scroll offset; nothing carries over
//! between recomputes, so scrolling back up restores earlier frames exactly.

use crate::consts::{OFFSCREEN_VH, SECTION_FADE, SECTION_HEIGHT_FACTOR};

/// Visual state of one section for a given scroll offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionFrame {
    /// Downward translation in viewport-height units (0 = resting)
    pub translate_vh: f64,
    /// Opacity of the section's content
    pub content_opacity: f64,
}

impl SectionFrame {
    pub const RESTING: Self = Self {
        translate_vh: 0.0,
        content_opacity: 1.0,
    };

    pub const OFFSCREEN: Self = Self {
        translate_vh: OFFSCREEN_VH,
        content_opacity: 1.0,
    };

    /// CSS transform for this frame
    pub fn css_transform(&self) -> String {
        format!("translateY({}vh)", self.translate_vh)
    }
}

/// Where a section sits relative to the current scroll offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionPhase {
    /// Not reached yet, parked below the viewport
    Offscreen,
    /// Sliding in; progress in `[0, 1]`
    Sliding { progress: f64 },
    /// Fully in place
    Resting,
}

/// Section ids plus the per-section scroll height
#[derive(Debug, Clone)]
pub struct SectionEngine {
    ids: Vec<String>,
    section_height: f64,
}

impl SectionEngine {
    pub fn new<I, S>(ids: I, viewport_height: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            section_height: section_height(viewport_height),
        }
    }

    /// Build with an explicit section height (H) instead of deriving it
    pub fn with_section_height<I, S>(ids: I, section_height: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            section_height,
        }
    }

    /// Recompute H for a new viewport height
    pub fn on_resize(&mut self, viewport_height: f64) {
        self.section_height = section_height(viewport_height);
    }

    pub fn section_height(&self) -> f64 {
        self.section_height
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Scroll range `[start, end]` over which section `index` slides in.
    /// Section 0 never slides and has no range.
    pub fn range(&self, index: usize) -> Option<(f64, f64)> {
        if index == 0 || index >= self.ids.len() {
            return None;
        }
        let h = self.section_height;
        Some(((index - 1) as f64 * h, index as f64 * h))
    }

    /// Phase of section `index` at scroll offset `scroll`
    pub fn phase(&self, index: usize, scroll: f64) -> SectionPhase {
        let Some((start, end)) = self.range(index) else {
            return SectionPhase::Resting;
        };
        if scroll < start {
            SectionPhase::Offscreen
        } else if scroll <= end {
            SectionPhase::Sliding {
                progress: self.progress(scroll - start),
            }
        } else {
            SectionPhase::Resting
        }
    }

    /// Frames for every section at scroll offset `scroll`
    pub fn frames(&self, scroll: f64) -> Vec<SectionFrame> {
        let mut frames = vec![SectionFrame::RESTING; self.ids.len()];
        if frames.is_empty() {
            return frames;
        }

        frames[0].content_opacity = fade(self.progress(scroll));

        for index in 1..frames.len() {
            match self.phase(index, scroll) {
                SectionPhase::Offscreen => frames[index] = SectionFrame::OFFSCREEN,
                SectionPhase::Sliding { progress } => {
                    frames[index] = SectionFrame {
                        translate_vh: (1.0 - progress) * OFFSCREEN_VH,
                        content_opacity: 1.0,
                    };
                    frames[index - 1].content_opacity = fade(progress);
                }
                SectionPhase::Resting => frames[index] = SectionFrame::RESTING,
            }
        }
        frames
    }

    /// Index of the nav dot to highlight: `round(scroll / H)`
    pub fn active_dot(&self, scroll: f64) -> usize {
        if self.section_height <= 0.0 {
            return 0;
        }
        (scroll.max(0.0) / self.section_height).round() as usize
    }

    /// Active flag per nav dot. An index past the last section lights none.
    pub fn nav_dots(&self, scroll: f64) -> Vec<bool> {
        let active = self.active_dot(scroll);
        (0..self.ids.len()).map(|i| i == active).collect()
    }

    /// Id of the section whose nav link is highlighted
    pub fn active_id(&self, scroll: f64) -> Option<&str> {
        self.ids.get(self.active_dot(scroll)).map(String::as_str)
    }

    /// Scroll offset that brings section `index` to rest
    pub fn target_offset(&self, index: usize) -> f64 {
        index as f64 * self.section_height
    }

    /// Scroll target for a section id (`#about` or `about`)
    pub fn offset_for_id(&self, id: &str) -> Option<f64> {
        let id = id.strip_prefix('#').unwrap_or(id);
        self.ids
            .iter()
            .position(|s| s == id)
            .map(|index| self.target_offset(index))
    }

    #[inline]
    fn progress(&self, distance: f64) -> f64 {
        if self.section_height <= 0.0 {
            return 1.0;
        }
        (distance / self.section_height).clamp(0.0, 1.0)
    }
}

/// H for a viewport height
#[inline]
pub fn section_height(viewport_height: f64) -> f64 {
    viewport_height * SECTION_HEIGHT_FACTOR
}

#[inline]
fn fade(progress: f64) -> f64 {
    (1.0 - progress * SECTION_FADE).max(0.0)
}
