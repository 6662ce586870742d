//! One-shot reveal animations for elements scrolled into view
//!
//! Each element is revealed at most once: the first time enough of it is
//! inside the viewport its visible class is added (or, for skill bars, its
//! width is set). Elements already revealed are never measured again.

use crate::consts::{REVEAL_BOTTOM_INSET, REVEAL_THRESHOLD, SKILL_BAR_THRESHOLD};

/// What kind of reveal an element gets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealKind {
    FadeIn,
    SlideInLeft,
    SlideInRight,
    /// Progress bar grown to `level` percent
    SkillBar { level: String },
}

/// DOM change to apply when an element is revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealAction {
    AddClass(&'static str),
    SetWidth(String),
}

impl RevealKind {
    /// Pick the reveal for an element's `class` attribute. `fade-in` wins
    /// over the slide variants when several are present.
    pub fn from_class_list(classes: &str) -> Option<Self> {
        let has = |name: &str| classes.split_whitespace().any(|c| c == name);
        if has("fade-in") {
            Some(Self::FadeIn)
        } else if has("slide-in-left") {
            Some(Self::SlideInLeft)
        } else if has("slide-in-right") {
            Some(Self::SlideInRight)
        } else {
            None
        }
    }

    /// Skill bar from its `data-skill` attribute
    pub fn skill_bar(level: &str) -> Self {
        Self::SkillBar {
            level: level.trim().to_string(),
        }
    }

    /// Fraction of the element that must be visible
    pub fn threshold(&self) -> f64 {
        match self {
            Self::SkillBar { .. } => SKILL_BAR_THRESHOLD,
            _ => REVEAL_THRESHOLD,
        }
    }

    /// Pixels trimmed off the bottom of the viewport before testing
    pub fn bottom_inset(&self) -> f64 {
        match self {
            Self::SkillBar { .. } => 0.0,
            _ => REVEAL_BOTTOM_INSET,
        }
    }

    pub fn action(&self) -> RevealAction {
        match self {
            Self::FadeIn => RevealAction::AddClass("fade-in--visible"),
            Self::SlideInLeft => RevealAction::AddClass("slide-in-left--visible"),
            Self::SlideInRight => RevealAction::AddClass("slide-in-right--visible"),
            Self::SkillBar { level } => RevealAction::SetWidth(format!("{}%", level)),
        }
    }
}

/// Fraction of an element (`top`, `height` in viewport px) inside
/// `[0, viewport_height - bottom_inset]`
pub fn visible_fraction(top: f64, height: f64, viewport_height: f64, bottom_inset: f64) -> f64 {
    let bottom_edge = viewport_height - bottom_inset;
    if height <= 0.0 {
        return if (0.0..=bottom_edge).contains(&top) { 1.0 } else { 0.0 };
    }
    let overlap = (top + height).min(bottom_edge) - top.max(0.0);
    (overlap / height).clamp(0.0, 1.0)
}

/// Reveal state for a fixed list of elements
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    kinds: Vec<RevealKind>,
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(kinds: Vec<RevealKind>) -> Self {
        let revealed = vec![false; kinds.len()];
        Self { kinds, revealed }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Elements still waiting to be revealed
    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }

    /// Measure every pending element and reveal those now in view.
    /// `measure(i)` returns `(top, height)` in viewport px, or `None` if the
    /// element can't be measured. Returns the newly revealed indices.
    pub fn update<F>(&mut self, viewport_height: f64, mut measure: F) -> Vec<(usize, RevealAction)>
    where
        F: FnMut(usize) -> Option<(f64, f64)>,
    {
        let mut actions = Vec::new();
        for (index, kind) in self.kinds.iter().enumerate() {
            if self.revealed[index] {
                continue;
            }
            let Some((top, height)) = measure(index) else {
                continue;
            };
            let fraction = visible_fraction(top, height, viewport_height, kind.bottom_inset());
            if fraction > 0.0 && fraction >= kind.threshold() {
                self.revealed[index] = true;
                actions.push((index, kind.action()));
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_classes() {
        assert_eq!(
            RevealKind::from_class_list("card fade-in"),
            Some(RevealKind::FadeIn)
        );
        assert_eq!(
            RevealKind::from_class_list("slide-in-right about__text"),
            Some(RevealKind::SlideInRight)
        );
        assert_eq!(
            RevealKind::from_class_list("slide-in-left fade-in"),
            Some(RevealKind::FadeIn)
        );
        // Substring matches are not enough
        assert_eq!(RevealKind::from_class_list("fade-in--visible"), None);
        assert_eq!(RevealKind::from_class_list("hero"), None);
    }

    #[test]
    fn test_actions() {
        assert_eq!(
            RevealKind::SlideInLeft.action(),
            RevealAction::AddClass("slide-in-left--visible")
        );
        assert_eq!(
            RevealKind::skill_bar(" 85 ").action(),
            RevealAction::SetWidth("85%".to_string())
        );
    }

    #[test]
    fn test_visible_fraction() {
        // Fully inside
        assert_eq!(visible_fraction(100.0, 200.0, 800.0, 50.0), 1.0);
        // Half above the top
        assert_eq!(visible_fraction(-100.0, 200.0, 800.0, 0.0), 0.5);
        // Bottom 50px of the viewport don't count
        assert_eq!(visible_fraction(700.0, 100.0, 800.0, 50.0), 0.5);
        // Entirely below
        assert_eq!(visible_fraction(900.0, 100.0, 800.0, 0.0), 0.0);
        // Zero height: in or out
        assert_eq!(visible_fraction(10.0, 0.0, 800.0, 0.0), 1.0);
        assert_eq!(visible_fraction(-10.0, 0.0, 800.0, 0.0), 0.0);
    }

    #[test]
    fn test_reveals_once() {
        let mut tracker = RevealTracker::new(vec![RevealKind::FadeIn]);
        let actions = tracker.update(800.0, |_| Some((100.0, 100.0)));
        assert_eq!(actions, vec![(0, RevealAction::AddClass("fade-in--visible"))]);
        assert!(tracker.is_revealed(0));

        let mut measured = false;
        let again = tracker.update(800.0, |_| {
            measured = true;
            Some((100.0, 100.0))
        });
        assert!(again.is_empty());
        assert!(!measured);
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn test_thresholds_per_kind() {
        let mut tracker = RevealTracker::new(vec![
            RevealKind::FadeIn,
            RevealKind::skill_bar("70"),
        ]);
        // 20% of each element is visible
        let actions = tracker.update(800.0, |i| match i {
            0 => Some((730.0, 100.0)),
            _ => Some((780.0, 100.0)),
        });
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].0, 0);
        assert!(!tracker.is_revealed(1));

        // 40% of the skill bar
        let actions = tracker.update(800.0, |_| Some((760.0, 100.0)));
        assert!(actions.is_empty());
        let actions = tracker.update(800.0, |_| Some((700.0, 100.0)));
        assert_eq!(actions, vec![(1, RevealAction::SetWidth("70%".to_string()))]);
    }

    #[test]
    fn test_unmeasurable_stays_pending() {
        let mut tracker = RevealTracker::new(vec![RevealKind::SlideInLeft]);
        assert!(tracker.update(800.0, |_| None).is_empty());
        assert_eq!(tracker.pending(), 1);
        assert!(!tracker.is_revealed(3));
    }
}
