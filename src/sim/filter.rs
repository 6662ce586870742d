//! Project card filtering by category

/// Filter value that shows every card
pub const ALL: &str = "all";

/// Currently selected project category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFilter {
    active: String,
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            active: ALL.to_string(),
        }
    }
}

impl ProjectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `filter` (a filter button's `data-filter`)
    pub fn select(&mut self, filter: &str) {
        self.active = filter.to_string();
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Whether a card with this `data-category` is shown.
    /// Cards without a category only show under [`ALL`].
    pub fn shows(&self, category: Option<&str>) -> bool {
        self.active == ALL || category == Some(self.active.as_str())
    }

    /// Visibility for each card, in order
    pub fn visibility<'a, I>(&self, categories: I) -> Vec<bool>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        categories.into_iter().map(|c| self.shows(c)).collect()
    }

    /// Whether the button for `button_filter` should carry the active state
    pub fn is_active(&self, button_filter: &str) -> bool {
        self.active == button_filter
    }
}
