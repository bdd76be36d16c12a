/// Position within the season's categories, one category shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPager {
    index: usize,
    total: usize,
}

impl CategoryPager {
    /// Starts at `index`, clamped to the last category.
    pub fn new(total: usize, index: usize) -> Self {
        Self {
            index: index.min(total.saturating_sub(1)),
            total,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prev(self) -> Self {
        Self::new(self.total, self.index.saturating_sub(1))
    }

    pub fn next(self) -> Self {
        Self::new(self.total, self.index + 1)
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total
    }

    /// "3 / 24", or empty when there are no categories.
    pub fn progress(&self) -> String {
        if self.total == 0 {
            String::new()
        } else {
            format!("{} / {}", self.index + 1, self.total)
        }
    }
}
