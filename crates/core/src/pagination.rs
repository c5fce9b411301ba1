//! Page cursor and completion tracking for multi-page guides.
//!
//! Pages are 0-based internally and 1-based on screen. A bookmark value of
//! `N` (the page count) means the guide was finished, while `N - 1` means the
//! reader is on the last page but has not finished it.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PaginationError {
    #[error("a guide needs at least one page")]
    NoPages,
}

/// Notification produced by a page transition, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// New bookmark value to persist. Equals the page count on completion.
    PageChanged(usize),
    Completed,
}

/// A persisted bookmark clamped against a guide's page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumePoint {
    value: usize,
    page_count: usize,
}

impl ResumePoint {
    /// Clamps a raw stored value into `[0, page_count]`.
    #[must_use]
    pub fn from_raw(raw: i64, page_count: usize) -> Self {
        let value = usize::try_from(raw.max(0))
            .unwrap_or(usize::MAX)
            .min(page_count);
        Self { value, page_count }
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.value
    }

    /// Page the reader lands on.
    #[must_use]
    pub fn page(self) -> usize {
        self.value.min(self.page_count.saturating_sub(1))
    }

    /// Number of leading pages already complete.
    #[must_use]
    pub fn completed_pages(self) -> usize {
        self.value
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self.page_count > 0 && self.value == self.page_count
    }
}

/// Navigation state for one guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageController {
    current: usize,
    completed: Vec<bool>,
    initial: Option<i64>,
}

impl PageController {
    /// Creates a controller positioned on the first page.
    ///
    /// # Errors
    ///
    /// Returns `PaginationError::NoPages` when `page_count` is zero.
    pub fn new(page_count: usize) -> Result<Self, PaginationError> {
        if page_count == 0 {
            return Err(PaginationError::NoPages);
        }
        Ok(Self {
            current: 0,
            completed: vec![false; page_count],
            initial: None,
        })
    }

    /// Creates a controller and applies a stored bookmark.
    ///
    /// # Errors
    ///
    /// Returns `PaginationError::NoPages` when `page_count` is zero.
    pub fn with_bookmark(page_count: usize, initial_page: i64) -> Result<Self, PaginationError> {
        let mut controller = Self::new(page_count)?;
        controller.initialize(initial_page);
        Ok(controller)
    }

    /// Positions the cursor from a bookmark and rebuilds the completion flags.
    pub fn initialize(&mut self, initial_page: i64) {
        let resume = ResumePoint::from_raw(initial_page, self.page_count());
        self.current = resume.page();
        let done = resume.completed_pages();
        for (index, flag) in self.completed.iter_mut().enumerate() {
            *flag = index < done;
        }
        self.initial = Some(initial_page);
    }

    /// Re-initializes when the externally stored bookmark changed.
    ///
    /// Returns `true` if the state was rebuilt.
    pub fn resume(&mut self, initial_page: i64) -> bool {
        if self.initial == Some(initial_page) {
            return false;
        }
        self.initialize(initial_page);
        true
    }

    /// Completes the current page and moves forward.
    ///
    /// On the last page this reports completion again on every call.
    pub fn go_next(&mut self) -> Vec<PageEvent> {
        self.completed[self.current] = true;
        if self.current + 1 < self.page_count() {
            self.current += 1;
            vec![PageEvent::PageChanged(self.current)]
        } else {
            vec![
                PageEvent::PageChanged(self.page_count()),
                PageEvent::Completed,
            ]
        }
    }

    pub fn go_prev(&mut self) -> Vec<PageEvent> {
        if self.current == 0 {
            return Vec::new();
        }
        self.current -= 1;
        vec![PageEvent::PageChanged(self.current)]
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn completed(&self) -> &[bool] {
        &self.completed
    }

    #[must_use]
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|done| **done).count()
    }

    #[must_use]
    pub fn is_first_page(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.current + 1 == self.page_count()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed.iter().all(|done| *done)
    }

    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current + 1, self.page_count())
    }

    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        crate::model::percent(self.completed_count(), self.page_count())
    }
}
