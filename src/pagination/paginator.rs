use std::num::NonZeroU64;

use log::debug;

use super::{clamp_page, pages, view};
use crate::{
    error::PaginationError,
    types::pagination::{PageButton, PageRequest, PaginationView, WindowBudget},
};

/// Current page of one listing view plus the callback that hears about
/// page changes.
pub struct Paginator<F> {
    total_items: u64,
    items_per_page: NonZeroU64,
    total_pages: u64,
    current_page: u64,
    on_page_change: F,
}

impl<F> std::fmt::Debug for Paginator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("total_items", &self.total_items)
            .field("items_per_page", &self.items_per_page)
            .field("total_pages", &self.total_pages)
            .field("current_page", &self.current_page)
            .finish_non_exhaustive()
    }
}

impl<F: FnMut(u64)> Paginator<F> {
    /// The requested current page is clamped silently; construction never
    /// fires the callback.
    pub fn new(request: PageRequest, on_page_change: F) -> Result<Self, PaginationError> {
        let items_per_page = NonZeroU64::new(request.items_per_page).ok_or(
            PaginationError::InvalidArgument("items_per_page must be positive"),
        )?;
        let total_pages = pages(request.total_items, items_per_page);

        Ok(Self {
            total_items: request.total_items,
            items_per_page,
            total_pages,
            current_page: clamp_to(request.current_page, total_pages),
            on_page_change,
        })
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn items_per_page(&self) -> NonZeroU64 {
        self.items_per_page
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(
            self.total_items,
            self.items_per_page.get(),
            self.current_page,
        )
    }

    /// Move to `requested` after clamping. Returns whether the page changed;
    /// the callback runs only in that case.
    pub fn go_to_page(&mut self, requested: i64) -> bool {
        let valid_page = clamp_page(requested, self.total_pages);
        self.navigate(valid_page)
    }

    /// Perform a button's navigation. Disabled buttons do nothing, even when
    /// the button came from an older render.
    pub fn activate(&mut self, button: &PageButton) -> bool {
        if button.is_disabled {
            return false;
        }
        self.navigate(clamp_to(button.page_number, self.total_pages))
    }

    /// Adopt a new item count, e.g. after a search narrowed the listing. The
    /// current page follows the clamp and the callback hears about a move.
    pub fn set_total_items(&mut self, total_items: u64) -> bool {
        self.total_items = total_items;
        self.total_pages = pages(total_items, self.items_per_page);
        self.navigate(clamp_to(self.current_page, self.total_pages))
    }

    pub fn render(&self, budget: WindowBudget) -> Option<PaginationView> {
        view(self.current_page, self.total_pages, budget)
    }

    fn navigate(&mut self, valid_page: u64) -> bool {
        if valid_page == self.current_page {
            return false;
        }
        debug!("page change {} -> {}", self.current_page, valid_page);
        self.current_page = valid_page;
        (self.on_page_change)(valid_page);
        true
    }
}

fn clamp_to(page: u64, total_pages: u64) -> u64 {
    page.clamp(1, total_pages.max(1))
}
