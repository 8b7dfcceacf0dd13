//! Search-then-paginate behaviour shared by the back-office listing views.

use std::num::NonZeroU64;

use crate::{
    error::PaginationError,
    pagination::{self, clamp_page, item_range, pages},
    types::pagination::{PaginationView, WindowBudget},
};

/// Field a listing's search box matches against (category code, voucher
/// code, order id and so on).
pub trait Searchable {
    fn search_key(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct Listing<T> {
    items: Vec<T>,
    query: String,
    items_per_page: NonZeroU64,
    current_page: u64,
}

impl<T: Searchable> Listing<T> {
    pub fn new(items: Vec<T>, items_per_page: u64) -> Result<Self, PaginationError> {
        let items_per_page = NonZeroU64::new(items_per_page).ok_or(
            PaginationError::InvalidArgument("items_per_page must be positive"),
        )?;
        Ok(Self {
            items,
            query: String::new(),
            items_per_page,
            current_page: 1,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn items_per_page(&self) -> NonZeroU64 {
        self.items_per_page
    }

    /// Case-insensitive substring search. A new query starts from page one.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.query = query.into().to_lowercase();
        self.current_page = 1;
    }

    /// Swap in freshly fetched rows, keeping the page when it still exists.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = clamp_page(self.current_page as i64, self.total_pages());
    }

    pub fn filtered(&self) -> impl Iterator<Item = &T> + '_ {
        self.items
            .iter()
            .filter(move |item| item.search_key().to_lowercase().contains(&self.query))
    }

    pub fn filtered_len(&self) -> usize {
        if self.query.is_empty() {
            return self.items.len();
        }
        self.filtered().count()
    }

    pub fn total_pages(&self) -> u64 {
        pages(self.filtered_len() as u64, self.items_per_page)
    }

    /// Returns whether the page changed.
    pub fn go_to_page(&mut self, requested: i64) -> bool {
        let valid_page = clamp_page(requested, self.total_pages());
        if valid_page == self.current_page {
            return false;
        }
        self.current_page = valid_page;
        true
    }

    pub fn page_items(&self) -> Vec<&T> {
        let range = item_range(self.filtered_len(), self.items_per_page, self.current_page);
        self.filtered()
            .skip(range.start)
            .take(range.len())
            .collect()
    }

    pub fn view(&self, budget: WindowBudget) -> Option<PaginationView> {
        pagination::view(self.current_page, self.total_pages(), budget)
    }
}
