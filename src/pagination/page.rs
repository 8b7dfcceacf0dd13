use std::{num::NonZeroU64, ops::Range};

use crate::{error::PaginationError, types::pagination::WindowBudget};

/// Number of pages needed for `total_items` at a known-good page size.
pub fn pages(total_items: u64, items_per_page: NonZeroU64) -> u64 {
    total_items.div_ceil(items_per_page.get())
}

/// Compute the number of pages for a listing.
pub fn total_pages(total_items: u64, items_per_page: u64) -> Result<u64, PaginationError> {
    NonZeroU64::new(items_per_page)
        .map(|per_page| pages(total_items, per_page))
        .ok_or(PaginationError::InvalidArgument(
            "items_per_page must be positive",
        ))
}

/// Same as [`total_pages`] for caller-supplied signed values. A negative
/// item count is treated as an empty listing.
pub fn total_pages_signed(total_items: i64, items_per_page: i64) -> Result<u64, PaginationError> {
    if items_per_page <= 0 {
        return Err(PaginationError::InvalidArgument(
            "items_per_page must be positive",
        ));
    }
    total_pages(total_items.max(0) as u64, items_per_page as u64)
}

/// Zero or one page has nothing to navigate.
pub fn should_paginate(total_pages: u64) -> bool {
    total_pages > 1
}

/// Clamp a requested page into `[1, max(1, total_pages)]`.
pub fn clamp_page(requested: i64, total_pages: u64) -> u64 {
    if requested < 1 {
        return 1;
    }
    (requested as u64).min(total_pages.max(1))
}

/// Contiguous run of page numbers to show as buttons.
///
/// The run is centered on `current_page` where possible and anchored to the
/// first or last page near either edge.
pub fn page_window(current_page: u64, total_pages: u64, budget: WindowBudget) -> Vec<u64> {
    let budget = budget.get() as u64;
    if total_pages <= budget {
        return (1..=total_pages).collect();
    }

    // total_pages > budget here, so the last full window starts in range.
    let start = current_page
        .saturating_sub(budget / 2)
        .max(1)
        .min(total_pages - budget + 1);
    (start..=start + (budget - 1)).collect()
}

/// Slice bounds of the items shown on `page`.
pub fn item_range(total_items: usize, items_per_page: NonZeroU64, page: u64) -> Range<usize> {
    let per_page = usize::try_from(items_per_page.get()).unwrap_or(usize::MAX);
    let page = usize::try_from(page).unwrap_or(usize::MAX);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(total_items);
    start.min(total_items)..end
}
