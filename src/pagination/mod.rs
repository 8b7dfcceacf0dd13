//! Page-window computation and navigation for listing views.
//!
//! Everything here is a pure function of its inputs except [`Paginator`],
//! which keeps the current page of one view and reports changes to it.

mod buttons;
mod page;
mod paginator;

pub use buttons::build_buttons;
pub use page::{
    clamp_page, item_range, page_window, pages, should_paginate, total_pages,
    total_pages_signed,
};
pub use paginator::Paginator;

use crate::types::pagination::{PaginationView, WindowBudget};

/// Render the controls for `current_page`, or `None` when there is at most
/// one page and nothing should be shown.
pub fn view(current_page: u64, total_pages: u64, budget: WindowBudget) -> Option<PaginationView> {
    if !should_paginate(total_pages) {
        return None;
    }
    let current_page = current_page.clamp(1, total_pages);
    let window = page_window(current_page, total_pages, budget);
    let buttons = build_buttons(current_page, total_pages, &window);

    Some(PaginationView {
        total_pages,
        current_page,
        window,
        buttons,
    })
}
